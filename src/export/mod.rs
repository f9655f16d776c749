//! Output artifacts: the import-ready CSV and the Markdown report.
//!
//! CSV output is comma-delimited and minimally quoted (the writer only
//! quotes when a cell needs it), which is what the bulk importer expects.

use std::path::Path;

use crate::error::ExportResult;
use crate::models::ExerciseRecord;

/// Write a dynamic table (cleanup job): explicit headers, rows in
/// header order.
pub fn write_table<P: AsRef<Path>>(
    path: P,
    headers: &[String],
    rows: &[Vec<String>],
) -> ExportResult<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write converted exercise records (conversion job). The header row is
/// derived from the record's field order.
pub fn write_records<P: AsRef<Path>>(path: P, records: &[ExerciseRecord]) -> ExportResult<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the Markdown audit report.
pub fn write_report<P: AsRef<Path>>(path: P, report: &str) -> ExportResult<()> {
    std::fs::write(path.as_ref(), report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::read_csv_file;

    #[test]
    fn test_write_table_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let headers = vec!["id".to_string(), "muscle_groups".to_string()];
        let rows = vec![vec!["1".to_string(), r#"{"Chest","Triceps"}"#.to_string()]];

        write_table(&path, &headers, &rows).unwrap();

        let loaded = read_csv_file(&path).unwrap();
        assert_eq!(loaded.headers, headers);
        assert_eq!(loaded.records[0]["muscle_groups"], r#"{"Chest","Triceps"}"#);
    }

    #[test]
    fn test_write_records_emits_header_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");

        let record = ExerciseRecord {
            id: "abc".into(),
            name: "Squat".into(),
            description: String::new(),
            category: "legs".into(),
            muscle_groups: r#"{"Quadriceps"}"#.into(),
            equipment_needed: "{}".into(),
            difficulty: "beginner".into(),
            instructions: "{}".into(),
            video_url: String::new(),
            image_url: String::new(),
            is_compound: "true".into(),
            is_custom: "false".into(),
            created_by: String::new(),
            created_at: "2024-05-01 12:00:00+00".into(),
            exercisedb_id: String::new(),
            gif_url: String::new(),
            tips: "{}".into(),
            last_synced_at: String::new(),
            sync_status: "pending".into(),
        };

        write_records(&path, &[record]).unwrap();

        let loaded = read_csv_file(&path).unwrap();
        assert_eq!(loaded.headers.len(), ExerciseRecord::COLUMNS.len());
        assert_eq!(loaded.headers[0], "id");
        assert_eq!(loaded.records[0]["name"], "Squat");
        assert_eq!(loaded.records[0]["muscle_groups"], r#"{"Quadriceps"}"#);
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.md");

        write_report(&path, "# audit\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# audit\n");
    }
}
