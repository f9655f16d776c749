//! Run statistics and the Markdown audit report.
//!
//! Both jobs tally the same kinds of facts while transforming: how empty
//! each column is, how array-typed cells parsed, how many names repeat.
//! This module holds those tallies and renders them as the Markdown
//! report written next to the cleaned CSV.

use serde::Serialize;
use std::path::Path;

// =============================================================================
// Statistics
// =============================================================================

/// One unparseable array cell, kept for the report.
#[derive(Debug, Clone, Serialize)]
pub struct InvalidExample {
    /// Row id + name when available, else the row index.
    pub label: String,
    /// Raw cell text, truncated to 200 characters.
    pub raw: String,
}

/// Parse tallies for one array-typed column.
#[derive(Debug, Clone, Serialize)]
pub struct ArrayColumnStats {
    pub column: String,
    pub total_rows: usize,
    pub empty_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    pub invalid_examples: Vec<InvalidExample>,
}

impl ArrayColumnStats {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            total_rows: 0,
            empty_rows: 0,
            valid_rows: 0,
            invalid_rows: 0,
            invalid_examples: Vec::new(),
        }
    }
}

/// Audit facts for the CSV cleanup job.
#[derive(Debug, Clone, Serialize)]
pub struct CleanAudit {
    pub row_count: usize,
    pub column_count: usize,
    pub duplicate_names: usize,
    /// Per-column missingness percentage, descending.
    pub missingness: Vec<(String, f64)>,
    pub array_stats: Vec<ArrayColumnStats>,
}

/// Audit facts for the spreadsheet conversion job.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertAudit {
    pub source_rows: usize,
    pub output_rows: usize,
    pub duplicate_names: usize,
    pub short_links: usize,
    pub long_links: usize,
    /// Source-side missingness percentage, descending.
    pub source_missingness: Vec<(String, f64)>,
    /// Output-side missingness percentage, descending.
    pub output_missingness: Vec<(String, f64)>,
}

// =============================================================================
// Aggregation helpers
// =============================================================================

/// Turn per-column empty counts into sorted missingness percentages.
/// Sort is stable and descending, so tied columns keep source order.
pub fn sorted_missingness(counts: Vec<(String, usize)>, total: usize) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = counts
        .into_iter()
        .map(|(column, empty)| {
            let pct = if total == 0 {
                0.0
            } else {
                empty as f64 * 100.0 / total as f64
            };
            (column, pct)
        })
        .collect();
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    entries
}

/// Count duplicate names, case-insensitive and whitespace-insensitive.
/// Every repeat after the first occurrence counts.
pub fn count_duplicate_names<'a, I>(names: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut duplicates = 0;
    for name in names {
        let key = name.trim().to_lowercase();
        if !seen.insert(key) {
            duplicates += 1;
        }
    }
    duplicates
}

// =============================================================================
// Markdown rendering
// =============================================================================

/// Render the cleanup job's report.
pub fn render_clean_report(input: &Path, output: &Path, audit: &CleanAudit) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# {} audit", file_name(input)));
    lines.push(String::new());
    lines.push(format!("Input: `{}`", input.display()));
    lines.push(format!("Output (Supabase import): `{}`", output.display()));
    lines.push(String::new());

    lines.push("## Summary".to_string());
    lines.push(String::new());
    lines.push(format!("- Rows: **{}**", audit.row_count));
    lines.push(format!("- Columns: **{}**", audit.column_count));
    lines.push(format!(
        "- Duplicate names (case/space-insensitive): **{}**",
        audit.duplicate_names
    ));
    lines.push(String::new());

    lines.push("## Missingness (% empty/NULL)".to_string());
    lines.push(String::new());
    push_missingness_table(&mut lines, &audit.missingness, None);

    if !audit.array_stats.is_empty() {
        lines.push(String::new());
        lines.push(
            "## Array column import readiness (converted to Postgres text[] literals)"
                .to_string(),
        );
        lines.push(String::new());
        lines.push("| column | empty rows | valid JSON rows | invalid JSON rows |".to_string());
        lines.push("|---|---:|---:|---:|".to_string());
        for stats in &audit.array_stats {
            lines.push(format!(
                "| {} | {} | {} | {} |",
                stats.column, stats.empty_rows, stats.valid_rows, stats.invalid_rows
            ));
        }

        for stats in &audit.array_stats {
            if stats.invalid_examples.is_empty() {
                continue;
            }
            lines.push(String::new());
            lines.push(format!("### Invalid JSON examples: `{}`", stats.column));
            lines.push(String::new());
            for example in &stats.invalid_examples {
                lines.push(format!("- {}: `{}`", example.label, example.raw));
            }
        }
    }

    lines.join("\n") + "\n"
}

/// Render the conversion job's report.
pub fn render_convert_report(input: &Path, output: &Path, audit: &ConvertAudit) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!("# {} conversion audit", file_name(input)));
    lines.push(String::new());
    lines.push(format!("Source: `{}`", input.display()));
    lines.push(format!("Output (Supabase import): `{}`", output.display()));
    lines.push(String::new());

    lines.push("## Summary".to_string());
    lines.push(String::new());
    lines.push(format!("- Source rows read: **{}**", audit.source_rows));
    lines.push(format!("- Output rows written: **{}**", audit.output_rows));
    lines.push(format!(
        "- Duplicate exercise names (case-insensitive) in output: **{}**",
        audit.duplicate_names
    ));
    lines.push(format!(
        "- YouTube hyperlinks found: short **{}**, in-depth **{}**",
        audit.short_links, audit.long_links
    ));
    lines.push(String::new());

    lines.push("## Source missingness (top 15)".to_string());
    lines.push(String::new());
    push_missingness_table(&mut lines, &audit.source_missingness, Some(15));
    lines.push(String::new());

    lines.push("## Output missingness (top 15)".to_string());
    lines.push(String::new());
    push_missingness_table(&mut lines, &audit.output_missingness, Some(15));
    lines.push(String::new());

    lines.push("## Notes".to_string());
    lines.push(String::new());
    lines.push(
        "- `instructions` are empty because the source database does not contain \
         step-by-step text."
            .to_string(),
    );
    lines.push(
        "- `video_url` is populated from the hyperlink targets behind the YouTube \
         columns (not the displayed text)."
            .to_string(),
    );
    lines.push(
        "- `tips` embeds extra metadata (movement patterns, grip, posture, etc.) so \
         the richer source fields survive without schema changes."
            .to_string(),
    );

    lines.join("\n") + "\n"
}

fn push_missingness_table(lines: &mut Vec<String>, entries: &[(String, f64)], limit: Option<usize>) {
    lines.push("| column | missing % |".to_string());
    lines.push("|---|---:|".to_string());
    let shown = limit.unwrap_or(entries.len());
    for (column, pct) in entries.iter().take(shown) {
        lines.push(format!("| {} | {:.1} |", column, pct));
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("source")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_sorted_missingness_descending_stable() {
        let counts = vec![
            ("a".to_string(), 1),
            ("b".to_string(), 4),
            ("c".to_string(), 1),
        ];
        let sorted = sorted_missingness(counts, 4);

        assert_eq!(sorted[0].0, "b");
        assert_eq!(sorted[0].1, 100.0);
        // Ties keep source order.
        assert_eq!(sorted[1].0, "a");
        assert_eq!(sorted[2].0, "c");
    }

    #[test]
    fn test_sorted_missingness_zero_rows() {
        let sorted = sorted_missingness(vec![("a".to_string(), 0)], 0);
        assert_eq!(sorted[0].1, 0.0);
    }

    #[test]
    fn test_count_duplicate_names() {
        let names = ["Back Squat", "back squat ", "Deadlift", "BACK SQUAT"];
        assert_eq!(count_duplicate_names(names), 2);
        assert_eq!(count_duplicate_names(["a", "b"]), 0);
    }

    #[test]
    fn test_clean_report_structure() {
        let audit = CleanAudit {
            row_count: 3,
            column_count: 5,
            duplicate_names: 1,
            missingness: vec![("tips".to_string(), 66.7), ("name".to_string(), 0.0)],
            array_stats: vec![ArrayColumnStats {
                column: "muscle_groups".to_string(),
                total_rows: 3,
                empty_rows: 1,
                valid_rows: 1,
                invalid_rows: 1,
                invalid_examples: vec![InvalidExample {
                    label: "ex-3 Curl".to_string(),
                    raw: "Biceps and stuff".to_string(),
                }],
            }],
        };

        let report = render_clean_report(
            &PathBuf::from("db/exercises_rows.csv"),
            &PathBuf::from("db/exercises_rows.supabase.csv"),
            &audit,
        );

        assert!(report.starts_with("# exercises_rows.csv audit"));
        assert!(report.contains("- Rows: **3**"));
        assert!(report.contains("| tips | 66.7 |"));
        assert!(report.contains("| muscle_groups | 1 | 1 | 1 |"));
        assert!(report.contains("### Invalid JSON examples: `muscle_groups`"));
        assert!(report.contains("- ex-3 Curl: `Biceps and stuff`"));
    }

    #[test]
    fn test_convert_report_structure() {
        let audit = ConvertAudit {
            source_rows: 10,
            output_rows: 9,
            duplicate_names: 0,
            short_links: 8,
            long_links: 5,
            source_missingness: vec![("Grip".to_string(), 40.0)],
            output_missingness: vec![("created_by".to_string(), 100.0)],
        };

        let report = render_convert_report(
            &PathBuf::from("db/functional_fitness.xlsx"),
            &PathBuf::from("db/functional_fitness.supabase.csv"),
            &audit,
        );

        assert!(report.contains("- Source rows read: **10**"));
        assert!(report.contains("- Output rows written: **9**"));
        assert!(report.contains("short **8**, in-depth **5**"));
        assert!(report.contains("## Source missingness (top 15)"));
        assert!(report.contains("| created_by | 100.0 |"));
        assert!(report.contains("## Notes"));
    }
}
