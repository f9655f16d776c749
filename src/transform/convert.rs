//! Spreadsheet conversion job.
//!
//! Maps the functional-fitness workbook rows onto the exercises import
//! schema: normalized name, inferred category and difficulty, deduped
//! muscle and equipment lists, a synthesized description, hyperlink-
//! derived video URL, and labeled tips carrying the metadata the target
//! schema has no columns for. Every output row gets a content-derived
//! stable id and a pending sync status.

use chrono::{DateTime, Utc};

use crate::audit::{count_duplicate_names, sorted_missingness, ConvertAudit};
use crate::models::{Category, Difficulty, ExerciseRecord};
use crate::sheet::{SheetRow, SheetTable};

use super::value::{dedupe_case_insensitive, normalize_whitespace};
use super::{array, category, ident};

/// Sync status stamped on every converted row.
pub const SYNC_STATUS_PENDING: &str = "pending";

/// Timestamp format the importer accepts for `created_at`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S+00";

/// Hyperlink-bearing video columns. The displayed text is a caption;
/// the link target is the URL.
const SHORT_VIDEO_COLUMN: &str = "Short YouTube Demonstration";
const LONG_VIDEO_COLUMN: &str = "In-Depth YouTube Explanation";

/// Result of the conversion job.
#[derive(Debug, Clone)]
pub struct ConvertOutcome {
    pub records: Vec<ExerciseRecord>,
    pub audit: ConvertAudit,
}

/// Convert a loaded worksheet into import-ready exercise records.
///
/// `now` stamps `created_at` on every row; callers pass the run time so
/// one batch carries one timestamp.
pub fn convert_sheet(table: &SheetTable, now: DateTime<Utc>) -> ConvertOutcome {
    let created_at = now.format(TIMESTAMP_FORMAT).to_string();

    let mut records = Vec::new();
    let mut short_links = 0;
    let mut long_links = 0;

    for row in &table.rows {
        let short_url = row.hyperlink(SHORT_VIDEO_COLUMN).unwrap_or("").to_string();
        let long_url = row.hyperlink(LONG_VIDEO_COLUMN).unwrap_or("").to_string();
        if !short_url.is_empty() {
            short_links += 1;
        }
        if !long_url.is_empty() {
            long_links += 1;
        }

        let name = row.get("Exercise");
        if name.is_empty() {
            continue;
        }
        let name = normalize_whitespace(name);

        records.push(convert_row(row, name, short_url, long_url, &created_at));
    }

    let mut ids: Vec<String> = records.iter().map(|record| record.id.clone()).collect();
    ident::repair_collisions(&mut ids);
    for (record, id) in records.iter_mut().zip(ids) {
        record.id = id;
    }

    let audit = build_audit(table, &records, short_links, long_links);

    ConvertOutcome { records, audit }
}

fn convert_row(
    row: &SheetRow,
    name: String,
    short_url: String,
    long_url: String,
    created_at: &str,
) -> ExerciseRecord {
    let target_group = row.get("Target Muscle Group");
    let prime_mover = row.get("Prime Mover Muscle");
    let secondary_muscle = row.get("Secondary Muscle");
    let tertiary_muscle = row.get("Tertiary Muscle");

    let primary_equipment = row.get("Primary Equipment");
    let secondary_equipment = row.get("Secondary Equipment");

    let mechanics = row.get("Mechanics");
    let body_region = row.get("Body Region");
    let movement_1 = row.get("Movement Pattern #1");
    let movement_2 = row.get("Movement Pattern #2");
    let movement_3 = row.get("Movement Pattern #3");

    let force_type = row.get("Force Type");
    let posture = row.get("Posture");
    let grip = row.get("Grip");
    let load_position = row.get("Load Position (Ending)");
    let laterality = row.get("Laterality");
    let primary_class = row.get("Primary Exercise Classification");

    let difficulty = Difficulty::from_level(row.get("Difficulty Level"))
        .map(|level| level.as_str().to_string())
        .unwrap_or_default();
    let category: Category = category::infer_category(body_region, prime_mover, target_group);

    let muscle_groups = dedupe_case_insensitive([
        target_group,
        prime_mover,
        secondary_muscle,
        tertiary_muscle,
    ]);
    let equipment_needed = dedupe_case_insensitive([primary_equipment, secondary_equipment]);

    // Prefer the short demo as main video; keep the long explanation
    // as a tip.
    let video_url = if short_url.is_empty() {
        long_url.clone()
    } else {
        short_url
    };

    let mut tips: Vec<String> = Vec::new();
    let labeled = [
        ("Classification", primary_class),
        ("Mechanics", mechanics),
        ("Movement", movement_1),
        ("Movement", movement_2),
        ("Movement", movement_3),
        ("Posture", posture),
        ("Grip", grip),
        ("Load position", load_position),
        ("Laterality", laterality),
        ("Force type", force_type),
    ];
    for (label, value) in labeled {
        if !value.is_empty() {
            tips.push(format!("{}: {}", label, value));
        }
    }
    if !long_url.is_empty() && long_url != video_url {
        tips.push(format!("In-depth video: {}", long_url));
    }

    // The source has no narrative text; synthesize a short description.
    let description_parts =
        dedupe_case_insensitive([primary_class, movement_1, target_group, body_region]);
    let description = description_parts
        .into_iter()
        .take(4)
        .collect::<Vec<_>>()
        .join(" · ");

    let id = ident::stable_id(&ident::exercise_key(
        &name,
        primary_equipment,
        prime_mover,
        movement_1,
    ));

    let is_compound = if mechanics.eq_ignore_ascii_case("compound") {
        "true"
    } else {
        "false"
    };

    ExerciseRecord {
        id,
        name,
        description,
        category: category.as_str().to_string(),
        muscle_groups: array::encode(&muscle_groups),
        equipment_needed: array::encode(&equipment_needed),
        difficulty,
        instructions: array::encode::<&str>(&[]),
        video_url,
        image_url: String::new(),
        is_compound: is_compound.to_string(),
        is_custom: "false".to_string(),
        created_by: String::new(),
        created_at: created_at.to_string(),
        exercisedb_id: String::new(),
        gif_url: String::new(),
        tips: array::encode(&tips),
        last_synced_at: String::new(),
        sync_status: SYNC_STATUS_PENDING.to_string(),
    }
}

fn build_audit(
    table: &SheetTable,
    records: &[ExerciseRecord],
    short_links: usize,
    long_links: usize,
) -> ConvertAudit {
    let source_missingness = sorted_missingness(
        table
            .headers
            .iter()
            .map(|header| {
                let empty = table
                    .rows
                    .iter()
                    .filter(|row| row.get(header).is_empty())
                    .count();
                (header.clone(), empty)
            })
            .collect(),
        table.rows.len(),
    );

    let output_missingness = sorted_missingness(
        ExerciseRecord::COLUMNS
            .iter()
            .map(|column| {
                let empty = records
                    .iter()
                    .filter(|record| record.get(column).unwrap_or("").is_empty())
                    .count();
                (column.to_string(), empty)
            })
            .collect(),
        records.len(),
    );

    ConvertAudit {
        source_rows: table.rows.len(),
        output_rows: records.len(),
        duplicate_names: count_duplicate_names(records.iter().map(|r| r.name.as_str())),
        short_links,
        long_links,
        source_missingness,
        output_missingness,
    }
}
