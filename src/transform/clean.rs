//! CSV export cleanup job.
//!
//! Takes the raw exercises table export and produces an import-ready
//! copy: canonical array literals for the list-valued columns, lowercase
//! boolean tokens, a trimmed name, and empty strings for nullable
//! scalars so they import as NULL. Column order is preserved from the
//! source. Audit tallies are collected in the same pass.

use serde_json::Value;

use crate::audit::{
    count_duplicate_names, sorted_missingness, ArrayColumnStats, CleanAudit, InvalidExample,
};
use crate::parser::RowSet;

use super::array;
use super::value::{cell_str, is_empty};

/// Array-typed columns in the exercises export.
pub const ARRAY_COLUMNS: [&str; 4] = ["muscle_groups", "equipment_needed", "instructions", "tips"];

/// Boolean columns coerced to lowercase literals, null defaulting to false.
pub const BOOL_COLUMNS: [&str; 2] = ["is_compound", "is_custom"];

/// Nullable scalar columns kept as empty strings so the importer reads
/// NULL. `tips` and `instructions` appear here for completeness but are
/// array columns first, so the array handling wins for them.
pub const NULLABLE_COLUMNS: [&str; 10] = [
    "description",
    "difficulty",
    "video_url",
    "image_url",
    "gif_url",
    "tips",
    "instructions",
    "exercisedb_id",
    "last_synced_at",
    "created_by",
];

/// How many invalid-parse examples to keep per array column.
const MAX_INVALID_EXAMPLES: usize = 10;

/// Raw cell text kept in an example before truncation.
const MAX_EXAMPLE_CHARS: usize = 200;

/// Result of the cleanup job.
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    /// Output headers, identical to the source headers.
    pub headers: Vec<String>,
    /// Output rows in header order.
    pub rows: Vec<Vec<String>>,
    /// Audit facts collected during the pass.
    pub audit: CleanAudit,
}

/// Clean a loaded exercises export.
pub fn clean_rows(source: &RowSet) -> CleanOutcome {
    let row_count = source.records.len();

    let missingness = sorted_missingness(
        source
            .headers
            .iter()
            .map(|header| {
                let empty = source
                    .records
                    .iter()
                    .filter(|record| raw_is_empty(record, header))
                    .count();
                (header.clone(), empty)
            })
            .collect(),
        row_count,
    );

    let names: Vec<String> = source
        .records
        .iter()
        .map(|record| cell_str(record, "name"))
        .collect();
    let duplicate_names = if source.headers.iter().any(|h| h == "name") {
        count_duplicate_names(names.iter().map(String::as_str))
    } else {
        0
    };

    let mut array_stats: Vec<ArrayColumnStats> = ARRAY_COLUMNS
        .iter()
        .filter(|column| source.headers.iter().any(|h| h == *column))
        .map(|column| ArrayColumnStats::new(*column))
        .collect();

    let mut rows = Vec::with_capacity(row_count);

    for (index, record) in source.records.iter().enumerate() {
        let mut row = Vec::with_capacity(source.headers.len());

        for header in &source.headers {
            let value = if let Some(stats) = array_stats
                .iter_mut()
                .find(|stats| stats.column == *header)
            {
                clean_array_cell(record, header, index, stats)
            } else if header == "name" {
                cell_str(record, "name")
            } else if BOOL_COLUMNS.contains(&header.as_str()) {
                bool_literal(&cell_str(record, header)).to_string()
            } else if NULLABLE_COLUMNS.contains(&header.as_str()) {
                nullable_cell(record, header)
            } else {
                raw_cell(record, header)
            };
            row.push(value);
        }

        rows.push(row);
    }

    CleanOutcome {
        headers: source.headers.clone(),
        rows,
        audit: CleanAudit {
            row_count,
            column_count: source.headers.len(),
            duplicate_names,
            missingness,
            array_stats,
        },
    }
}

/// Decode, tally, and re-encode one array cell. Already-valid input
/// still goes through the codec so every row carries the canonical
/// literal form.
fn clean_array_cell(
    record: &Value,
    column: &str,
    index: usize,
    stats: &mut ArrayColumnStats,
) -> String {
    stats.total_rows += 1;

    let raw = record.get(column).cloned().unwrap_or(Value::Null);
    if is_empty(&raw) {
        stats.empty_rows += 1;
        return array::encode::<&str>(&[]);
    }

    let (items, valid) = array::decode(&raw);
    if valid {
        stats.valid_rows += 1;
    } else {
        stats.invalid_rows += 1;
        if stats.invalid_examples.len() < MAX_INVALID_EXAMPLES {
            stats.invalid_examples.push(InvalidExample {
                label: example_label(record, index),
                raw: truncate_chars(&cell_str(record, column), MAX_EXAMPLE_CHARS),
            });
        }
    }

    array::encode(&items)
}

/// Row id + name when available, else the row index.
fn example_label(record: &Value, index: usize) -> String {
    let id = cell_str(record, "id");
    let name = cell_str(record, "name");
    let label = format!("{} {}", id, name).trim().to_string();
    if label.is_empty() {
        index.to_string()
    } else {
        label
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Lowercase boolean literal; anything but a literal "true" is false.
fn bool_literal(raw: &str) -> &'static str {
    if raw.trim().eq_ignore_ascii_case("true") {
        "true"
    } else {
        "false"
    }
}

/// Pass a nullable scalar through, blanking null-equivalent cells.
fn nullable_cell(record: &Value, column: &str) -> String {
    let raw = record.get(column).cloned().unwrap_or(Value::Null);
    if is_empty(&raw) {
        String::new()
    } else {
        raw_cell(record, column)
    }
}

/// Cell text exactly as read, without trimming. Missing columns read
/// as empty.
fn raw_cell(record: &Value, column: &str) -> String {
    match record.get(column) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn raw_is_empty(record: &Value, column: &str) -> bool {
    match record.get(column) {
        Some(value) => is_empty(value),
        None => true,
    }
}
