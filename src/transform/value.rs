//! Value classifiers for loosely-typed source cells.

use serde_json::Value;

/// Whether a source cell counts as empty: absent, JSON null, or a
/// blank/whitespace-only string.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Stringify and trim a source cell. Null becomes the empty string.
pub fn clean_str(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Trimmed string value of a named field in a JSON row object.
/// Missing fields read as empty, never as an error.
pub fn cell_str(row: &Value, column: &str) -> String {
    row.get(column).map(clean_str).unwrap_or_default()
}

/// Collapse internal whitespace runs to single spaces and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Deduplicate case-insensitively, keeping first-seen order and casing.
/// Items are trimmed and blank items dropped.
pub fn dedupe_case_insensitive<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let trimmed = item.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase();
        if seen.insert(key) {
            out.push(trimmed.to_string());
        }
    }
    out
}
