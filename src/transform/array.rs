//! Postgres `text[]` literal codec.
//!
//! Source exports carry list-valued columns in several shapes: JSON
//! array strings, already-converted brace literals, or free text.
//! [`decode`] folds all of them into one ordered list of strings;
//! [`encode`] serializes the list as the `{"a","b"}` literal the bulk
//! importer understands. Decode never drops input: anything unparseable
//! degrades to a single-element list holding the original text and is
//! flagged for the audit.

use serde_json::Value;

use super::value::{clean_str, is_empty};

/// Decode a source cell into `(items, cleanly_parsed)`.
///
/// `cleanly_parsed` is false only for the opaque fallback cases, which
/// the audit counts as invalid.
pub fn decode(raw: &Value) -> (Vec<String>, bool) {
    if is_empty(raw) {
        return (Vec::new(), true);
    }

    if let Value::Array(elements) = raw {
        return (elements.iter().map(element_text).collect(), true);
    }

    let text = clean_str(raw);
    if text.is_empty() {
        return (Vec::new(), true);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Array(elements)) => {
            let items = elements
                .iter()
                .map(element_text)
                .filter(|item| !item.trim().is_empty())
                .collect();
            (items, true)
        }
        // JSON, but not an array (unexpected) -> coerce to single item
        Ok(_) => (vec![text], false),
        Err(_) => {
            if text.starts_with('{') && text.ends_with('}') {
                // Already a Postgres array literal. Small heuristic split,
                // only meant for already-clean values: elements with
                // embedded commas come apart here. Known limitation.
                let inner = text[1..text.len() - 1].trim();
                if inner.is_empty() {
                    return (Vec::new(), true);
                }
                let items = inner
                    .split(',')
                    .map(|piece| piece.trim().trim_matches('"').to_string())
                    .collect();
                (items, true)
            } else {
                (vec![text], false)
            }
        }
    }
}

/// Encode a list of strings as a Postgres `text[]` literal: `{"A","B"}`.
///
/// Backslash is escaped before the double quote so the quote's own
/// escape does not get re-escaped.
pub fn encode<S: AsRef<str>>(items: &[S]) -> String {
    let escaped: Vec<String> = items
        .iter()
        .map(|item| {
            let body = item.as_ref().replace('\\', "\\\\").replace('"', "\\\"");
            format!("\"{}\"", body)
        })
        .collect();
    format!("{{{}}}", escaped.join(","))
}

fn element_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
