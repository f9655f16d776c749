//! CSV loading with encoding and delimiter auto-detection.
//!
//! Converts a CSV export into JSON row objects keyed by header name.
//! Record parsing is delegated to the `csv` crate because array-typed
//! cells embed commas and quotes; naive line splitting would tear them
//! apart. No exercise-specific logic here.

use serde_json::{json, Map, Value};
use std::path::Path;

use crate::error::{SourceError, SourceResult};

/// Result of loading a CSV source, with detection metadata.
#[derive(Debug, Clone)]
pub struct RowSet {
    /// Parsed rows as JSON objects keyed by header name.
    pub records: Vec<Value>,
    /// Detected encoding.
    pub encoding: String,
    /// Detected delimiter.
    pub delimiter: char,
    /// Column headers, in source order.
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the detected encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        // Fallback: UTF-8 with lossy conversion
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Detect the delimiter by counting occurrences in the first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Load a CSV file with auto-detection of encoding and delimiter.
///
/// Pre-flight: fails with [`SourceError::MissingInput`] before any
/// processing if the file does not exist.
pub fn read_csv_file<P: AsRef<Path>>(path: P) -> SourceResult<RowSet> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SourceError::MissingInput(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    parse_bytes(&bytes)
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes(bytes: &[u8]) -> SourceResult<RowSet> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);
    parse_str(&content, delimiter, encoding)
}

/// Parse decoded CSV text with an explicit delimiter.
pub fn parse_str(content: &str, delimiter: char, encoding: String) -> SourceResult<RowSet> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(SourceError::NoHeaders);
    }

    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;

        let mut obj = Map::new();
        for (i, header) in headers.iter().enumerate() {
            let value = row.get(i).unwrap_or("");
            obj.insert(header.clone(), json!(value));
        }
        records.push(Value::Object(obj));
    }

    Ok(RowSet {
        records,
        encoding,
        delimiter,
        headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_csv() {
        let csv = "name,age\nAlice,30\nBob,25";
        let result = parse_bytes(csv.as_bytes()).unwrap();

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0]["name"], "Alice");
        assert_eq!(result.records[0]["age"], "30");
        assert_eq!(result.records[1]["name"], "Bob");
    }

    #[test]
    fn test_quoted_cell_with_embedded_commas() {
        // Array-typed export cells look like this; the quoted comma must
        // not split the row.
        let csv = "name,muscle_groups\nBench,\"[\"\"Chest\"\",\"\"Triceps\"\"]\"";
        let result = parse_bytes(csv.as_bytes()).unwrap();

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0]["muscle_groups"], r#"["Chest","Triceps"]"#);
    }

    #[test]
    fn test_missing_values() {
        let csv = "a,b,c\n1,,3";
        let result = parse_bytes(csv.as_bytes()).unwrap();

        assert_eq!(result.records[0]["a"], "1");
        assert_eq!(result.records[0]["b"], "");
        assert_eq!(result.records[0]["c"], "3");
    }

    #[test]
    fn test_short_row_padded_with_empty() {
        let csv = "a,b,c\n1,2";
        let result = parse_bytes(csv.as_bytes()).unwrap();

        assert_eq!(result.records[0]["c"], "");
    }

    #[test]
    fn test_empty_csv_error() {
        let result = parse_bytes(b"");
        assert!(matches!(result, Err(SourceError::NoHeaders)));
    }

    #[test]
    fn test_detect_delimiter_comma() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
    }

    #[test]
    fn test_detect_delimiter_tab() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
    }

    #[test]
    fn test_auto_parse_metadata() {
        let csv = "name,age\nAlice,30\nBob,25";
        let result = parse_bytes(csv.as_bytes()).unwrap();

        assert_eq!(result.delimiter, ',');
        assert_eq!(result.headers, vec!["name", "age"]);
        assert_eq!(result.encoding, "utf-8");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1");
        assert!(decoded.contains("Soci"));
    }

    #[test]
    fn test_missing_file_is_preflight_error() {
        let result = read_csv_file("/definitely/not/here.csv");
        assert!(matches!(result, Err(SourceError::MissingInput(_))));
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("not/here.csv"));
    }
}
