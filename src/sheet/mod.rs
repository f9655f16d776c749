//! Spreadsheet loading: named-field access over one worksheet.
//!
//! Reads a fixed worksheet whose headers start at a known row and exposes
//! each data row as a map of trimmed header name to cell text, plus the
//! hyperlink target behind a cell when one exists. Display text and
//! hyperlink target can differ; for the video columns the target is the
//! authoritative value, so both are carried.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{SourceError, SourceResult};

/// One worksheet loaded into memory.
#[derive(Debug, Clone)]
pub struct SheetTable {
    /// Trimmed header names, in sheet column order.
    pub headers: Vec<String>,
    /// Data rows below the header row, fully empty rows dropped.
    pub rows: Vec<SheetRow>,
}

/// One data row, keyed by header name.
#[derive(Debug, Clone, Default)]
pub struct SheetRow {
    values: HashMap<String, String>,
    links: HashMap<String, String>,
}

impl SheetRow {
    pub fn new(values: HashMap<String, String>, links: HashMap<String, String>) -> Self {
        Self { values, links }
    }

    /// Trimmed cell text for a column. Empty string for absent columns.
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }

    /// Hyperlink target behind the cell, if any.
    pub fn hyperlink(&self, column: &str) -> Option<&str> {
        self.links.get(column).map(String::as_str)
    }
}

/// Load one worksheet.
///
/// `header_row` is 1-indexed; data starts on the next row. Header names
/// are trimmed, which also absorbs the known trailing-space variants in
/// the source ("Target Muscle Group ", "Primary Equipment "). Columns
/// with an empty header cell are skipped.
///
/// Pre-flight: fails with [`SourceError::MissingInput`] before any
/// processing if the file does not exist.
pub fn read_sheet<P: AsRef<Path>>(
    path: P,
    sheet_name: &str,
    header_row: u32,
) -> SourceResult<SheetTable> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SourceError::MissingInput(path.to_path_buf()));
    }

    let book = umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| SourceError::Workbook(e.to_string()))?;
    let worksheet = book
        .get_sheet_by_name(sheet_name)
        .ok_or_else(|| SourceError::SheetNotFound(sheet_name.to_string()))?;

    let max_column = worksheet.get_highest_column();
    let max_row = worksheet.get_highest_row();

    let mut columns: Vec<(u32, String)> = Vec::new();
    for col in 1..=max_column {
        let name = worksheet.get_value((col, header_row)).trim().to_string();
        if !name.is_empty() {
            columns.push((col, name));
        }
    }

    if columns.is_empty() {
        return Err(SourceError::NoHeaders);
    }

    let headers: Vec<String> = columns.iter().map(|(_, name)| name.clone()).collect();

    let mut rows = Vec::new();
    for row in (header_row + 1)..=max_row {
        let mut values = HashMap::new();
        let mut links = HashMap::new();
        let mut any_content = false;

        for (col, name) in &columns {
            let text = worksheet.get_value((*col, row)).trim().to_string();
            if !text.is_empty() {
                any_content = true;
            }

            let target = worksheet
                .get_cell((*col, row))
                .and_then(|cell| cell.get_hyperlink())
                .map(|link| link.get_url().to_string());
            if let Some(url) = target {
                if !url.is_empty() {
                    any_content = true;
                    links.insert(name.clone(), url);
                }
            }

            values.insert(name.clone(), text);
        }

        if any_content {
            rows.push(SheetRow::new(values, links));
        }
    }

    Ok(SheetTable { headers, rows })
}
