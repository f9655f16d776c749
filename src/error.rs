//! Error types for the Fitload preparation jobs.
//!
//! The taxonomy is deliberately narrow:
//!
//! - [`SourceError`] - loading a tabular source (CSV or workbook)
//! - [`ExportError`] - writing the output artifacts
//! - [`PipelineError`] - top-level job errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. Everything else a run
//! can encounter (unparseable array cells, absent optional columns) is
//! recovered locally and surfaced through the audit report instead.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Source Errors
// =============================================================================

/// Errors while loading a tabular source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Required input artifact does not exist. Fatal, raised before any
    /// processing.
    #[error("Missing input file: {}", .0.display())]
    MissingInput(PathBuf),

    /// Failed to read the source file.
    #[error("Failed to read source: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid CSV content.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to open or parse the workbook.
    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    /// Named worksheet is absent from the workbook.
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Source has no header row.
    #[error("No headers found in source")]
    NoHeaders,
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while writing the output artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to write a file.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize a CSV row.
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level job errors.
///
/// This is the error type returned by the two job entry points. A run
/// either completes with both artifacts written or fails with one of
/// these; there is no partial-output recovery.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Source loading error.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Output writing error.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for source loading.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type for artifact writing.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for whole-job operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // SourceError -> PipelineError
        let source_err = SourceError::MissingInput(PathBuf::from("/tmp/missing.csv"));
        let pipeline_err: PipelineError = source_err.into();
        assert!(pipeline_err.to_string().contains("missing.csv"));

        // ExportError -> PipelineError
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let export_err: ExportError = io_err.into();
        let pipeline_err: PipelineError = export_err.into();
        assert!(pipeline_err.to_string().contains("denied"));
    }

    #[test]
    fn test_missing_input_names_path() {
        let err = SourceError::MissingInput(PathBuf::from("database/exercises_rows.csv"));
        let msg = err.to_string();
        assert!(msg.contains("Missing input file"));
        assert!(msg.contains("exercises_rows.csv"));
    }

    #[test]
    fn test_sheet_not_found_format() {
        let err = SourceError::SheetNotFound("Exercises".into());
        assert_eq!(err.to_string(), "Sheet not found: Exercises");
    }
}
