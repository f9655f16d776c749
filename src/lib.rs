//! # Fitload - exercise database cleanup and conversion
//!
//! Fitload prepares exercise-database source files for bulk Supabase
//! import: a raw CSV export gets audited and normalized in place, and a
//! functional-fitness workbook gets converted onto the exercises table
//! schema. Each run writes an import-ready CSV plus a Markdown audit
//! report.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ CSV / XLSX  │────▶│    Load     │────▶│  Transform  │────▶│ CSV + audit │
//! │   source    │     │ (auto-enc)  │     │  (+tally)   │     │  (markdown) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fitload::{clean_rows, read_csv_file, render_clean_report};
//!
//! let source = read_csv_file("exercises_rows.csv")?;
//! let outcome = clean_rows(&source);
//! println!("{} duplicate names", outcome.audit.duplicate_names);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (ExerciseRecord, Difficulty, Category)
//! - [`parser`] - CSV loading with auto-detection
//! - [`sheet`] - Worksheet loading with hyperlink targets
//! - [`transform`] - Array codec, normalizers, stable ids, job pipelines
//! - [`audit`] - Run statistics and the Markdown report
//! - [`export`] - Output artifacts

// Core modules
pub mod error;
pub mod models;

// Loading
pub mod parser;
pub mod sheet;

// Transformation
pub mod transform;

// Reporting
pub mod audit;

// Output
pub mod export;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ExportError, ExportResult, PipelineError, PipelineResult, SourceError, SourceResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Category, Difficulty, ExerciseRecord};

// =============================================================================
// Re-exports - Loading
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes, read_csv_file, RowSet,
};

pub use sheet::{read_sheet, SheetRow, SheetTable};

// =============================================================================
// Re-exports - Jobs
// =============================================================================

pub use transform::clean::{clean_rows, CleanOutcome, ARRAY_COLUMNS, NULLABLE_COLUMNS};

pub use transform::convert::{convert_sheet, ConvertOutcome, SYNC_STATUS_PENDING};

// =============================================================================
// Re-exports - Audit
// =============================================================================

pub use audit::{
    render_clean_report, render_convert_report, ArrayColumnStats, CleanAudit, ConvertAudit,
    InvalidExample,
};

// =============================================================================
// Re-exports - Export
// =============================================================================

pub use export::{write_records, write_report, write_table};
