//! Fitload CLI - prepare exercise database files for Supabase import
//!
//! # Commands
//!
//! ```bash
//! fitload clean exercises_rows.csv        # Audit + clean a CSV export
//! fitload convert functional_fitness.xlsx # Convert a workbook export
//! ```
//!
//! Both commands write an import-ready CSV and a Markdown audit report
//! next to the input unless explicit paths are given.

use clap::{Parser, Subcommand};
use fitload::{
    clean_rows, convert_sheet, read_csv_file, read_sheet, render_clean_report,
    render_convert_report, write_records, write_report, write_table, PipelineResult,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fitload")]
#[command(about = "Prepare exercise database files for bulk Supabase import", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit and clean a database CSV export
    Clean {
        /// Input CSV file
        input: PathBuf,

        /// Output CSV file (default: <input stem>.supabase.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Audit report file (default: <input stem>.audit.md)
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Convert a workbook export onto the exercises import schema
    Convert {
        /// Input XLSX file
        input: PathBuf,

        /// Worksheet name
        #[arg(long, default_value = "Exercises")]
        sheet: String,

        /// 1-indexed row holding the column headers
        #[arg(long, default_value = "16")]
        header_row: u32,

        /// Output CSV file (default: <input stem>.supabase.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Audit report file (default: <input stem>.audit.md)
        #[arg(short, long)]
        report: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Clean {
            input,
            output,
            report,
        } => cmd_clean(&input, output, report),

        Commands::Convert {
            input,
            sheet,
            header_row,
            output,
            report,
        } => cmd_convert(&input, &sheet, header_row, output, report),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_clean(
    input: &Path,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
) -> PipelineResult<()> {
    let output = output.unwrap_or_else(|| sibling(input, "supabase.csv"));
    let report_path = report.unwrap_or_else(|| sibling(input, "audit.md"));

    eprintln!("📄 Reading: {}", input.display());
    let source = read_csv_file(input)?;
    eprintln!("   Encoding: {}", source.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(source.delimiter));
    eprintln!("   Rows: {}", source.records.len());
    eprintln!("   Columns: {}", source.headers.len());

    eprintln!("⚙️  Cleaning...");
    let outcome = clean_rows(&source);
    eprintln!(
        "   Duplicate names (case/space-insensitive): {}",
        outcome.audit.duplicate_names
    );
    for stats in &outcome.audit.array_stats {
        eprintln!(
            "   {}: {} empty, {} valid, {} invalid",
            stats.column, stats.empty_rows, stats.valid_rows, stats.invalid_rows
        );
    }

    write_table(&output, &outcome.headers, &outcome.rows)?;
    let report_md = render_clean_report(input, &output, &outcome.audit);
    write_report(&report_path, &report_md)?;

    println!("Wrote {}", output.display());
    println!("Wrote {}", report_path.display());
    Ok(())
}

fn cmd_convert(
    input: &Path,
    sheet: &str,
    header_row: u32,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
) -> PipelineResult<()> {
    let output = output.unwrap_or_else(|| sibling(input, "supabase.csv"));
    let report_path = report.unwrap_or_else(|| sibling(input, "audit.md"));

    eprintln!("📄 Reading: {} (sheet '{}')", input.display(), sheet);
    let table = read_sheet(input, sheet, header_row)?;
    eprintln!("   Rows: {}", table.rows.len());
    eprintln!("   Columns: {}", table.headers.len());

    eprintln!("⚙️  Converting...");
    let outcome = convert_sheet(&table, chrono::Utc::now());
    eprintln!("   Output rows: {}", outcome.records.len());
    eprintln!(
        "   YouTube hyperlinks: short {}, in-depth {}",
        outcome.audit.short_links, outcome.audit.long_links
    );
    eprintln!(
        "   Duplicate names (case-insensitive): {}",
        outcome.audit.duplicate_names
    );

    write_records(&output, &outcome.records)?;
    let report_md = render_convert_report(input, &output, &outcome.audit);
    write_report(&report_path, &report_md)?;

    println!("Wrote {}", output.display());
    println!("Wrote {}", report_path.display());
    Ok(())
}

/// Sibling path sharing the input's stem: `dir/name.audit.md`.
fn sibling(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{}.{}", stem, suffix))
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
