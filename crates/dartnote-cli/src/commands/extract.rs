use std::path::PathBuf;

use dartnote_core::error::DartError;
use dartnote_core::model::{FilingMeta, ReportKind};

use crate::output;

pub fn run(
    input_file: PathBuf,
    company: &str,
    year: &str,
    report: &str,
    out: Option<PathBuf>,
) -> Result<(), DartError> {
    let kind = ReportKind::from_str_loose(report)?;
    let meta = FilingMeta::new(company, year, kind)?;

    let html = std::fs::read_to_string(&input_file).map_err(|e| DartError::DocumentRead {
        path: input_file.clone(),
        reason: e.to_string(),
    })?;

    let extraction = dartnote_core::extract_tables(&html, &meta)?;

    let out_path = out.unwrap_or_else(|| input_file.with_file_name(meta.csv_filename()));
    output::csv::write_rows(&out_path, &extraction.rows)?;

    eprintln!(
        "Extracted {} table(s), {} data row(s) to {}",
        extraction.table_count,
        extraction.data_row_count,
        out_path.display()
    );
    if !extraction.skipped_sections.is_empty() {
        eprintln!(
            "  {} section(s) skipped without tables",
            extraction.skipped_sections.len()
        );
    }
    for warning in &extraction.warnings {
        eprintln!("  warning: {} {}", warning.section_id, warning.message);
    }
    if extraction.is_empty() {
        eprintln!("  no table data found in the overview sections");
    }

    Ok(())
}
