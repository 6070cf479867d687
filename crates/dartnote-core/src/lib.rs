pub mod config;
pub mod emit;
pub mod error;
pub mod fetch;
pub mod locate;
pub mod model;
pub mod normalize;

use error::DartError;
use model::FilingMeta;
use normalize::{SkippedSection, StructureWarning};

/// Result of one extraction run over a single filing document.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Emitted rows, header lines included, ready for delimited output.
    pub rows: Vec<Vec<String>>,
    pub table_count: usize,
    pub data_row_count: usize,
    pub skipped_sections: Vec<SkippedSection>,
    pub warnings: Vec<StructureWarning>,
}

impl Extraction {
    /// True when the overview was located but yielded no tables at all.
    pub fn is_empty(&self) -> bool {
        self.table_count == 0
    }
}

/// Main API entry point: normalize the subsidiary-overview tables of a
/// consolidated-notes document into flat rows.
///
/// Fails only on unreadable input (no content, or no overview heading).
/// Sections without usable tables are skipped and counted; header
/// irregularities inside a table produce best-effort output plus a warning.
pub fn extract_tables(html: &str, meta: &FilingMeta) -> Result<Extraction, DartError> {
    let map = locate::locate_sections(html)?;
    let outcome = normalize::normalize_sections(&map);

    let table_count = outcome.records.len();
    let data_row_count = outcome.records.iter().map(|r| r.rows.len()).sum();
    let rows = emit::emit_rows(meta, &outcome.records);

    tracing::info!(
        tables = table_count,
        rows = data_row_count,
        skipped = outcome.skipped.len(),
        "extraction finished"
    );

    Ok(Extraction {
        rows,
        table_count,
        data_row_count,
        skipped_sections: outcome.skipped,
        warnings: outcome.warnings,
    })
}
