pub mod classify;
pub mod header;
pub mod pivot;

use serde::{Deserialize, Serialize};

use crate::locate::{Section, SectionMap, SectionNode};
use crate::model::{RawTable, SectionRecord, ABSENT_PERIOD};

/// A sub-section that produced no usable tables. Non-fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedSection {
    pub section_id: String,
    pub reason: String,
}

/// A table whose header rows did not line up; output was emitted best-effort.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureWarning {
    pub section_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct NormalizeOutcome {
    pub records: Vec<SectionRecord>,
    pub skipped: Vec<SkippedSection>,
    pub warnings: Vec<StructureWarning>,
}

/// Normalize every located sub-section into flat records.
///
/// Empty sections are skipped and counted, never fatal.
pub fn normalize_sections(map: &SectionMap) -> NormalizeOutcome {
    let mut outcome = NormalizeOutcome::default();

    for section in &map.sections {
        let records = normalize_section(section, &mut outcome.warnings);
        if records.is_empty() {
            tracing::debug!(section = %section.id, "section yielded no tables");
            outcome.skipped.push(SkippedSection {
                section_id: section.id.clone(),
                reason: "no table with header and data rows".into(),
            });
        } else {
            outcome.records.extend(records);
        }
    }

    outcome
}

/// Running state threaded through one section's element sequence.
#[derive(Default)]
struct Scan {
    period: Option<String>,
    records: Vec<SectionRecord>,
}

fn normalize_section(section: &Section, warnings: &mut Vec<StructureWarning>) -> Vec<SectionRecord> {
    let title = match section.nodes.first() {
        Some(SectionNode::Paragraph(intro)) => classify::classify_section_title(intro),
        _ => String::new(),
    };

    let scan = section.nodes.iter().fold(Scan::default(), |mut scan, node| {
        match node {
            SectionNode::Paragraph(text) => {
                if let Some(period) = classify::period_label(text) {
                    scan.period = Some(period);
                }
            }
            SectionNode::Table(table) => {
                if let Some(mut record) = normalize_table(&section.id, &title, table, warnings) {
                    // The table consumes and clears the pending period label.
                    record.period = scan
                        .period
                        .take()
                        .unwrap_or_else(|| ABSENT_PERIOD.to_string());
                    scan.records.push(record);
                }
            }
        }
        scan
    });

    if pivot::is_pivot_section(&section.id, &title) {
        pivot::pivot_records(scan.records)
    } else {
        scan.records
    }
}

fn normalize_table(
    section_id: &str,
    title: &str,
    table: &RawTable,
    warnings: &mut Vec<StructureWarning>,
) -> Option<SectionRecord> {
    let shape = classify::split_rows(table);
    if shape.header_rows.is_empty() || shape.data_rows.is_empty() {
        return None;
    }

    let (header, mismatch) = header::build_flat_header(&shape.header_rows);
    if let Some(m) = mismatch {
        warnings.push(StructureWarning {
            section_id: section_id.to_string(),
            message: format!(
                "second header row has {} cell(s) for {} expanded column(s); merged best-effort",
                m.actual, m.expected
            ),
        });
    }

    // The standalone unit row wins; otherwise a `(단위:…)` annotation may
    // survive in the raw header text.
    let unit = shape
        .unit
        .or_else(|| header.raw.iter().find_map(|h| classify::extract_unit(h)))
        .unwrap_or_default();

    Some(SectionRecord {
        section_id: section_id.to_string(),
        section_title: title.to_string(),
        period: ABSENT_PERIOD.to_string(),
        unit,
        header,
        rows: shape.data_rows,
    })
}
