use crate::model::{FlatHeader, SectionRecord, PIVOT_PERIOD};

/// Titles of the section-(7) disclosures that are published as vertical
/// category/value tables and must be transposed.
const PIVOT_TITLE_KEYS: [&str; 2] = ["비지배지분과의 거래", "자본에 미치는 영향"];

/// Only the 7th sub-section, and only under the two known titles, pivots.
pub fn is_pivot_section(section_id: &str, title: &str) -> bool {
    let digits: String = section_id.chars().filter(|c| c.is_ascii_digit()).collect();
    digits == "7" && PIVOT_TITLE_KEYS.iter().any(|key| title.contains(key))
}

/// Transpose a section's category/value tables into a single record: each
/// row's first cell becomes a header label, its second cell the value, and
/// the period is forced to the current half-year literal.
pub fn pivot_records(records: Vec<SectionRecord>) -> Vec<SectionRecord> {
    let mut labels = Vec::new();
    let mut values = Vec::new();
    for record in &records {
        for row in &record.rows {
            if row.len() >= 2 {
                labels.push(row[0].clone());
                values.push(row[1].clone());
            }
        }
    }

    if labels.is_empty() {
        return records;
    }
    let Some(base) = records.first() else {
        return records;
    };

    vec![SectionRecord {
        section_id: base.section_id.clone(),
        section_title: base.section_title.clone(),
        period: PIVOT_PERIOD.to_string(),
        unit: base.unit.clone(),
        header: FlatHeader {
            cleaned: labels.clone(),
            raw: labels,
        },
        rows: vec![values],
    }]
}
