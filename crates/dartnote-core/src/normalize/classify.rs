use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Cell, RawTable};

/// Standalone unit declaration: `(단위:원)`, `(단위: 백만원)` etc.
static UNIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(단위\s*:\s*([^)]+)\)").unwrap());

/// Period marker inside a paragraph: `<당반기>`, `<전기>` etc.
static PERIOD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<([^<>]+)>").unwrap());

/// `(n)` prefix of a sub-section's introductory paragraph.
static INTRO_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\([1-7]\)\s*").unwrap());

/// Known filing phrasings mapped to fixed section titles, first match wins.
/// This is a closed vocabulary, not text summarization.
const TITLE_RULES: [(&str, &str); 4] = [
    ("현황", "종속기업의 현황"),
    ("재무상태", "연결대상 종속기업의 요약재무상태"),
    ("경영성과", "연결대상 종속기업의 요약경영성과"),
    ("현금흐름", "연결대상 종속기업의 요약현금흐름"),
];

/// A table's rows split into unit / header / data.
#[derive(Debug, Clone, Default)]
pub struct TableShape<'a> {
    pub unit: Option<String>,
    pub header_rows: Vec<&'a [Cell]>,
    pub data_rows: Vec<Vec<String>>,
}

/// Classify a table's rows.
///
/// Header rows are accepted only until the first data row; after that,
/// every row is data even if it carries header shading. A lone spanning
/// cell matching the unit pattern is consumed and belongs to neither set.
pub fn split_rows(table: &RawTable) -> TableShape<'_> {
    let mut shape = TableShape::default();
    let mut data_started = false;

    for row in &table.rows {
        if row.is_empty() {
            continue;
        }

        if row.len() == 1 && row[0].col_span > 1 {
            if let Some(unit) = extract_unit(&row[0].raw_text) {
                shape.unit = Some(unit);
                continue;
            }
        }

        let is_header = row.iter().any(|c| c.is_header_styled);
        if is_header && !data_started {
            shape.header_rows.push(row.as_slice());
        } else {
            data_started = true;
            let values: Vec<String> = row.iter().map(|c| c.display_text.clone()).collect();
            if values.len() > 1 {
                shape.data_rows.push(values);
            }
        }
    }

    shape
}

/// Pull the unit out of a `(단위:X)` annotation.
pub fn extract_unit(text: &str) -> Option<String> {
    UNIT_RE
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

/// Period label from an angle-bracket marker, if the paragraph has one.
pub fn period_label(text: &str) -> Option<String> {
    PERIOD_RE.captures(text).map(|caps| caps[1].to_string())
}

/// Derive the section title from the introductory paragraph.
///
/// The fixed keyword table is tried first; otherwise the text is truncated
/// at a sentence terminator inside its first 50 characters, else kept whole.
pub fn classify_section_title(intro: &str) -> String {
    let full = INTRO_PREFIX_RE.replace(intro.trim(), "").trim().to_string();
    if full.is_empty() {
        return full;
    }

    for (needle, label) in TITLE_RULES {
        if full.contains(needle) {
            return label.to_string();
        }
    }

    let head: String = full.chars().take(50).collect();
    for terminator in ['.', ','] {
        if head.contains(terminator) {
            return full
                .split(terminator)
                .next()
                .unwrap_or(&full)
                .trim()
                .to_string();
        }
    }
    full
}
