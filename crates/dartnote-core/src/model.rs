use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DartError;

/// Period value recorded when a table has no preceding `<...>` label.
pub const ABSENT_PERIOD: &str = "없음";

/// Period forced onto the pivoted section-(7) table.
pub const PIVOT_PERIOD: &str = "당반기";

/// Fixed leading columns prefixed to every emitted row.
pub const METADATA_COLUMNS: [&str; 7] = [
    "회사명",
    "년도",
    "보고서구분",
    "항목번호",
    "항목제목",
    "기간구분",
    "단위",
];

/// Background color DART uses for header cells.
pub const HEADER_SHADE: &str = "#d7d7d7";

/// One table cell as it appears in the filing markup.
///
/// Spans are descriptive metadata from the `colspan`/`rowspan` attributes;
/// cells are never expanded into grid positions here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Whitespace-collapsed text with `(단위:…)` substrings stripped.
    pub display_text: String,
    /// Entity-decoded, trimmed text. Kept for unit extraction.
    pub raw_text: String,
    pub col_span: usize,
    pub row_span: usize,
    pub is_header_styled: bool,
}

/// One `<table>` inside a sub-section, in markup order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTable {
    pub rows: Vec<Vec<Cell>>,
}

/// Span-resolved single-row header, index-aligned with data rows.
///
/// `cleaned` is what gets emitted; `raw` keeps the uncleaned text so a
/// `(단위:…)` annotation living inside a header cell can still be found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatHeader {
    pub cleaned: Vec<String>,
    pub raw: Vec<String>,
}

impl FlatHeader {
    pub fn len(&self) -> usize {
        self.cleaned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cleaned.is_empty()
    }
}

/// One normalized table: section identity, unit, period, flat header and the
/// data rows interpreted against that header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Sub-section label as it appears in the filing, e.g. `(1)`.
    pub section_id: String,
    pub section_title: String,
    pub period: String,
    pub unit: String,
    pub header: FlatHeader,
    pub rows: Vec<Vec<String>>,
}

impl SectionRecord {
    /// Section label with brackets stripped: `(1)` -> `1`.
    pub fn item_number(&self) -> String {
        self.section_id
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect()
    }
}

/// DART periodic report kinds and their API codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Annual,
    HalfYear,
    Quarterly,
    FirstQuarter,
    ThirdQuarter,
}

impl ReportKind {
    /// DART `pblntf_detail_ty` report code.
    pub fn code(&self) -> &'static str {
        match self {
            ReportKind::Annual => "11011",
            ReportKind::HalfYear => "11014",
            ReportKind::Quarterly => "11013",
            ReportKind::FirstQuarter => "11012",
            ReportKind::ThirdQuarter => "11015",
        }
    }

    /// Korean report label as it appears in filing titles.
    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Annual => "사업보고서",
            ReportKind::HalfYear => "반기보고서",
            ReportKind::Quarterly => "분기보고서",
            ReportKind::FirstQuarter => "1분기보고서",
            ReportKind::ThirdQuarter => "3분기보고서",
        }
    }

    /// Parse a user-supplied report kind: the Korean label, the API code,
    /// or an English alias.
    pub fn from_str_loose(s: &str) -> Result<ReportKind, DartError> {
        let trimmed = s.trim();
        // Order matters: 1분기/3분기 contain 분기, so check them first.
        if trimmed.contains("1분기") || trimmed.eq_ignore_ascii_case("q1") || trimmed == "11012" {
            return Ok(ReportKind::FirstQuarter);
        }
        if trimmed.contains("3분기") || trimmed.eq_ignore_ascii_case("q3") || trimmed == "11015" {
            return Ok(ReportKind::ThirdQuarter);
        }
        if trimmed.contains("반기") || trimmed.eq_ignore_ascii_case("half") || trimmed == "11014" {
            return Ok(ReportKind::HalfYear);
        }
        if trimmed.contains("분기")
            || trimmed.eq_ignore_ascii_case("quarterly")
            || trimmed == "11013"
        {
            return Ok(ReportKind::Quarterly);
        }
        if trimmed.contains("사업") || trimmed.eq_ignore_ascii_case("annual") || trimmed == "11011"
        {
            return Ok(ReportKind::Annual);
        }
        Err(DartError::UnknownReportKind(trimmed.to_string()))
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Identity of the filing an extraction belongs to. Validated at
/// construction, carried verbatim into the emitted metadata columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingMeta {
    pub company: String,
    pub year: String,
    pub report: ReportKind,
}

impl FilingMeta {
    pub fn new(company: &str, year: &str, report: ReportKind) -> Result<FilingMeta, DartError> {
        let company = company.trim();
        if company.is_empty() {
            return Err(DartError::ConfigInvalid("company name is empty".into()));
        }
        let year = year.trim();
        if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
            return Err(DartError::ConfigInvalid(format!(
                "year '{year}' is not a 4-digit year"
            )));
        }
        Ok(FilingMeta {
            company: company.to_string(),
            year: year.to_string(),
            report,
        })
    }

    /// File name the fetched notes document is saved under.
    pub fn notes_filename(&self) -> String {
        format!(
            "{}_{}_{}_연결재무제표주석.html",
            self.company,
            self.year,
            self.report.label()
        )
    }

    /// File name of the extracted table data.
    pub fn csv_filename(&self) -> String {
        format!(
            "{}_{}_{}_표데이터.csv",
            self.company,
            self.year,
            self.report.label()
        )
    }
}
