use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::DartError;
use crate::model::{Cell, RawTable, HEADER_SHADE};

/// Paragraphs that open the company-overview note.
const OVERVIEW_HEADINGS: [&str; 2] = ["1. 지배기업의 개요", "1. 회사의 개요"];

static P_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
static TR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static CELL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td, th").unwrap());

/// Sub-section label at the start of a paragraph: `(1)` .. `(7)`.
static SECTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\(([1-7])\)").unwrap());

/// A numbered note heading (`2. 중요한 회계정책` etc.) ends the walk.
static MAJOR_NOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.").unwrap());

/// `(단위:원)` style annotations stripped from display text.
static UNIT_STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(단위\s*:[^)]*\)_?").unwrap());

/// One element of a sub-section, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionNode {
    /// Collapsed, entity-decoded paragraph text.
    Paragraph(String),
    Table(RawTable),
}

/// One labeled sub-section: its `(n)` id and the elements belonging to it.
/// The introductory paragraph is always the first node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub nodes: Vec<SectionNode>,
}

/// Ordered sub-sections of the company-overview note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    pub sections: Vec<Section>,
}

/// Locate the `(1)`..`(7)` sub-sections of the company-overview note.
///
/// Finds the overview heading paragraph, then walks its following siblings
/// until the next numbered note heading, splitting the walked range at
/// `(n)` paragraphs. Returns owned data; nothing borrows from the DOM.
pub fn locate_sections(html: &str) -> Result<SectionMap, DartError> {
    let doc = Html::parse_document(html);

    let body_text: String = doc.root_element().text().collect();
    if collapse_ws(&body_text).is_empty() {
        return Err(DartError::MalformedDocument(
            "document has no text content".into(),
        ));
    }

    let overview = doc
        .select(&P_SELECTOR)
        .find(|p| {
            let text = collapse_ws(&p.text().collect::<String>());
            OVERVIEW_HEADINGS.contains(&text.as_str())
        })
        .ok_or(DartError::OverviewNotFound)?;

    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<Section> = None;

    for node in overview.next_siblings() {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };

        match el.value().name() {
            "p" => {
                let text = collapse_ws(&el.text().collect::<String>());

                // Next numbered note ends the overview.
                if MAJOR_NOTE_RE.is_match(&text) {
                    break;
                }

                if let Some(caps) = SECTION_RE.captures(&text) {
                    if let Some(done) = current.take() {
                        sections.push(done);
                    }
                    current = Some(Section {
                        id: format!("({})", &caps[1]),
                        nodes: vec![SectionNode::Paragraph(text)],
                    });
                } else if let Some(section) = current.as_mut() {
                    section.nodes.push(SectionNode::Paragraph(text));
                }
            }
            "table" => {
                if let Some(section) = current.as_mut() {
                    section.nodes.push(SectionNode::Table(parse_table(el)));
                }
            }
            _ => {}
        }
    }

    if let Some(done) = current.take() {
        sections.push(done);
    }

    tracing::debug!(sections = sections.len(), "located overview sub-sections");
    Ok(SectionMap { sections })
}

fn parse_table(table: ElementRef<'_>) -> RawTable {
    let mut rows = Vec::new();
    for tr in table.select(&TR_SELECTOR) {
        let cells: Vec<Cell> = tr.select(&CELL_SELECTOR).map(parse_cell).collect();
        if !cells.is_empty() {
            rows.push(cells);
        }
    }
    RawTable { rows }
}

fn parse_cell(el: ElementRef<'_>) -> Cell {
    let raw_text = el.text().collect::<String>().trim().to_string();
    let display_text = clean_display_text(&raw_text);

    Cell {
        display_text,
        raw_text,
        col_span: span_attr(el, "colspan"),
        row_span: span_attr(el, "rowspan"),
        is_header_styled: is_header_styled(el),
    }
}

/// Collapse whitespace and strip `(단위:…)` annotations.
fn clean_display_text(raw: &str) -> String {
    let collapsed = collapse_ws(raw);
    collapse_ws(&UNIT_STRIP_RE.replace_all(&collapsed, ""))
}

fn span_attr(el: ElementRef<'_>, name: &str) -> usize {
    el.value()
        .attr(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}

/// Header cells are either `<th>` or carry the DART header shading.
fn is_header_styled(el: ElementRef<'_>) -> bool {
    if el.value().name() == "th" {
        return true;
    }
    el.value()
        .attr("style")
        .map(|style| {
            style
                .to_ascii_lowercase()
                .split_whitespace()
                .collect::<String>()
                .contains(&format!("background-color:{HEADER_SHADE}"))
        })
        .unwrap_or(false)
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
    <html><body>
      <p>주석</p>
      <p>1. 지배기업의 개요</p>
      <p>지배기업인 주식회사는 ...</p>
      <p>(1) 종속기업의 현황은 다음과 같습니다.</p>
      <p>&lt;당반기&gt;</p>
      <table>
        <tr>
          <td style="background-color:#D7D7D7" colspan="2">소유지분율</td>
          <td style="background-color:#D7D7D7">업종</td>
        </tr>
        <tr><td>당반기말</td><td>전기말</td><td>제조</td></tr>
      </table>
      <p>(2) 연결대상 종속기업의 요약재무상태는 다음과 같습니다.</p>
      <table><tr><th>구분</th></tr><tr><td>자산</td></tr></table>
      <p>2. 중요한 회계정책</p>
      <p>(3) 이 문단은 주석 범위 밖입니다.</p>
    </body></html>"#;

    #[test]
    fn test_locates_sections_until_next_note() {
        let map = locate_sections(DOC).unwrap();
        assert_eq!(map.sections.len(), 2);
        assert_eq!(map.sections[0].id, "(1)");
        assert_eq!(map.sections[1].id, "(2)");
    }

    #[test]
    fn test_intro_paragraph_is_first_node() {
        let map = locate_sections(DOC).unwrap();
        match &map.sections[0].nodes[0] {
            SectionNode::Paragraph(text) => {
                assert!(text.starts_with("(1) 종속기업의 현황"))
            }
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_period_paragraph_is_entity_decoded() {
        let map = locate_sections(DOC).unwrap();
        assert!(map.sections[0]
            .nodes
            .iter()
            .any(|n| matches!(n, SectionNode::Paragraph(t) if t == "<당반기>")));
    }

    #[test]
    fn test_table_cells_carry_spans_and_shading() {
        let map = locate_sections(DOC).unwrap();
        let table = map.sections[0]
            .nodes
            .iter()
            .find_map(|n| match n {
                SectionNode::Table(t) => Some(t),
                _ => None,
            })
            .unwrap();
        assert_eq!(table.rows.len(), 2);
        let first = &table.rows[0][0];
        assert_eq!(first.display_text, "소유지분율");
        assert_eq!(first.col_span, 2);
        assert!(first.is_header_styled);
        assert!(!table.rows[1][0].is_header_styled);
    }

    #[test]
    fn test_th_counts_as_header_styled() {
        let map = locate_sections(DOC).unwrap();
        let table = map.sections[1]
            .nodes
            .iter()
            .find_map(|n| match n {
                SectionNode::Table(t) => Some(t),
                _ => None,
            })
            .unwrap();
        assert!(table.rows[0][0].is_header_styled);
    }

    #[test]
    fn test_unit_annotation_stripped_from_display() {
        let cellish = clean_display_text("구분 (단위:백만원)");
        assert_eq!(cellish, "구분");
    }

    #[test]
    fn test_missing_overview_heading() {
        let html = "<html><body><p>재무제표 주석</p></body></html>";
        assert!(matches!(
            locate_sections(html),
            Err(DartError::OverviewNotFound)
        ));
    }

    #[test]
    fn test_empty_document_is_malformed() {
        assert!(matches!(
            locate_sections(""),
            Err(DartError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_alternate_overview_heading() {
        let html = r#"<p>1. 회사의 개요</p><p>(1) 현황입니다.</p><table><tr><td>x</td><td>y</td></tr></table>"#;
        let map = locate_sections(html).unwrap();
        assert_eq!(map.sections.len(), 1);
    }
}
