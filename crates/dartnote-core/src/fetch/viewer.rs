use std::sync::LazyLock;

use regex::Regex;

/// Sub-document title searched for in the viewer tree.
pub const NOTES_TITLE: &str = "연결재무제표 주석";

/// Titles assigned to the viewer's navigation tree nodes.
static NODE_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"node\d+\['text'\]\s*=\s*"([^"]*)""#).unwrap());

/// `viewDoc('rcpNo', 'dcmNo', 'eleId', 'offset', 'length', 'dtd')` calls,
/// one per tree node, in the same order as the titles.
static VIEW_DOC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"viewDoc\('([^']*)',\s*'([^']*)',\s*'([^']*)',\s*'([^']*)',\s*'([^']*)',\s*'([^']*)'\)")
        .unwrap()
});

/// One entry of a filing's sub-document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubDocument {
    pub title: String,
    pub url: String,
}

/// Pair the viewer page's tree-node titles with their `viewDoc` argument
/// tuples and build direct viewer URLs. Unpaired leftovers on either side
/// are dropped.
pub fn parse_sub_documents(page: &str) -> Vec<SubDocument> {
    let titles = NODE_TEXT_RE
        .captures_iter(page)
        .map(|caps| caps[1].trim().to_string());

    let urls = VIEW_DOC_RE.captures_iter(page).map(|caps| {
        format!(
            "https://dart.fss.or.kr/report/viewer.do?rcpNo={}&dcmNo={}&eleId={}&offset={}&length={}&dtd={}",
            &caps[1], &caps[2], &caps[3], &caps[4], &caps[5], &caps[6]
        )
    });

    titles
        .zip(urls)
        .map(|(title, url)| SubDocument { title, url })
        .collect()
}

/// Find the consolidated-notes entry, if the filing has one.
pub fn find_notes_document(documents: &[SubDocument]) -> Option<&SubDocument> {
    documents.iter().find(|d| d.title.contains(NOTES_TITLE))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWER_PAGE: &str = r#"
        var node1 = {};
        node1['text'] = " 반기보고서";
        node1['id'] = "1";
        node1['click'] = function() { viewDoc('20250814001234', '10561234', '1', '100', '2000', 'dart4.xsd'); };
        var node2 = {};
        node2['text'] = " 2. 연결재무제표 주석";
        node2['click'] = function() { viewDoc('20250814001234', '10561234', '19', '5000', '90000', 'dart4.xsd'); };
        var node3 = {};
        node3['text'] = " 3. 재무제표 주석";
        node3['click'] = function() { viewDoc('20250814001234', '10561234', '23', '98000', '80000', 'dart4.xsd'); };
    "#;

    #[test]
    fn test_titles_paired_with_view_doc_calls() {
        let docs = parse_sub_documents(VIEWER_PAGE);
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].title, "반기보고서");
        assert!(docs[1].url.contains("eleId=19"));
        assert!(docs[1].url.contains("rcpNo=20250814001234"));
    }

    #[test]
    fn test_notes_document_selected_by_title() {
        let docs = parse_sub_documents(VIEWER_PAGE);
        let notes = find_notes_document(&docs).unwrap();
        assert_eq!(notes.title, "2. 연결재무제표 주석");
        assert!(notes.url.contains("offset=5000"));
    }

    #[test]
    fn test_separate_notes_title_not_confused() {
        // "재무제표 주석" alone must not be picked over the consolidated one.
        let docs = parse_sub_documents(VIEWER_PAGE);
        let notes = find_notes_document(&docs).unwrap();
        assert_ne!(notes.title, "3. 재무제표 주석");
    }

    #[test]
    fn test_empty_page() {
        assert!(parse_sub_documents("<html></html>").is_empty());
    }
}
