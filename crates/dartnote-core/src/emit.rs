use crate::model::{FilingMeta, SectionRecord, METADATA_COLUMNS};

/// Serialize normalized records into flat output rows.
///
/// Records are grouped by (item number, section title). A group whose tables
/// all share one flat header emits that header once, before the first
/// table's rows; otherwise every table emits its own header line. Data rows
/// are padded or truncated to the header width, and every row is prefixed
/// with the fixed metadata columns.
pub fn emit_rows(meta: &FilingMeta, records: &[SectionRecord]) -> Vec<Vec<String>> {
    let mut groups: Vec<((String, String), Vec<&SectionRecord>)> = Vec::new();
    for record in records {
        let key = (record.item_number(), record.section_title.clone());
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(record),
            None => groups.push((key, vec![record])),
        }
    }

    let mut out = Vec::new();
    for ((item_number, title), tables) in &groups {
        let headers_identical = tables
            .windows(2)
            .all(|pair| pair[0].header.cleaned == pair[1].header.cleaned);

        let mut header_written = false;
        for record in tables {
            let should_write_header = !headers_identical || !header_written;
            if should_write_header && !record.header.is_empty() {
                let mut row: Vec<String> =
                    METADATA_COLUMNS.iter().map(|c| c.to_string()).collect();
                row.extend(record.header.cleaned.iter().cloned());
                out.push(row);
                header_written = true;
            }

            for data in &record.rows {
                let width = record.header.len();
                let mut adjusted: Vec<String> = data.iter().take(width).cloned().collect();
                adjusted.resize(width, String::new());

                let mut row = vec![
                    meta.company.clone(),
                    meta.year.clone(),
                    meta.report.label().to_string(),
                    item_number.clone(),
                    title.clone(),
                    record.period.clone(),
                    record.unit.clone(),
                ];
                row.extend(adjusted);
                out.push(row);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FlatHeader, ReportKind, ABSENT_PERIOD};

    fn meta() -> FilingMeta {
        FilingMeta::new("한솔피엔에스", "2025", ReportKind::HalfYear).unwrap()
    }

    fn record(id: &str, title: &str, header: &[&str], rows: Vec<Vec<&str>>) -> SectionRecord {
        SectionRecord {
            section_id: id.into(),
            section_title: title.into(),
            period: ABSENT_PERIOD.into(),
            unit: "원".into(),
            header: FlatHeader {
                cleaned: header.iter().map(|s| s.to_string()).collect(),
                raw: header.iter().map(|s| s.to_string()).collect(),
            },
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        }
    }

    #[test]
    fn test_identical_headers_emitted_once() {
        let records = vec![
            record("(2)", "요약재무상태", &["구분", "자산"], vec![vec!["A사", "1"]]),
            record("(2)", "요약재무상태", &["구분", "자산"], vec![vec!["B사", "2"]]),
        ];
        let rows = emit_rows(&meta(), &records);

        let header_rows: Vec<_> = rows.iter().filter(|r| r[0] == "회사명").collect();
        assert_eq!(header_rows.len(), 1);
        assert_eq!(rows.len(), 3);
        // Header precedes the first table's data.
        assert_eq!(rows[0][0], "회사명");
        assert_eq!(rows[1][7], "A사");
    }

    #[test]
    fn test_differing_headers_emitted_per_table() {
        let records = vec![
            record("(2)", "요약재무상태", &["구분", "자산"], vec![vec!["A사", "1"]]),
            record("(2)", "요약재무상태", &["구분", "부채"], vec![vec!["B사", "2"]]),
        ];
        let rows = emit_rows(&meta(), &records);
        let header_rows: Vec<_> = rows.iter().filter(|r| r[0] == "회사명").collect();
        assert_eq!(header_rows.len(), 2);
    }

    #[test]
    fn test_rows_padded_and_truncated_to_header_width() {
        let records = vec![record(
            "(1)",
            "종속기업의 현황",
            &["회사", "지분율", "업종"],
            vec![vec!["A사", "60%"], vec!["B사", "40%", "제조", "잉여"]],
        )];
        let rows = emit_rows(&meta(), &records);

        // 7 metadata columns + 3 header columns.
        assert_eq!(rows[1].len(), 10);
        assert_eq!(rows[1][9], "");
        assert_eq!(rows[2].len(), 10);
        assert_eq!(rows[2][9], "제조");
    }

    #[test]
    fn test_metadata_prefix() {
        let records = vec![record(
            "(1)",
            "종속기업의 현황",
            &["회사"],
            vec![vec!["A사"]],
        )];
        let rows = emit_rows(&meta(), &records);
        let data = &rows[1];
        assert_eq!(
            &data[..7],
            &[
                "한솔피엔에스",
                "2025",
                "반기보고서",
                "1",
                "종속기업의 현황",
                ABSENT_PERIOD,
                "원"
            ]
        );
    }

    #[test]
    fn test_header_row_length_matches_data_rows() {
        let records = vec![record(
            "(3)",
            "요약경영성과",
            &["구분", "매출", "이익"],
            vec![vec!["A사", "10", "1"]],
        )];
        let rows = emit_rows(&meta(), &records);
        assert_eq!(rows[0].len(), rows[1].len());
    }
}
