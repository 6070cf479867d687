use crate::model::{Cell, FlatHeader};

/// Second header row does not cover the expanded width of the first row's
/// spanning cells. Merging proceeded best-effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMismatch {
    pub expected: usize,
    pub actual: usize,
}

/// Build the span-resolved flat header from one or two stacked header rows.
///
/// The first row's colspan sum fixes the logical column count. A spanning
/// cell writes its text into every covered slot; when a second row exists,
/// those slots are overwritten with `first_second` merges, pairing second-row
/// cells left to right. Width-1 first-row cells are self-describing and are
/// never merged.
pub fn build_flat_header(header_rows: &[&[Cell]]) -> (FlatHeader, Option<HeaderMismatch>) {
    let Some(first) = header_rows.first() else {
        return (FlatHeader::default(), None);
    };

    let total: usize = first.iter().map(|c| c.col_span).sum();
    let mut cleaned = vec![String::new(); total];
    let mut raw = vec![String::new(); total];

    let mut col = 0usize;
    for cell in *first {
        for i in 0..cell.col_span {
            if col + i < total {
                cleaned[col + i] = cell.display_text.clone();
                raw[col + i] = cell.raw_text.clone();
            }
        }
        col += cell.col_span;
    }

    let mut mismatch = None;
    if let Some(second) = header_rows.get(1) {
        let expanded: usize = first
            .iter()
            .filter(|c| c.col_span > 1)
            .map(|c| c.col_span)
            .sum();
        if expanded != second.len() {
            mismatch = Some(HeaderMismatch {
                expected: expanded,
                actual: second.len(),
            });
        }

        let mut second_idx = 0usize;
        let mut base = 0usize;
        for cell in *first {
            if cell.col_span > 1 {
                for i in 0..cell.col_span {
                    if let Some(sub) = second.get(second_idx) {
                        let pos = base + i;
                        if pos < total {
                            cleaned[pos] = format!("{}_{}", cell.display_text, sub.display_text);
                            raw[pos] = format!("{}_{}", cell.raw_text, sub.raw_text);
                        }
                        second_idx += 1;
                    }
                }
            }
            base += cell.col_span;
        }
    }

    (FlatHeader { cleaned, raw }, mismatch)
}
