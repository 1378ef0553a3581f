// src/seed/locate.rs

use crate::error::{Result, SeedError};
use crate::seed::normalize::normalize_header;

/// A row needs at least this many non-empty cells to be taken as the header
/// row. Column alignment of every data row hangs off this choice.
pub const MIN_HEADER_CELLS: usize = 3;

/// The header row of one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRow {
    /// Position of the header row within the sheet's rows.
    pub index: usize,
    /// Normalized headers, one per cell of the header row. Blank cells stay
    /// as `""` so positions line up with the data rows.
    pub headers: Vec<String>,
}

impl HeaderRow {
    /// Non-empty headers in column order, duplicates dropped.
    pub fn named(&self) -> impl Iterator<Item = &str> {
        let mut seen = std::collections::HashSet::new();
        self.headers
            .iter()
            .map(String::as_str)
            .filter(|h| !h.is_empty())
            .filter(move |h| seen.insert(*h))
    }
}

/// Find the first row of `rows` with at least [`MIN_HEADER_CELLS`] non-empty
/// cells and normalize it.
pub fn locate_header_row<R: AsRef<[String]>>(sheet: &str, rows: &[R]) -> Result<HeaderRow> {
    rows.iter()
        .position(|row| {
            row.as_ref()
                .iter()
                .filter(|cell| !cell.trim().is_empty())
                .count()
                >= MIN_HEADER_CELLS
        })
        .map(|index| HeaderRow {
            index,
            headers: rows[index]
                .as_ref()
                .iter()
                .map(|cell| normalize_header(cell))
                .collect(),
        })
        .ok_or_else(|| SeedError::NoHeaderRow {
            sheet: sheet.to_string(),
            min_cells: MIN_HEADER_CELLS,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn header_threshold_is_three_cells() {
        assert_eq!(MIN_HEADER_CELLS, 3);
    }

    #[test]
    fn skips_title_and_sparse_rows() {
        let rows = vec![
            row(&["Seed Hub: Labs", "", ""]),
            row(&[]),
            row(&["Label", "", "Type"]),
            row(&["Label", "Type", "Source ID", "Name"]),
            row(&["Alignment & Evals", "lab", "L-1", "Acme"]),
        ];
        let header = locate_header_row("Labs", &rows).unwrap();
        assert_eq!(header.index, 3);
        assert_eq!(header.headers, vec!["label", "type", "source_id", "name"]);
    }

    #[test]
    fn whitespace_cells_do_not_count() {
        let rows = vec![
            row(&["Label", "  ", "Type", "\n"]),
            row(&["Label", "Type", "Source ID"]),
        ];
        assert_eq!(locate_header_row("s", &rows).unwrap().index, 1);
    }

    #[test]
    fn blank_header_cells_keep_their_position() {
        let rows = vec![row(&["Label", "Type", "", "Source ID", "Name"])];
        let header = locate_header_row("s", &rows).unwrap();
        assert_eq!(header.headers, vec!["label", "type", "", "source_id", "name"]);
        assert_eq!(
            header.named().collect::<Vec<_>>(),
            vec!["label", "type", "source_id", "name"]
        );
    }

    #[test]
    fn sheet_without_header_is_rejected_by_name() {
        let rows = vec![row(&["only", "two"]), row(&["", "", "x"])];
        let err = locate_header_row("Scratch", &rows).unwrap_err();
        match err {
            SeedError::NoHeaderRow { sheet, min_cells } => {
                assert_eq!(sheet, "Scratch");
                assert_eq!(min_cells, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(locate_header_row::<Vec<String>>("Empty", &[]).is_err());
    }
}
