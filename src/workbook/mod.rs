// src/workbook/mod.rs

pub mod xlsx;

pub use xlsx::XlsxWorkbook;

use crate::error::Result;

/// Rows of one sheet with every cell coerced to text; empty cells are `""`.
pub type SheetRows = Vec<Vec<String>>;

/// Read-only access to a multi-sheet workbook.
pub trait SeedWorkbook {
    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// All rows of `sheet`.
    fn sheet_rows(&mut self, sheet: &str) -> Result<SheetRows>;
}

/// A workbook held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<(String, SheetRows)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet built from string-like cells.
    pub fn with_sheet<R, C>(mut self, name: &str, rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        self.sheets.push((name.to_string(), rows));
        self
    }
}

impl SeedWorkbook for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn sheet_rows(&mut self, sheet: &str) -> Result<SheetRows> {
        Ok(self
            .sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }
}
