// src/workbook/xlsx.rs

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};
use tracing::debug;

use super::{SeedWorkbook, SheetRows};
use crate::error::{Result, SeedError};

/// A spreadsheet on disk (xlsx, xlsm, xlsb, xls or ods), opened read-only.
pub struct XlsxWorkbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
    names: Vec<String>,
}

impl XlsxWorkbook {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SeedError::MissingWorkbook(path.to_path_buf()));
        }
        let sheets = open_workbook_auto(path).map_err(|e| SeedError::OpenWorkbook {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let names = sheets.sheet_names();
        debug!(path = %path.display(), sheets = names.len(), "opened workbook");
        Ok(Self {
            path: path.to_path_buf(),
            sheets,
            names,
        })
    }
}

impl SeedWorkbook for XlsxWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn sheet_rows(&mut self, sheet: &str) -> Result<SheetRows> {
        let range = self
            .sheets
            .worksheet_range(sheet)
            .map_err(|e| SeedError::OpenWorkbook {
                path: self.path.clone(),
                reason: format!("sheet `{}`: {}", sheet, e),
            })?;

        // calamine trims leading empty rows and columns; pad them back so
        // row and column indexes match what a user sees in the sheet.
        let (top, left) = range
            .start()
            .map(|(row, col)| (row as usize, col as usize))
            .unwrap_or((0, 0));
        let mut rows: SheetRows = vec![Vec::new(); top];
        rows.extend(range.rows().map(|row| {
            let mut cells = vec![String::new(); left];
            cells.extend(row.iter().map(cell_to_string));
            cells
        }));
        Ok(rows)
    }
}

/// Coerce one cell to text without inventing content.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() <= 9_007_199_254_740_992.0 {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTime(serial) => excel_serial_to_iso(serial.as_f64())
            .unwrap_or_else(|| serial.as_f64().to_string()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERROR:{:?}", e),
    }
}

/// 1900-system serial to `YYYY-MM-DDTHH:MM:SS`.
///
/// Serial 60 is Excel's phantom 1900-02-29 and has no real date; it yields
/// `None` so the caller keeps the raw serial.
fn excel_serial_to_iso(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let total_secs = (serial * 86_400.0).round() as u64;
    let (days, secs) = (total_secs / 86_400, (total_secs % 86_400) as u32);

    // serials 1..=59 count from 1899-12-31; from 61 on the phantom day
    // shifts the base back to 1899-12-30
    let date = match days {
        0..=59 => NaiveDate::from_ymd_opt(1899, 12, 31)?.checked_add_days(Days::new(days))?,
        60 => return None,
        _ => NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_days(Days::new(days))?,
    };
    let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, 0)?;
    Some(
        NaiveDateTime::new(date, time)
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string(),
    )
}
