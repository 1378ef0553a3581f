// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Every fail-closed condition of a materialization run.
///
/// The `Display` text is what the CLI prints before exiting non-zero, so each
/// message names the offending path, sheet or role.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed workbook not found: {}", .0.display())]
    MissingWorkbook(PathBuf),

    #[error("failed to open seed workbook {}: {reason}", path.display())]
    OpenWorkbook { path: PathBuf, reason: String },

    /// Per-sheet structural failure. Collected as a skip, not raised.
    #[error("sheet `{sheet}` has no row with at least {min_cells} non-empty cells")]
    NoHeaderRow { sheet: String, min_cells: usize },

    #[error("none of the {sheets} sheet(s) in the workbook has a detectable header row")]
    NoHeaderedSheets { sheets: usize },

    #[error("no sheet carries the required columns [{}]", required.join(", "))]
    NoQualifyingSheets { required: Vec<String> },

    #[error("no rows match role `{role}` (labels: [{}])", labels.join(", "))]
    NoMatchingRows { role: String, labels: Vec<String> },

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error on {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("output verification failed for {}: {reason}", path.display())]
    Verify { path: PathBuf, reason: String },
}

impl SeedError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SeedError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        SeedError::Csv {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = SeedError> = std::result::Result<T, E>;
