// src/seed/collect.rs

use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::error::{Result, SeedError};
use crate::roles::RoleLabels;
use crate::seed::locate::locate_header_row;
use crate::seed::record::RowRecord;
use crate::workbook::SeedWorkbook;

/// Identity columns every qualifying sheet must carry and every accepted row
/// must fill.
pub const REQUIRED_COLUMNS: [&str; 3] = ["label", "type", "source_id"];

/// Column whose value is matched against the role's labels.
pub const LABEL_COLUMN: &str = "label";

/// Why a sheet contributed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    Unreadable { detail: String },
    NoHeaderRow,
    MissingColumns { missing: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSheet {
    pub sheet: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Everything gathered from one pass over the workbook.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Accepted rows in sheet order, then row order.
    pub rows: Vec<RowRecord>,
    /// Headers of qualifying sheets in first-seen order.
    pub union_headers: Vec<String>,
    pub sheets_scanned: usize,
    pub sheets_qualified: usize,
    pub skipped: Vec<SkippedSheet>,
    pub rows_missing_identity: usize,
    pub rows_label_mismatch: usize,
}

impl Collection {
    fn skip(&mut self, sheet: &str, reason: SkipReason) {
        warn!(sheet, reason = ?reason, "skipping sheet");
        self.skipped.push(SkippedSheet {
            sheet: sheet.to_string(),
            reason,
        });
    }

    fn sheets_with_header(&self) -> usize {
        self.sheets_scanned
            - self
                .skipped
                .iter()
                .filter(|s| !matches!(s.reason, SkipReason::MissingColumns { .. }))
                .count()
    }
}

/// Scan every sheet of `workbook` in order and keep the rows whose label is
/// one of `labels`.
///
/// Sheets without a header row or without the [`REQUIRED_COLUMNS`] are
/// skipped and recorded. The pass fails when no sheet has a header row, when
/// no sheet qualifies, or when nothing matched.
#[tracing::instrument(level = "info", skip_all, fields(role = %role))]
pub fn collect_rows<W: SeedWorkbook>(
    workbook: &mut W,
    role: &str,
    labels: &RoleLabels,
) -> Result<Collection> {
    let mut out = Collection::default();
    let mut union_seen: HashSet<String> = HashSet::new();

    for sheet in workbook.sheet_names() {
        out.sheets_scanned += 1;

        let rows = match workbook.sheet_rows(&sheet) {
            Ok(rows) => rows,
            Err(e) => {
                out.skip(&sheet, SkipReason::Unreadable {
                    detail: e.to_string(),
                });
                continue;
            }
        };

        let header = match locate_header_row(&sheet, &rows) {
            Ok(h) => h,
            Err(e) => {
                debug!(error = %e, "no header row");
                out.skip(&sheet, SkipReason::NoHeaderRow);
                continue;
            }
        };

        let present: HashSet<&str> = header.named().collect();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !present.contains(*c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            out.skip(&sheet, SkipReason::MissingColumns { missing });
            continue;
        }

        out.sheets_qualified += 1;
        for name in header.named() {
            if union_seen.insert(name.to_string()) {
                out.union_headers.push(name.to_string());
            }
        }

        let (mut accepted, mut no_identity, mut mismatch) = (0usize, 0usize, 0usize);
        for cells in rows.iter().skip(header.index + 1) {
            let record = RowRecord::materialize(&header.headers, cells);
            if REQUIRED_COLUMNS.iter().any(|c| record.get(c).is_empty()) {
                no_identity += 1;
                continue;
            }
            if !labels.contains(record.get(LABEL_COLUMN)) {
                mismatch += 1;
                continue;
            }
            accepted += 1;
            out.rows.push(record);
        }

        debug!(
            sheet = %sheet,
            header_row = header.index,
            accepted,
            missing_identity = no_identity,
            label_mismatch = mismatch,
            "sheet collected"
        );
        out.rows_missing_identity += no_identity;
        out.rows_label_mismatch += mismatch;
    }

    info!(
        sheets = out.sheets_scanned,
        qualified = out.sheets_qualified,
        skipped = out.skipped.len(),
        rows = out.rows.len(),
        "collection finished"
    );

    if out.sheets_with_header() == 0 {
        return Err(SeedError::NoHeaderedSheets {
            sheets: out.sheets_scanned,
        });
    }
    if out.sheets_qualified == 0 {
        return Err(SeedError::NoQualifyingSheets {
            required: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        });
    }
    if out.rows.is_empty() {
        return Err(SeedError::NoMatchingRows {
            role: role.to_string(),
            labels: labels.as_slice().to_vec(),
        });
    }

    Ok(out)
}
