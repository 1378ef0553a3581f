// src/seed/sort.rs

use crate::seed::record::RowRecord;

/// Fields compared, in order, to place a row in the output.
pub const SORT_FIELDS: [&str; 4] = ["label", "type", "source_id", "name"];

fn sort_key(record: &RowRecord) -> [String; 4] {
    SORT_FIELDS.map(|field| record.get(field).to_lowercase())
}

/// Order rows by [`SORT_FIELDS`], case-insensitively. Rows with equal keys
/// keep their collection order.
pub fn sort_rows(rows: Vec<RowRecord>) -> Vec<RowRecord> {
    let mut keyed: Vec<([String; 4], RowRecord)> =
        rows.into_iter().map(|r| (sort_key(&r), r)).collect();
    // `sort_by` is stable
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, r)| r).collect()
}
