// src/seed/record.rs

use std::collections::BTreeMap;

/// One accepted spreadsheet row, keyed by normalized header.
///
/// Values are trimmed cell text. Headers the row never had read back as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowRecord {
    fields: BTreeMap<String, String>,
}

impl RowRecord {
    /// Map `cells` onto `headers` by position.
    ///
    /// Cells past the end of `headers` are dropped and missing cells become
    /// `""`. When two positions share a header the first non-empty value is
    /// kept.
    pub fn materialize(headers: &[String], cells: &[String]) -> Self {
        let mut fields: BTreeMap<String, String> = BTreeMap::new();
        for (idx, header) in headers.iter().enumerate() {
            let value = cells.get(idx).map(|c| c.trim()).unwrap_or("");
            let slot = fields.entry(header.clone()).or_default();
            if slot.is_empty() {
                *slot = value.to_string();
            }
        }
        Self { fields }
    }

    pub fn get(&self, header: &str) -> &str {
        self.fields.get(header).map(String::as_str).unwrap_or("")
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RowRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
