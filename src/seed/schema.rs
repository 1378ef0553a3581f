// src/seed/schema.rs

use serde::Serialize;
use std::collections::HashSet;

/// Generated per output row, never read from the workbook.
pub const ID_COLUMN: &str = "seed_id";
/// Echo of the role the file was built for.
pub const ROLE_COLUMN: &str = "role";

/// Leading output columns, always present and always in this order.
pub const PREFERRED_COLUMNS: [&str; 7] = [
    ID_COLUMN,
    ROLE_COLUMN,
    "label",
    "type",
    "source_id",
    "name",
    "url",
];

/// Final column order of an output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OutputSchema(Vec<String>);

impl OutputSchema {
    pub fn columns(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `prefix` (deduplicated, declared order) followed by every other header of
/// `union_headers`, sorted.
pub fn assemble_schema<S: AsRef<str>>(prefix: &[&str], union_headers: &[S]) -> OutputSchema {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut columns: Vec<String> = prefix
        .iter()
        .copied()
        .filter(|c| seen.insert(*c))
        .map(str::to_string)
        .collect();

    let mut rest: Vec<&str> = union_headers
        .iter()
        .map(|h| h.as_ref())
        .filter(|h| !h.is_empty() && seen.insert(*h))
        .collect();
    rest.sort_unstable();
    columns.extend(rest.into_iter().map(str::to_string));

    OutputSchema(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_first_then_sorted_remainder() {
        let union = ["url", "team", "label", "notes", "type", "source_id", "added_on"];
        let schema = assemble_schema(&PREFERRED_COLUMNS, &union);
        assert_eq!(
            schema.columns(),
            [
                "seed_id", "role", "label", "type", "source_id", "name", "url", "added_on",
                "notes", "team"
            ]
        );
    }

    #[test]
    fn prefix_columns_survive_without_data() {
        let schema = assemble_schema(&PREFERRED_COLUMNS, &Vec::<String>::new());
        assert_eq!(schema.len(), PREFERRED_COLUMNS.len());
        assert!(schema.columns().iter().any(|c| c == ID_COLUMN));
        assert!(schema.columns().iter().any(|c| c == ROLE_COLUMN));
    }

    #[test]
    fn duplicates_are_dropped() {
        let schema = assemble_schema(&["a", "b", "a"], &["c", "b", "c", ""]);
        assert_eq!(schema.columns(), ["a", "b", "c"]);
    }
}
