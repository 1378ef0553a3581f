pub mod collect;
pub mod locate;
pub mod normalize;
pub mod record;
pub mod schema;
pub mod sort;
pub mod write;

pub use collect::{collect_rows, Collection, SkipReason, SkippedSheet, REQUIRED_COLUMNS};
pub use locate::{locate_header_row, HeaderRow, MIN_HEADER_CELLS};
pub use normalize::normalize_header;
pub use record::RowRecord;
pub use schema::{assemble_schema, OutputSchema, PREFERRED_COLUMNS};
pub use sort::{sort_rows, SORT_FIELDS};
pub use write::write_seed_csv;
