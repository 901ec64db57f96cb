//! Table-level stages.
//!
//! Each stage takes the table by value and hands back the transformed table,
//! so a table has a single owner at every point of the pipeline. Row removal
//! is a predicate pass over the rows; survivors keep their relative order.

pub mod dedup;
pub mod filter;
pub mod labels;

pub use dedup::drop_duplicate_text;
pub use filter::remove_short_records;
pub use labels::reconcile_labels;

use temiz_types::Table;

/// A table after a stage, with the number of rows the stage removed or
/// changed.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutcome {
    /// The resulting table.
    pub table: Table,
    /// Rows removed (filters) or modified (rewrites).
    pub affected: usize,
}

impl StageOutcome {
    pub(crate) fn removed(table: Table, before: usize) -> Self {
        let affected = before - table.len();
        Self { table, affected }
    }
}
