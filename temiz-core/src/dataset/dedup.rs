use rustc_hash::FxHashSet;
use temiz_types::{Cell, SchemaError, Table};
use tracing::debug;

use super::StageOutcome;

/// Identity of a text cell for duplicate detection.
///
/// Cells of different kinds never collide; all NaNs are one value.
#[derive(PartialEq, Eq, Hash)]
enum TextKey {
    Missing,
    Null,
    Int(i64),
    Float(u64),
    Text(String),
}

impl TextKey {
    fn of(cell: Option<&Cell>) -> Self {
        match cell {
            None => TextKey::Missing,
            Some(Cell::Null) => TextKey::Null,
            Some(Cell::Int(v)) => TextKey::Int(*v),
            Some(Cell::Float(v)) if v.is_nan() => TextKey::Float(f64::NAN.to_bits()),
            // -0.0 and 0.0 are the same value
            Some(Cell::Float(v)) => TextKey::Float((*v + 0.0).to_bits()),
            Some(Cell::Text(s)) => TextKey::Text(s.clone()),
        }
    }
}

/// Keeps the first row for each distinct text and drops later exact
/// duplicates. Stable: survivors keep their order.
///
/// # Errors
///
/// `SchemaError::MissingColumn` if `text_column` is not in the schema.
pub fn drop_duplicate_text(
    mut table: Table,
    text_column: &str,
) -> Result<StageOutcome, SchemaError> {
    let pos = table.schema().require(text_column, "deduplication")?;
    let before = table.len();

    let mut seen = FxHashSet::default();
    seen.reserve(before);
    table.retain(|row| seen.insert(TextKey::of(row.get(pos))));

    let outcome = StageOutcome::removed(table, before);
    debug!(duplicates = outcome.affected, "duplicate texts removed");
    Ok(outcome)
}
