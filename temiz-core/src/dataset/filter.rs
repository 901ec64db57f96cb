use temiz_types::{SchemaError, Table};
use tracing::debug;

use super::StageOutcome;

/// Drops every row whose text renders shorter than `min_len` characters.
///
/// Length is counted in chars of the cell's rendering, so a missing value is
/// measured as `nan`. A ragged row without the text cell counts as empty.
///
/// # Errors
///
/// `SchemaError::MissingColumn` if `text_column` is not in the schema.
pub fn remove_short_records(
    mut table: Table,
    text_column: &str,
    min_len: usize,
) -> Result<StageOutcome, SchemaError> {
    let pos = table.schema().require(text_column, "short-record filtering")?;
    let before = table.len();

    table.retain(|row| {
        row.get(pos)
            .map_or(0, |cell| cell.render().chars().count())
            >= min_len
    });

    let outcome = StageOutcome::removed(table, before);
    debug!(min_len, dropped = outcome.affected, "short records removed");
    Ok(outcome)
}
