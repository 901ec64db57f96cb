use temiz_types::{SchemaError, Table, IS_OFFENSIVE_COLUMN, OTHER_LABEL, TARGET_COLUMN};
use tracing::debug;

use super::StageOutcome;

/// Clears the offensiveness flag of every `OTHER` row.
///
/// A row with `target == "OTHER"` and `is_offensive == 1` gets
/// `is_offensive = 0`, in the same cell kind it had. Nothing else changes.
/// `affected` counts the corrected rows.
///
/// # Errors
///
/// `SchemaError::MissingColumn` if `target` or `is_offensive` is absent.
pub fn reconcile_labels(mut table: Table) -> Result<StageOutcome, SchemaError> {
    let target = table.schema().require(TARGET_COLUMN, "label reconciliation")?;
    let flag = table
        .schema()
        .require(IS_OFFENSIVE_COLUMN, "label reconciliation")?;

    let mut corrected = 0usize;
    for row in table.rows_mut() {
        let is_other = row.get(target).and_then(|c| c.as_text()) == Some(OTHER_LABEL);
        if !is_other {
            continue;
        }
        if let Some(cell) = row.get_mut(flag) {
            if cell.as_flag() == Some(1) {
                *cell = cell.with_flag(0);
                corrected += 1;
            }
        }
    }

    debug!(corrected, "labels reconciled");
    Ok(StageOutcome {
        table,
        affected: corrected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use temiz_types::{Cell, TEXT_COLUMN};

    fn labelled(rows: Vec<(&str, Cell)>) -> Table {
        Table::from_rows(
            [TEXT_COLUMN, TARGET_COLUMN, IS_OFFENSIVE_COLUMN],
            rows.into_iter()
                .map(|(target, flag)| vec!["metin".into(), target.into(), flag]),
        )
        .unwrap()
    }

    fn flags(table: &Table) -> Vec<Cell> {
        table.column(2).map(|c| c.cloned().unwrap_or(Cell::Null)).collect()
    }

    #[test]
    fn other_offensive_is_cleared() {
        let out = reconcile_labels(labelled(vec![("OTHER", Cell::Int(1))])).unwrap();
        assert_eq!(flags(&out.table), vec![Cell::Int(0)]);
        assert_eq!(out.affected, 1);
    }

    #[test]
    fn other_categories_untouched() {
        let out = reconcile_labels(labelled(vec![
            ("INSULT", Cell::Int(1)),
            ("OTHER", Cell::Int(0)),
            ("RACIST", Cell::Int(1)),
            ("other", Cell::Int(1)),
        ]))
        .unwrap();
        assert_eq!(
            flags(&out.table),
            vec![Cell::Int(1), Cell::Int(0), Cell::Int(1), Cell::Int(1)]
        );
        assert_eq!(out.affected, 0);
    }

    #[test]
    fn cell_kind_preserved() {
        let out = reconcile_labels(labelled(vec![
            ("OTHER", Cell::Float(1.0)),
            ("OTHER", Cell::from("1")),
        ]))
        .unwrap();
        assert_eq!(flags(&out.table), vec![Cell::Float(0.0), Cell::from("0")]);
        assert_eq!(out.affected, 2);
    }

    #[test]
    fn no_row_removed() {
        let out = reconcile_labels(labelled(vec![
            ("OTHER", Cell::Int(1)),
            ("PROFANITY", Cell::Int(1)),
        ]))
        .unwrap();
        assert_eq!(out.table.len(), 2);
    }

    #[test]
    fn ragged_row_skipped() {
        let table = Table::from_rows(
            [TEXT_COLUMN, TARGET_COLUMN, IS_OFFENSIVE_COLUMN],
            vec![vec!["metin".into(), "OTHER".into()]],
        )
        .unwrap();
        let out = reconcile_labels(table).unwrap();
        assert_eq!(out.affected, 0);
    }

    #[test]
    fn missing_columns_rejected() {
        let table = Table::from_rows([TEXT_COLUMN, TARGET_COLUMN], Vec::new()).unwrap();
        assert_eq!(
            reconcile_labels(table),
            Err(SchemaError::MissingColumn {
                column: IS_OFFENSIVE_COLUMN.into(),
                purpose: "label reconciliation",
            })
        );
    }
}
