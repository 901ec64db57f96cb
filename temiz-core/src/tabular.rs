//! Delimited-file adapter.
//!
//! Reads a header row plus records into a [`Table`] and writes a table back
//! out. Field types are inferred per cell and only when lossless: a field
//! becomes `Int` or `Float` if rendering the number gives back the exact
//! field, so `007` or `1e3` stay text. Empty fields are `Null`.

use std::io::{Read, Write};

use temiz_types::{Cell, Schema, SchemaError, Table};
use thiserror::Error;
use tracing::debug;

/// Errors from reading or writing a delimited file.
#[derive(Debug, Error)]
pub enum TabularError {
    /// Malformed input or a failed write in the CSV layer.
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    /// Underlying I/O failure.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// The header row is not a valid schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Reads a table with a header row from `reader`.
///
/// Rows may be shorter or longer than the header; they are kept as-is.
pub fn read_table<R: Read>(reader: R, delimiter: u8) -> Result<Table, TabularError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let schema = Schema::new(rdr.headers()?.iter())?;
    let mut table = Table::new(schema);

    let mut record = csv::StringRecord::new();
    while rdr.read_record(&mut record)? {
        table.push(record.iter().map(infer_cell));
    }

    debug!(
        rows = table.len(),
        columns = table.schema().len(),
        "table read"
    );
    Ok(table)
}

/// Writes `table` with a header row to `writer`.
///
/// `Null` is written as an empty field, numbers through [`Cell::render`].
/// Rows shorter than the header are padded with empty fields.
pub fn write_table<W: Write>(writer: W, table: &Table, delimiter: u8) -> Result<(), TabularError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(writer);

    let width = table.schema().len();
    wtr.write_record(table.schema().columns())?;

    let mut fields: Vec<String> = Vec::with_capacity(width);
    for row in table.rows() {
        fields.clear();
        let len = row.cells().len().max(width);
        fields.extend((0..len).map(|pos| match row.get(pos) {
            None | Some(Cell::Null) => String::new(),
            Some(cell) => cell.render().into_owned(),
        }));
        wtr.write_record(&fields)?;
    }

    wtr.flush()?;
    debug!(rows = table.len(), "table written");
    Ok(())
}

fn infer_cell(field: &str) -> Cell {
    if field.is_empty() {
        return Cell::Null;
    }
    if let Ok(v) = field.parse::<i64>() {
        if v.to_string() == field {
            return Cell::Int(v);
        }
    }
    if let Ok(v) = field.parse::<f64>() {
        let cell = Cell::Float(v);
        if cell.render() == field {
            return cell;
        }
    }
    Cell::Text(field.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "id|text|target|is_offensive\n\
                       1|Merhaba, dünya!|OTHER|1\n\
                       2|007 ajan|INSULT|0\n\
                       3||OTHER|0\n";

    #[test]
    fn reads_pipe_delimited() {
        let table = read_table(RAW.as_bytes(), b'|').unwrap();
        assert_eq!(
            table.schema().columns(),
            ["id", "text", "target", "is_offensive"]
        );
        assert_eq!(table.len(), 3);

        let first = table.rows()[0].cells();
        assert_eq!(first[0], Cell::Int(1));
        assert_eq!(first[1], Cell::from("Merhaba, dünya!"));
        assert_eq!(first[3], Cell::Int(1));

        assert_eq!(table.rows()[1].cells()[1], Cell::from("007 ajan"));
        assert_eq!(table.rows()[2].cells()[1], Cell::Null);
    }

    #[test]
    fn inference_is_lossless() {
        assert_eq!(infer_cell("42"), Cell::Int(42));
        assert_eq!(infer_cell("-7"), Cell::Int(-7));
        assert_eq!(infer_cell("1.5"), Cell::Float(1.5));
        assert_eq!(infer_cell("1.0"), Cell::Float(1.0));
        assert_eq!(infer_cell("007"), Cell::from("007"));
        assert_eq!(infer_cell("+3"), Cell::from("+3"));
        assert_eq!(infer_cell("1e3"), Cell::from("1e3"));
        assert_eq!(infer_cell(" 5"), Cell::from(" 5"));
        assert_eq!(infer_cell(""), Cell::Null);
    }

    #[test]
    fn ragged_rows_kept() {
        let raw = "a,b,c\n1,2\n1,2,3,4\n";
        let table = read_table(raw.as_bytes(), b',').unwrap();
        assert_eq!(table.rows()[0].cells().len(), 2);
        assert_eq!(table.rows()[1].cells().len(), 4);
    }

    #[test]
    fn duplicate_header_rejected() {
        let raw = "text,text\nx,y\n";
        let err = read_table(raw.as_bytes(), b',').unwrap_err();
        assert!(matches!(err, TabularError::Schema(SchemaError::DuplicateColumn(ref c)) if c == "text"));
    }

    #[test]
    fn writes_comma_separated() {
        let table = read_table(RAW.as_bytes(), b'|').unwrap();
        let mut out = Vec::new();
        write_table(&mut out, &table, b',').unwrap();

        let written = String::from_utf8(out).unwrap();
        assert_eq!(
            written,
            "id,text,target,is_offensive\n\
             1,\"Merhaba, dünya!\",OTHER,1\n\
             2,007 ajan,INSULT,0\n\
             3,,OTHER,0\n"
        );
    }

    #[test]
    fn short_rows_padded_on_write() {
        let table = Table::from_rows(["a", "b", "c"], vec![vec![Cell::Int(1)]]).unwrap();
        let mut out = Vec::new();
        write_table(&mut out, &table, b'|').unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a|b|c\n1||\n");
    }

    #[test]
    fn written_table_reads_back() {
        let table = read_table(RAW.as_bytes(), b'|').unwrap();
        let mut out = Vec::new();
        write_table(&mut out, &table, b',').unwrap();
        let again = read_table(out.as_slice(), b',').unwrap();
        assert_eq!(again, table);
    }
}
