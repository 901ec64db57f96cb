//! Core types for the temiz dataset normalization pipeline.
//!
//! This crate holds the plain data shared by the pipeline crate and its
//! binaries:
//!
//! - **Table model**: [`Cell`], [`Schema`], [`Row`], [`Table`]
//! - **Configuration**: [`PipelineConfig`] and its policy enums
//! - **Errors**: schema, per-record and numeral failures

#![warn(missing_docs)]

use core::fmt;
use std::borrow::Cow;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Default name of the column holding the sample text.
pub const TEXT_COLUMN: &str = "text";
/// Column holding the categorical label.
pub const TARGET_COLUMN: &str = "target";
/// Column holding the binary offensiveness flag.
pub const IS_OFFENSIVE_COLUMN: &str = "is_offensive";
/// The generic category that can never be flagged offensive.
pub const OTHER_LABEL: &str = "OTHER";
/// Default minimum text length (in characters) kept by the short-record filter.
pub const DEFAULT_MIN_TEXT_LEN: usize = 5;
/// Textual rendering of a missing value.
pub const MISSING_PLACEHOLDER: &str = "nan";

/// A single dynamically typed table value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing value.
    Null,
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(String),
}

impl Cell {
    /// Returns the string form of this cell.
    ///
    /// Length checks and text coercion always go through this rendering, so a
    /// placeholder is measured by what it prints as: `Null` renders as `nan`,
    /// integral floats keep one decimal (`1.0`).
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Cell::Text(s) => Cow::Borrowed(s.as_str()),
            Cell::Int(v) => Cow::Owned(v.to_string()),
            Cell::Float(v) => Cow::Owned(render_float(*v)),
            Cell::Null => Cow::Borrowed(MISSING_PLACEHOLDER),
        }
    }

    /// Returns the text if this is a `Text` cell.
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Interprets the cell as an integer flag.
    ///
    /// Integral floats and numeric text count; anything else is `None`.
    pub fn as_flag(&self) -> Option<i64> {
        match self {
            Cell::Int(v) => Some(*v),
            Cell::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            Cell::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Returns a cell of the same kind holding `value`.
    pub fn with_flag(&self, value: i64) -> Cell {
        match self {
            Cell::Float(_) => Cell::Float(value as f64),
            Cell::Text(_) => Cell::Text(value.to_string()),
            _ => Cell::Int(value),
        }
    }

    /// Returns true for `Null`.
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_owned())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn render_float(v: f64) -> String {
    if v.is_nan() {
        MISSING_PLACEHOLDER.to_owned()
    } else if v.is_infinite() {
        let sign = if v > 0.0 { "" } else { "-" };
        format!("{sign}inf")
    } else if v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{v:.1}")
    } else {
        format!("{v}")
    }
}

/// Ordered column names with constant-time lookup by name.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    columns: Vec<String>,
    lookup: FxHashMap<String, usize>,
}

impl Schema {
    /// Builds a schema from column names.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::DuplicateColumn` if a name appears twice.
    pub fn new<I, S>(columns: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut schema = Schema::default();
        for name in columns {
            let name = name.into();
            if schema.lookup.contains_key(&name) {
                return Err(SchemaError::DuplicateColumn(name));
            }
            schema.lookup.insert(name.clone(), schema.columns.len());
            schema.columns.push(name);
        }
        Ok(schema)
    }

    /// Position of a column, if present.
    #[inline]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    /// Position of a column the caller cannot proceed without.
    ///
    /// `purpose` names the stage that needs it and ends up in the diagnostic.
    pub fn require(&self, name: &str, purpose: &'static str) -> Result<usize, SchemaError> {
        self.position(name).ok_or_else(|| SchemaError::MissingColumn {
            column: name.to_owned(),
            purpose,
        })
    }

    /// Column names in order.
    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the schema has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
    }
}

impl Eq for Schema {}

/// Inline storage for the cells of one row.
///
/// The usual schema is `text|target|is_offensive`, so four inline slots keep
/// rows off the heap.
pub type Cells = SmallVec<[Cell; 4]>;

/// One record of a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    origin: usize,
    cells: Cells,
}

impl Row {
    /// Creates a row with its position in the ingested table.
    pub fn new(origin: usize, cells: Cells) -> Self {
        Self { origin, cells }
    }

    /// Zero-based position of this row in the ingested table.
    ///
    /// Stays fixed while rows before it are filtered out.
    #[inline(always)]
    pub const fn origin(&self) -> usize {
        self.origin
    }

    /// All cells of the row. May be shorter than the schema (ragged row).
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at a column position.
    #[inline]
    pub fn get(&self, pos: usize) -> Option<&Cell> {
        self.cells.get(pos)
    }

    /// Mutable cell at a column position.
    #[inline]
    pub fn get_mut(&mut self, pos: usize) -> Option<&mut Cell> {
        self.cells.get_mut(pos)
    }
}

/// An ordered sequence of rows sharing one schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    schema: Schema,
    rows: Vec<Row>,
    next_origin: usize,
}

impl Table {
    /// Creates an empty table.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
            next_origin: 0,
        }
    }

    /// Builds a table from column names and row values.
    ///
    /// Convenience for fixtures and small in-memory datasets.
    pub fn from_rows<C, S, R>(columns: C, rows: R) -> Result<Self, SchemaError>
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = Vec<Cell>>,
    {
        let mut table = Table::new(Schema::new(columns)?);
        for cells in rows {
            table.push(cells);
        }
        Ok(table)
    }

    /// Appends a row and returns its origin.
    pub fn push(&mut self, cells: impl IntoIterator<Item = Cell>) -> usize {
        let origin = self.next_origin;
        self.rows.push(Row::new(origin, cells.into_iter().collect()));
        self.next_origin += 1;
        origin
    }

    /// The table schema.
    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Rows in order.
    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Mutable rows in order.
    #[inline]
    pub fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Keeps only the rows matching `keep`, preserving order.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&Row) -> bool,
    {
        self.rows.retain(keep);
    }

    /// Like [`Table::retain`], with mutable access to each row.
    pub fn retain_mut<F>(&mut self, keep: F)
    where
        F: FnMut(&mut Row) -> bool,
    {
        self.rows.retain_mut(keep);
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of one column, `None` where a ragged row lacks it.
    pub fn column(&self, pos: usize) -> impl Iterator<Item = Option<&Cell>> + '_ {
        self.rows.iter().map(move |row| row.get(pos))
    }
}

/// How the pipeline treats digits that survive punctuation removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitPolicy {
    /// Digit runs are deleted by the noise stripper; numeral conversion
    /// sees no digit-only tokens.
    #[default]
    Strip,
    /// Digit runs are kept by the stripper and digit-only tokens are
    /// spelled out as words.
    Spell,
}

/// What happens to a row whose digit token could not be spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumeralFallback {
    /// Leave the original digits in place and keep the row.
    #[default]
    KeepDigits,
    /// Drop the row.
    DropRecord,
}

/// Pipeline configuration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Run the injected normalization service (punctuation, accent marks,
    /// lower-casing) before anything else.
    pub apply_service_normalization: bool,
    /// Map Turkish letters to their ASCII base letter.
    pub fold_turkish_chars: bool,
    /// Digit handling, see [`DigitPolicy`].
    pub digit_policy: DigitPolicy,
    /// Row handling on numeral conversion failure.
    pub numeral_fallback: NumeralFallback,
    /// Rows whose text is shorter than this many characters are dropped.
    /// `0` keeps everything.
    pub min_text_len: usize,
    /// Force `is_offensive` to 0 for the `OTHER` category.
    pub reconcile_labels: bool,
    /// Drop rows whose text duplicates an earlier row.
    pub deduplicate: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            apply_service_normalization: true,
            fold_turkish_chars: true,
            digit_policy: DigitPolicy::Strip,
            numeral_fallback: NumeralFallback::KeepDigits,
            min_text_len: DEFAULT_MIN_TEXT_LEN,
            reconcile_labels: true,
            deduplicate: true,
        }
    }
}

impl PipelineConfig {
    /// Regex-only cleaning of raw tweets: no normalization service, Turkish
    /// letters folded, digits stripped.
    pub const fn tweet_cleaning() -> Self {
        Self {
            apply_service_normalization: false,
            fold_turkish_chars: true,
            digit_policy: DigitPolicy::Strip,
            numeral_fallback: NumeralFallback::KeepDigits,
            min_text_len: DEFAULT_MIN_TEXT_LEN,
            reconcile_labels: true,
            deduplicate: true,
        }
    }

    /// Service normalization with digit-only tokens spelled out as words.
    pub const fn numeral_spelling() -> Self {
        Self {
            apply_service_normalization: true,
            fold_turkish_chars: true,
            digit_policy: DigitPolicy::Spell,
            numeral_fallback: NumeralFallback::KeepDigits,
            min_text_len: DEFAULT_MIN_TEXT_LEN,
            reconcile_labels: true,
            deduplicate: true,
        }
    }
}

/// Table-level errors. These are fatal and checked before any stage runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A column a stage depends on is absent.
    #[error("missing required column `{column}` (needed for {purpose})")]
    MissingColumn {
        /// Name of the absent column.
        column: String,
        /// The stage that needs it.
        purpose: &'static str,
    },
    /// The header names the same column twice.
    #[error("duplicate column `{0}` in header")]
    DuplicateColumn(String),
}

/// A record whose text cannot be processed. The record is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The row is shorter than the schema and has no text cell.
    #[error("row {origin}: text column `{column}` is missing")]
    MissingText {
        /// Row origin.
        origin: usize,
        /// Text column name.
        column: String,
    },
    /// The text cell holds no value.
    #[error("row {origin}: text column `{column}` has no value")]
    NullText {
        /// Row origin.
        origin: usize,
        /// Text column name.
        column: String,
    },
}

impl RecordError {
    /// Origin of the offending row.
    pub const fn origin(&self) -> usize {
        match self {
            RecordError::MissingText { origin, .. } | RecordError::NullText { origin, .. } => {
                *origin
            }
        }
    }
}

/// A digit token that could not be spelled out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumeralError {
    /// The token is empty or contains something other than ASCII digits.
    #[error("`{token}` is not a digit-only token")]
    NotNumeric {
        /// The token.
        token: String,
    },
    /// The value is larger than the largest supported scale.
    #[error("`{token}` exceeds the largest spellable value {max}")]
    OutOfRange {
        /// The token.
        token: String,
        /// Largest supported value.
        max: u64,
    },
    /// The numeral service returned an empty word form.
    #[error("no word form produced for `{token}`")]
    NoWordForm {
        /// The token.
        token: String,
    },
}

impl NumeralError {
    /// The token that failed.
    pub fn token(&self) -> &str {
        match self {
            NumeralError::NotNumeric { token }
            | NumeralError::OutOfRange { token, .. }
            | NumeralError::NoWordForm { token } => token,
        }
    }
}
