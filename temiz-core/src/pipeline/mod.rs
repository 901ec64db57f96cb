//! The normalization pipeline.
//!
//! [`Pipeline::run`] moves a [`Table`] through a fixed sequence of stages:
//!
//! 1. text coercion: numbers become their rendering, rows without a usable
//!    text value are dropped as malformed
//! 2. service normalization (punctuation, accent marks, lower-casing)
//! 3. Turkish letter folding
//! 4. noise stripping
//! 5. numeral conversion
//! 6. short-record filtering
//! 7. label reconciliation
//! 8. deduplication
//!
//! Steps 2, 3, 7 and 8 can be switched off in [`PipelineConfig`]. Per-row
//! problems never abort the run; they are collected in the
//! [`PipelineReport`]. Missing columns are checked before any stage runs.

mod report;

pub use report::{NumeralFailure, PipelineReport};

use core::mem;

use temiz_types::{
    Cell, DigitPolicy, NumeralFallback, PipelineConfig, RecordError, SchemaError, Table,
    IS_OFFENSIVE_COLUMN, TARGET_COLUMN,
};
use tracing::{debug, info, instrument, warn};

use crate::analyzer::{NoiseStripper, NumeralConverter, StripperConfig, TurkishFolder};
use crate::dataset::{drop_duplicate_text, reconcile_labels, remove_short_records};
use crate::service::{NormalizationService, TurkishNormalizer};

/// Result of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// The cleaned table.
    pub table: Table,
    /// What happened along the way.
    pub report: PipelineReport,
}

/// Composes the text and table stages in their fixed order.
///
/// The normalization service is injected; [`TurkishNormalizer`] is the
/// default.
///
/// # Examples
///
/// ```
/// use temiz_core::pipeline::Pipeline;
/// use temiz_core::service::TurkishNormalizer;
/// use temiz_types::{Cell, PipelineConfig, Table};
///
/// let table = Table::from_rows(
///     ["text", "target", "is_offensive"],
///     vec![vec!["#kahrolsun @biri http://x.co BU ADAM 5 YIL yattı!!".into(), "OTHER".into(), 1i64.into()]],
/// )
/// .unwrap();
///
/// let pipeline = Pipeline::new(TurkishNormalizer::new(), PipelineConfig::tweet_cleaning());
/// let out = pipeline.run(table, "text").unwrap();
/// assert_eq!(out.table.rows()[0].cells()[0], Cell::from("bu adam yil yatti"));
/// assert_eq!(out.table.rows()[0].cells()[2], Cell::Int(0));
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline<S = TurkishNormalizer> {
    service: S,
    config: PipelineConfig,
    folder: TurkishFolder,
    stripper: NoiseStripper,
}

impl Default for Pipeline<TurkishNormalizer> {
    fn default() -> Self {
        Self::new(TurkishNormalizer::new(), PipelineConfig::default())
    }
}

impl<S: NormalizationService> Pipeline<S> {
    /// Creates a pipeline backed by `service`.
    pub fn new(service: S, config: PipelineConfig) -> Self {
        let stripper = NoiseStripper::new(StripperConfig {
            strip_digits: config.digit_policy == DigitPolicy::Strip,
        });
        Self {
            service,
            config,
            folder: TurkishFolder::new(),
            stripper,
        }
    }

    /// Returns the active configuration.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs every enabled stage over `table`, cleaning `text_column`.
    ///
    /// # Errors
    ///
    /// `SchemaError::MissingColumn` if `text_column` is absent, or if label
    /// reconciliation is enabled and `target` or `is_offensive` is absent.
    /// Nothing has been modified when this is returned.
    #[instrument(skip(self, table), fields(rows = table.len()))]
    pub fn run(&self, table: Table, text_column: &str) -> Result<PipelineOutput, SchemaError> {
        let pos = table.schema().require(text_column, "text normalization")?;
        if self.config.reconcile_labels {
            table.schema().require(TARGET_COLUMN, "label reconciliation")?;
            table
                .schema()
                .require(IS_OFFENSIVE_COLUMN, "label reconciliation")?;
        }

        let mut report = PipelineReport {
            rows_in: table.len(),
            ..Default::default()
        };

        let mut table = coerce_text(table, pos, text_column, &mut report);

        if self.config.apply_service_normalization {
            for_each_text(&mut table, pos, |text| *text = self.service.normalize(text));
            debug!(rows = table.len(), "service normalization applied");
        }

        if self.config.fold_turkish_chars {
            let mut buf = String::new();
            for_each_text(&mut table, pos, |text| {
                self.folder.fold_into(text, &mut buf);
                mem::swap(text, &mut buf);
            });
            debug!(rows = table.len(), "turkish letters folded");
        }

        for_each_text(&mut table, pos, |text| *text = self.stripper.strip(text));
        debug!(rows = table.len(), "noise stripped");

        let mut table = self.convert_numerals(table, pos, &mut report);

        if self.config.min_text_len > 0 {
            let outcome = remove_short_records(table, text_column, self.config.min_text_len)?;
            report.short_dropped = outcome.affected;
            table = outcome.table;
        }

        if self.config.reconcile_labels {
            let outcome = reconcile_labels(table)?;
            report.labels_reconciled = outcome.affected;
            table = outcome.table;
        }

        if self.config.deduplicate {
            let outcome = drop_duplicate_text(table, text_column)?;
            report.duplicates_removed = outcome.affected;
            table = outcome.table;
        }

        report.rows_out = table.len();
        info!(
            rows_in = report.rows_in,
            rows_out = report.rows_out,
            malformed = report.malformed.len(),
            numeral_failures = report.numeral_failures.len(),
            "pipeline finished"
        );

        Ok(PipelineOutput { table, report })
    }

    fn convert_numerals(&self, mut table: Table, pos: usize, report: &mut PipelineReport) -> Table {
        let converter = NumeralConverter::new(&self.service);
        let drop_on_failure = self.config.numeral_fallback == NumeralFallback::DropRecord;
        let mut dropped = 0usize;

        table.retain_mut(|row| {
            let origin = row.origin();
            let Some(Cell::Text(text)) = row.get_mut(pos) else {
                return true;
            };

            let converted = converter.convert(text);
            let clean = converted.is_clean();
            for error in converted.failures {
                warn!(origin, %error, "numeral conversion failed");
                report.numeral_failures.push(NumeralFailure { origin, error });
            }

            if !clean && drop_on_failure {
                dropped += 1;
                return false;
            }
            *text = converted.text;
            true
        });

        report.numeral_dropped = dropped;
        debug!(
            failures = report.numeral_failures.len(),
            dropped, "numerals converted"
        );
        table
    }
}

/// Turns the text cell of every row into `Cell::Text`.
///
/// Numbers are replaced by their rendering. Rows without the cell, or whose
/// cell holds no value, are dropped and reported as malformed.
fn coerce_text(
    mut table: Table,
    pos: usize,
    column: &str,
    report: &mut PipelineReport,
) -> Table {
    table.retain_mut(|row| {
        let origin = row.origin();
        let error = match row.get_mut(pos) {
            None => RecordError::MissingText {
                origin,
                column: column.to_owned(),
            },
            Some(cell) if cell.is_null() || matches!(*cell, Cell::Float(v) if v.is_nan()) => {
                RecordError::NullText {
                    origin,
                    column: column.to_owned(),
                }
            }
            Some(Cell::Text(_)) => return true,
            Some(cell) => {
                let rendered = cell.render().into_owned();
                *cell = Cell::Text(rendered);
                return true;
            }
        };

        warn!(%error, "dropping malformed record");
        report.malformed.push(error);
        false
    });

    debug!(
        rows = table.len(),
        malformed = report.malformed.len(),
        "text column coerced"
    );
    table
}

/// Applies `f` to the text of every row. Rows are expected to be coerced.
fn for_each_text<F>(table: &mut Table, pos: usize, mut f: F)
where
    F: FnMut(&mut String),
{
    for row in table.rows_mut() {
        if let Some(Cell::Text(text)) = row.get_mut(pos) {
            f(text);
        }
    }
}
