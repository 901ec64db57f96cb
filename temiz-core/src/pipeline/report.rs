//! Per-run counters and per-record diagnostics.

use temiz_types::{NumeralError, RecordError};

/// A digit token of one row that could not be spelled out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumeralFailure {
    /// Origin of the row.
    pub origin: usize,
    /// What went wrong.
    pub error: NumeralError,
}

/// What a pipeline run did to the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    /// Rows handed to the pipeline.
    pub rows_in: usize,
    /// Rows in the output table.
    pub rows_out: usize,
    /// Rows dropped because their text could not be read.
    pub malformed: Vec<RecordError>,
    /// Digit tokens that could not be spelled out.
    pub numeral_failures: Vec<NumeralFailure>,
    /// Rows dropped because of a numeral failure.
    pub numeral_dropped: usize,
    /// Rows dropped by the short-record filter.
    pub short_dropped: usize,
    /// Rows whose offensiveness flag was cleared.
    pub labels_reconciled: usize,
    /// Rows dropped as duplicates.
    pub duplicates_removed: usize,
}

impl PipelineReport {
    /// Total rows removed by all stages.
    pub fn rows_dropped(&self) -> usize {
        self.malformed.len() + self.numeral_dropped + self.short_dropped + self.duplicates_removed
    }

    /// Fraction of input rows that survived, `1.0` for an empty input.
    pub fn retention(&self) -> f64 {
        if self.rows_in == 0 {
            return 1.0;
        }
        self.rows_out as f64 / self.rows_in as f64
    }
}

impl core::fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} rows in, {} rows out ({:.1}% kept)",
            self.rows_in,
            self.rows_out,
            self.retention() * 100.0
        )?;

        if self.rows_dropped() > 0 {
            write!(
                f,
                ", dropped: {} malformed, {} short, {} duplicate",
                self.malformed.len(),
                self.short_dropped,
                self.duplicates_removed
            )?;
            if self.numeral_dropped > 0 {
                write!(f, ", {} numeral", self.numeral_dropped)?;
            }
        }

        write!(f, ", {} labels reconciled", self.labels_reconciled)?;

        if !self.numeral_failures.is_empty() {
            write!(f, ", {} numeral failures", self.numeral_failures.len())?;
        }

        Ok(())
    }
}
