//! Text normalization pipeline for Turkish offensive-language datasets.
//!
//! Raw social-media text goes in, a cleaned, label-consistent and
//! deduplicated table comes out.
//!
//! - [`analyzer`]: per-text rewriting (letter folding, noise stripping,
//!   numeral spelling)
//! - [`service`]: the injected morphological normalizer
//! - [`dataset`]: table stages (short-record filter, label reconciliation,
//!   deduplication)
//! - [`pipeline`]: the fixed stage order and its run report
//! - [`tabular`]: reading and writing delimited files
//!
//! # Examples
//!
//! ```
//! use temiz_core::{read_table, Pipeline};
//!
//! let raw = "text|target|is_offensive\nBU ADAM 5 YIL yattı!!|OTHER|1\n";
//! let table = read_table(raw.as_bytes(), b'|').unwrap();
//!
//! let out = Pipeline::default().run(table, "text").unwrap();
//! assert_eq!(out.table.rows()[0].cells()[0].render(), "bu adam yil yatti");
//! assert_eq!(out.report.labels_reconciled, 1);
//! ```

pub mod analyzer;
pub mod dataset;
pub mod pipeline;
pub mod service;
pub mod tabular;

pub use pipeline::{Pipeline, PipelineOutput, PipelineReport};
pub use service::{NormalizationService, TurkishNormalizer};
pub use tabular::{read_table, write_table, TabularError};
pub use temiz_types as types;
