//! Per-text analysis.
//!
//! This module provides the text rewriting components:
//! - **Folding**: maps Turkish letters to ASCII base letters
//! - **Noise**: strips hashtags, mentions, URLs, punctuation and digits
//! - **Numerals**: spells out digit-only tokens

pub mod folding;
pub mod noise;
pub mod numerals;

pub use folding::TurkishFolder;
pub use noise::{NoiseStripper, StripperConfig};
pub use numerals::{ConvertedText, NumeralConverter};
