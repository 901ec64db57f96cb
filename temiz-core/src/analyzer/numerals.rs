//! Digit-token to word conversion.
//!
//! [`NumeralConverter`] rewrites every whitespace-delimited token made only of
//! ASCII digits into its word form, as rendered by a
//! [`NormalizationService`]. Tokens mixing letters and digits (`5yil`,
//! `h3ll0`) are left as they are.
//!
//! [`spell_turkish`] is the Turkish cardinal renderer used by the default
//! service.

use smallvec::SmallVec;
use temiz_types::NumeralError;

use crate::service::NormalizationService;

/// Largest value [`spell_turkish`] can render (the katrilyon scale).
pub const MAX_SPELLABLE: u64 = 999_999_999_999_999_999;

const ONES: [&str; 10] = [
    "", "bir", "iki", "üç", "dört", "beş", "altı", "yedi", "sekiz", "dokuz",
];
const TENS: [&str; 10] = [
    "", "on", "yirmi", "otuz", "kırk", "elli", "altmış", "yetmiş", "seksen", "doksan",
];
const SCALES: [&str; 6] = ["", "bin", "milyon", "milyar", "trilyon", "katrilyon"];
const HUNDRED: &str = "yüz";
const ZERO: &str = "sıfır";

/// Spells out `value` as Turkish cardinal words separated by spaces.
///
/// `100` is `yüz` and `1000` is `bin` (Turkish drops the leading `bir`
/// there), while `1_000_000` is `bir milyon`. Returns `None` above
/// [`MAX_SPELLABLE`].
///
/// # Example
///
/// ```
/// use temiz_core::analyzer::numerals::spell_turkish;
///
/// assert_eq!(spell_turkish(2).as_deref(), Some("iki"));
/// assert_eq!(spell_turkish(1984).as_deref(), Some("bin dokuz yüz seksen dört"));
/// ```
pub fn spell_turkish(value: u64) -> Option<String> {
    if value > MAX_SPELLABLE {
        return None;
    }
    if value == 0 {
        return Some(ZERO.to_owned());
    }

    let mut groups: SmallVec<[u64; 6]> = SmallVec::new();
    let mut rest = value;
    while rest > 0 {
        groups.push(rest % 1000);
        rest /= 1000;
    }

    let mut words: Vec<&'static str> = Vec::with_capacity(groups.len() * 4);
    for (scale, &group) in groups.iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        // "bin", never "bir bin"
        if !(scale == 1 && group == 1) {
            push_below_thousand(group, &mut words);
        }
        if scale > 0 {
            words.push(SCALES[scale]);
        }
    }

    Some(words.join(" "))
}

fn push_below_thousand(n: u64, words: &mut Vec<&'static str>) {
    let hundreds = (n / 100) as usize;
    let tens = ((n / 10) % 10) as usize;
    let ones = (n % 10) as usize;

    if hundreds > 0 {
        if hundreds > 1 {
            words.push(ONES[hundreds]);
        }
        words.push(HUNDRED);
    }
    if tens > 0 {
        words.push(TENS[tens]);
    }
    if ones > 0 {
        words.push(ONES[ones]);
    }
}

/// Returns true for a non-empty token of ASCII digits only.
#[inline]
pub fn is_digit_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Parses a digit-only token and spells it out in Turkish.
///
/// Leading zeros are ignored, so `007` reads as `yedi`.
///
/// # Errors
///
/// `NumeralError::NotNumeric` if the token is not digit-only,
/// `NumeralError::OutOfRange` above [`MAX_SPELLABLE`].
pub fn spell_token(token: &str) -> Result<String, NumeralError> {
    if !is_digit_token(token) {
        return Err(NumeralError::NotNumeric {
            token: token.to_owned(),
        });
    }

    let out_of_range = || NumeralError::OutOfRange {
        token: token.to_owned(),
        max: MAX_SPELLABLE,
    };

    let significant = token.trim_start_matches('0');
    if significant.len() > 18 {
        return Err(out_of_range());
    }
    let value = if significant.is_empty() {
        0
    } else {
        significant.parse::<u64>().map_err(|_| out_of_range())?
    };

    spell_turkish(value).ok_or_else(out_of_range)
}

/// Result of converting one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedText {
    /// The rewritten text, tokens joined by single spaces. Tokens that failed
    /// to convert keep their original digits.
    pub text: String,
    /// One entry per digit token that could not be converted.
    pub failures: SmallVec<[NumeralError; 2]>,
}

impl ConvertedText {
    /// Returns true if every digit token converted.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Rewrites digit-only tokens into words through a [`NormalizationService`].
pub struct NumeralConverter<'s, S: ?Sized> {
    service: &'s S,
}

impl<'s, S> NumeralConverter<'s, S>
where
    S: NormalizationService + ?Sized,
{
    /// Creates a converter backed by `service`.
    pub const fn new(service: &'s S) -> Self {
        Self { service }
    }

    /// Converts every digit-only token of `text`.
    ///
    /// Splits on any whitespace and re-joins with single spaces. A token the
    /// service cannot render, or renders as empty, stays as-is and is listed
    /// in [`ConvertedText::failures`].
    pub fn convert(&self, text: &str) -> ConvertedText {
        let mut out = String::with_capacity(text.len() * 2);
        let mut failures = SmallVec::new();

        for (i, token) in text.split_whitespace().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            if !is_digit_token(token) {
                out.push_str(token);
                continue;
            }

            match self.service.convert_text_numbers(token) {
                Ok(words) if !words.is_empty() => out.push_str(&words),
                Ok(_) => {
                    failures.push(NumeralError::NoWordForm {
                        token: token.to_owned(),
                    });
                    out.push_str(token);
                }
                Err(err) => {
                    failures.push(err);
                    out.push_str(token);
                }
            }
        }

        ConvertedText {
            text: out,
            failures,
        }
    }
}
