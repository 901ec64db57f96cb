//! Morphological normalization capability.
//!
//! The pipeline does not hard-wire a normalization library. It talks to a
//! [`NormalizationService`]: four string transforms, of which only numeral
//! conversion can fail. [`TurkishNormalizer`] is the built-in implementation;
//! tests and callers with their own toolkit plug in anything else.

use temiz_types::NumeralError;

use crate::analyzer::numerals::spell_token;

/// Text transforms provided by a morphological normalizer.
///
/// All methods are expected to be pure. Implementations must be total,
/// except [`convert_text_numbers`](Self::convert_text_numbers), which reports
/// values it cannot render.
pub trait NormalizationService {
    /// Removes punctuation characters.
    fn remove_punctuations(&self, text: &str) -> String;

    /// Removes accent marks that are not part of the alphabet.
    fn remove_accent_marks(&self, text: &str) -> String;

    /// Lower-cases the text.
    fn lower_case(&self, text: &str) -> String;

    /// Renders a digit-only token as words.
    fn convert_text_numbers(&self, token: &str) -> Result<String, NumeralError>;

    /// Applies punctuation removal, accent removal and lower-casing, in that
    /// order.
    fn normalize(&self, text: &str) -> String {
        let text = self.remove_punctuations(text);
        let text = self.remove_accent_marks(&text);
        self.lower_case(&text)
    }
}

impl<S: NormalizationService + ?Sized> NormalizationService for &S {
    fn remove_punctuations(&self, text: &str) -> String {
        (**self).remove_punctuations(text)
    }

    fn remove_accent_marks(&self, text: &str) -> String {
        (**self).remove_accent_marks(text)
    }

    fn lower_case(&self, text: &str) -> String {
        (**self).lower_case(text)
    }

    fn convert_text_numbers(&self, token: &str) -> Result<String, NumeralError> {
        (**self).convert_text_numbers(token)
    }
}

/// Built-in Turkish normalizer.
///
/// - punctuation: ASCII punctuation plus curly quotes, guillemets, dashes and
///   the ellipsis; tokens holding `#`, `@` or `://` are left intact
/// - accent marks: circumflex, acute and grave vowels fold to the base vowel;
///   the Turkish letters ç ğ ı ö ş ü are kept
/// - lower-casing follows Turkish rules: `I` becomes `ı`, `İ` becomes `i`
/// - numerals: Turkish cardinal words, see
///   [`spell_turkish`](crate::analyzer::numerals::spell_turkish)
#[derive(Debug, Default, Clone, Copy)]
pub struct TurkishNormalizer;

impl TurkishNormalizer {
    /// Creates the normalizer.
    pub const fn new() -> Self {
        Self
    }
}

impl NormalizationService for TurkishNormalizer {
    fn remove_punctuations(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for piece in text.split_inclusive(char::is_whitespace) {
            let token = piece.trim_end_matches(char::is_whitespace);
            if is_marked_token(token) {
                out.push_str(token);
            } else {
                out.extend(token.chars().filter(|&c| !is_punctuation(c)));
            }
            out.push_str(&piece[token.len()..]);
        }
        out
    }

    fn remove_accent_marks(&self, text: &str) -> String {
        text.chars()
            .filter(|&c| !is_strippable_mark(c))
            .map(strip_accent)
            .collect()
    }

    fn lower_case(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                'I' => out.push('ı'),
                'İ' => out.push('i'),
                _ => out.extend(c.to_lowercase()),
            }
        }
        out
    }

    fn convert_text_numbers(&self, token: &str) -> Result<String, NumeralError> {
        spell_token(token)
    }
}

/// Hashtags, mentions and scheme URLs are removed whole by the noise
/// stripper, so their markers must survive punctuation removal.
#[inline]
fn is_marked_token(token: &str) -> bool {
    token.contains(['#', '@']) || token.contains("://")
}

#[inline]
fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(
            c,
            '“' | '”' | '‘' | '’' | '„' | '‚' | '«' | '»' | '‹' | '›' | '–' | '—' | '…' | '¡' | '¿'
        )
}

/// Combining grave, acute, circumflex and dot above.
#[inline]
fn is_strippable_mark(c: char) -> bool {
    matches!(c, '\u{0300}' | '\u{0301}' | '\u{0302}' | '\u{0307}')
}

#[inline]
fn strip_accent(c: char) -> char {
    match c {
        'â' | 'á' | 'à' => 'a',
        'Â' | 'Á' | 'À' => 'A',
        'ê' | 'é' | 'è' => 'e',
        'Ê' | 'É' | 'È' => 'E',
        'î' | 'í' | 'ì' => 'i',
        'Î' | 'Í' | 'Ì' => 'I',
        'ô' | 'ó' | 'ò' => 'o',
        'Ô' | 'Ó' | 'Ò' => 'O',
        'û' | 'ú' | 'ù' => 'u',
        'Û' | 'Ú' | 'Ù' => 'U',
        _ => c,
    }
}
