//! Social-media noise removal.
//!
//! Tweets carry hashtags, mentions, links, retweet markers and punctuation
//! that carry no signal for an offensiveness classifier. [`NoiseStripper`]
//! removes them with a fixed pattern set applied in a fixed order:
//!
//! 1. lower-case the whole string
//! 2. drop every whitespace-delimited token containing `#` or `@`
//! 3. delete mentions, non-alphanumeric characters, URLs and a leading `rt`
//! 4. collapse non-word runs into a single space
//! 5. delete digit runs (optional, see [`StripperConfig::strip_digits`])
//!
//! URLs must go in step 3, before the generic collapse of step 4, otherwise
//! `http://x.co` degrades to `http x co` and leaks into the text.
//!
//! The output holds only ASCII letters, digits (when kept) and single spaces,
//! with no leading or trailing space. Input that is all noise yields `""`.

use memchr::memchr2;
use once_cell::sync::Lazy;
use regex::Regex;

/// Mentions, any char outside `[0-9A-Za-z \t]`, scheme URLs, a leading
/// retweet marker and a bare `http` prefix. Leftmost-first alternation: a URL
/// starting at a position is consumed whole.
static NOISE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(@[A-Za-z0-9_]+)|([^0-9A-Za-z \t])|(\w+://\S+)|^rt|http.+?").unwrap()
});

static NON_WORD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+\s*").unwrap());

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Configuration for [`NoiseStripper`].
#[derive(Debug, Clone, Copy)]
pub struct StripperConfig {
    /// Delete digit runs as the last step.
    pub strip_digits: bool,
}

impl Default for StripperConfig {
    fn default() -> Self {
        Self { strip_digits: true }
    }
}

/// Removes hashtags, mentions, URLs, retweet markers, punctuation and
/// (optionally) digits from a text.
///
/// # Examples
///
/// ```
/// use temiz_core::analyzer::NoiseStripper;
///
/// let stripper = NoiseStripper::default();
/// assert_eq!(
///     stripper.strip("#kahrolsun @biri http://x.co BU ADAM 5 YIL yatti!!"),
///     "bu adam yil yatti"
/// );
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NoiseStripper {
    config: StripperConfig,
}

impl NoiseStripper {
    /// Creates a stripper with the given configuration.
    pub const fn new(config: StripperConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    pub const fn config(&self) -> StripperConfig {
        self.config
    }

    /// Strips noise from `input` and returns the cleaned text.
    pub fn strip(&self, input: &str) -> String {
        let lowered = input.to_lowercase();
        let kept = drop_marked_tokens(&lowered);
        let cleaned = NOISE.replace_all(&kept, "");
        let collapsed = NON_WORD_RUN.replace_all(&cleaned, " ");

        if self.config.strip_digits {
            collapse_whitespace(&DIGIT_RUN.replace_all(&collapsed, ""))
        } else {
            collapse_whitespace(&collapsed)
        }
    }
}

/// Re-joins the tokens of `input` with single spaces, skipping any token that
/// contains a hashtag or mention marker.
fn drop_marked_tokens(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for token in input.split_whitespace() {
        if memchr2(b'#', b'@', token.as_bytes()).is_some() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
