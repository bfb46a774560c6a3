//! Regex tokenizer.
//!
//! Splits text into words, digit groups (`10`, `10,5`, `9.00`, `23:00`) and
//! single punctuation characters. A `digits:digits` group is a clock time when
//! it can belong to a segment (right after `с`/`от`, or after `до`/`по` that
//! follows another clock time) and a ratio (`1:10`) anywhere else; a ratio is
//! emitted as a `1:` prefix piece followed by the number.

use once_cell::sync::Lazy;
use regex::Regex;
use titr_core::ShapeClass;

/// Words that open a time segment.
const SEGMENT_OPENERS: &[&str] = &["с", "от"];

/// Words that close a time segment after its first clock time.
const SEGMENT_CLOSERS: &[&str] = &["до", "по"];

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
static PIECE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+(?:[.,:]\d+)*|\p{L}+(?:-\p{L}+)*|\S")
        .expect("Static regex pattern is guaranteed to be valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub text: String,
    /// The `1:` half of a split ratio.
    pub ratio_prefix: bool,
}

impl Piece {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ratio_prefix: false,
        }
    }

    fn is_one_of(&self, words: &[&str]) -> bool {
        let lower = self.text.to_lowercase();
        words.iter().any(|w| *w == lower)
    }

    fn is_clock_time(&self) -> bool {
        !self.ratio_prefix && ShapeClass::classify(&self.text).is_time()
    }
}

/// Whether the next digit group sits where a segment expects a clock time.
fn expects_clock_time(pieces: &[Piece]) -> bool {
    match pieces {
        [.., last] if last.is_one_of(SEGMENT_OPENERS) => true,
        [.., time, last] => last.is_one_of(SEGMENT_CLOSERS) && time.is_clock_time(),
        _ => false,
    }
}

/// Splits `12:15` into its digit halves; anything else is not a ratio.
fn ratio_parts(raw: &str) -> Option<(&str, &str)> {
    let (left, right) = raw.split_once(':')?;
    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    (all_digits(left) && all_digits(right)).then_some((left, right))
}

pub fn split(text: &str) -> Vec<Piece> {
    let mut pieces: Vec<Piece> = Vec::new();
    for m in PIECE_PATTERN.find_iter(text) {
        let raw = m.as_str();
        match ratio_parts(raw) {
            Some((left, right)) if !expects_clock_time(&pieces) => {
                pieces.push(Piece {
                    text: format!("{left}:"),
                    ratio_prefix: true,
                });
                pieces.push(Piece::plain(right));
            }
            _ => pieces.push(Piece::plain(raw)),
        }
    }
    pieces
}
