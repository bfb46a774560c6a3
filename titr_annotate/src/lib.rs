#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Offline, dictionary-driven annotator for clinical recommendations.
//!
//! Produces the token stream the extraction engine consumes without any
//! language model: a regex tokenizer, a lemma lexicon of the inflected forms
//! the directive patterns care about, and character-level shape and numeric
//! flags.

mod lexicon;
mod tokenizer;

pub use lexicon::{Lexicon, LexiconConfig, default_lexicon};

use titr_core::{AnnotateError, Annotator, ShapeClass, Token};
use tracing::debug;

use tokenizer::Piece;

/// Annotator backed by a static lemma lexicon.
#[derive(Debug, Clone)]
pub struct LexiconAnnotator {
    lexicon: Lexicon,
}

impl LexiconAnnotator {
    #[must_use]
    pub const fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Built-in lexicon extended with configured entries.
    #[must_use]
    pub fn from_config(config: &LexiconConfig) -> Self {
        let mut lexicon = default_lexicon();
        lexicon.extend(config.extra_lemmas.iter().map(|(f, l)| (f.clone(), l.clone())));
        Self::new(lexicon)
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(default_lexicon())
    }

    #[must_use]
    pub const fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn token(&self, piece: &Piece) -> Token {
        let surface = piece.text.clone();
        let lower = surface.to_lowercase();
        let is_numeric = !piece.ratio_prefix && like_num(&lower);
        let is_punctuation = piece.ratio_prefix || is_punct(&lower);
        let lemma = if is_numeric || is_punctuation {
            lower.clone()
        } else {
            self.lexicon.lemma(&lower).to_string()
        };

        Token {
            shape: ShapeClass::classify(&surface),
            surface,
            lower,
            lemma,
            is_numeric,
            is_punctuation,
        }
    }
}

impl Default for LexiconAnnotator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Annotator for LexiconAnnotator {
    fn annotate(&self, text: &str) -> Result<Vec<Token>, AnnotateError> {
        let tokens: Vec<Token> = tokenizer::split(text)
            .iter()
            .map(|piece| self.token(piece))
            .collect();
        debug!("Annotated {} tokens", tokens.len());
        Ok(tokens)
    }
}

/// Digits with optional `.`/`,` separators: `10`, `10,5`, `9.00`.
fn like_num(text: &str) -> bool {
    let digits: String = text.chars().filter(|c| !matches!(c, '.' | ',')).collect();
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn is_punct(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if c.is_ascii_punctuation() || matches!(c, '«' | '»' | '—' | '–' | '…')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn annotate(text: &str) -> Vec<Token> {
        LexiconAnnotator::with_defaults()
            .annotate(text)
            .expect("lexicon annotation never fails")
    }

    #[test]
    fn test_basal_phrase_annotation() {
        let tokens = annotate("снизьте базу на 10,5 %");
        let lemmas: Vec<&str> = tokens.iter().map(|t| t.lemma.as_str()).collect();
        assert_eq!(lemmas, ["снизить", "база", "на", "10,5", "%"]);
        assert!(tokens[3].is_numeric);
        assert!(tokens[4].is_punctuation);
        assert!(!tokens[0].is_numeric);
    }

    #[test]
    fn test_time_tokens_keep_shape() {
        let tokens = annotate("с 9.00 до 17:00");
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1].shape, ShapeClass::OneDigitDot);
        assert_eq!(tokens[3].shape, ShapeClass::TwoDigitColon);
        assert!(tokens[1].is_numeric);
        assert!(!tokens[3].is_numeric);
    }

    #[test]
    fn test_ratio_notation_split() {
        let tokens = annotate("ук на завтрак 1:10");
        let surfaces: Vec<&str> = tokens.iter().map(|t| t.surface.as_str()).collect();
        assert_eq!(surfaces, ["ук", "на", "завтрак", "1:", "10"]);
        assert!(tokens[3].is_punctuation);
        assert!(!tokens[3].is_numeric);
        assert!(tokens[4].is_numeric);
    }

    #[test]
    fn test_unknown_word_is_its_own_lemma() {
        let tokens = annotate("пациенту рекомендовано");
        assert_eq!(tokens[0].lemma, "пациенту");
        assert_eq!(tokens[1].lemma, "рекомендовано");
    }

    #[test]
    fn test_configured_lemmas_extend_defaults() {
        let config = LexiconConfig {
            extra_lemmas: [("понизить".to_string(), "снизить".to_string())]
                .into_iter()
                .collect(),
        };
        let annotator = LexiconAnnotator::from_config(&config);
        assert_eq!(annotator.lexicon().lemma("понизить"), "снизить");
        assert_eq!(annotator.lexicon().lemma("базу"), "база");
    }

    #[test]
    fn test_like_num_and_punct() {
        assert!(like_num("10"));
        assert!(like_num("10,5"));
        assert!(like_num("20.5"));
        assert!(!like_num("."));
        assert!(!like_num("17:00"));
        assert!(!like_num("десять"));
        assert!(is_punct("%"));
        assert!(is_punct("«"));
        assert!(!is_punct("%%"));
        assert!(!is_punct("на"));
    }
}
