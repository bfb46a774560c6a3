//! Annotated token types.
//!
//! Tokens are produced by an external annotator and only read by the
//! extraction engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse character-layout class of a token.
///
/// Only the clock-time layouts are distinguished; everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeClass {
    /// `23:00`
    TwoDigitColon,
    /// `9:00`
    OneDigitColon,
    /// `23.00`
    TwoDigitDot,
    /// `9.00`
    OneDigitDot,
    #[default]
    Other,
}

impl ShapeClass {
    /// All clock-time shapes.
    pub const TIME_SHAPES: [Self; 4] = [
        Self::TwoDigitColon,
        Self::OneDigitColon,
        Self::TwoDigitDot,
        Self::OneDigitDot,
    ];

    /// Returns the shape notation (`d` per digit, separators kept).
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::TwoDigitColon => "dd:dd",
            Self::OneDigitColon => "d:dd",
            Self::TwoDigitDot => "dd.dd",
            Self::OneDigitDot => "d.dd",
            Self::Other => "other",
        }
    }

    /// Classify a surface string.
    #[must_use]
    pub fn classify(surface: &str) -> Self {
        let notation: String = surface
            .chars()
            .map(|c| if c.is_ascii_digit() { 'd' } else { c })
            .collect();
        Self::from_notation(&notation)
    }

    fn from_notation(notation: &str) -> Self {
        match notation {
            "dd:dd" => Self::TwoDigitColon,
            "d:dd" => Self::OneDigitColon,
            "dd.dd" => Self::TwoDigitDot,
            "d.dd" => Self::OneDigitDot,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn is_time(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

impl From<String> for ShapeClass {
    fn from(notation: String) -> Self {
        Self::from_notation(&notation.to_lowercase())
    }
}

impl From<ShapeClass> for String {
    fn from(shape: ShapeClass) -> Self {
        shape.as_str().to_string()
    }
}

impl fmt::Display for ShapeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single annotated token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Text as it appears in the (lowercased) input.
    pub surface: String,

    /// Lowercase form.
    pub lower: String,

    /// Dictionary base form.
    pub lemma: String,

    #[serde(default)]
    pub shape: ShapeClass,

    #[serde(default)]
    pub is_numeric: bool,

    #[serde(default)]
    pub is_punctuation: bool,
}

impl Token {
    /// Create a word token with an explicit lemma.
    #[must_use]
    pub fn word(surface: impl Into<String>, lemma: impl Into<String>) -> Self {
        let surface = surface.into();
        Self {
            lower: surface.to_lowercase(),
            shape: ShapeClass::classify(&surface),
            lemma: lemma.into(),
            surface,
            is_numeric: false,
            is_punctuation: false,
        }
    }

    /// Create a numeric token; the lemma is the surface itself.
    #[must_use]
    pub fn number(surface: impl Into<String>) -> Self {
        let mut token = Self::literal(surface);
        token.is_numeric = true;
        token
    }

    /// Create a punctuation token.
    #[must_use]
    pub fn punct(surface: impl Into<String>) -> Self {
        let mut token = Self::literal(surface);
        token.is_punctuation = true;
        token
    }

    /// Create a token whose lemma equals its surface.
    #[must_use]
    pub fn literal(surface: impl Into<String>) -> Self {
        let surface = surface.into();
        Self::word(surface.clone(), surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_time_shapes() {
        assert_eq!(ShapeClass::classify("23:00"), ShapeClass::TwoDigitColon);
        assert_eq!(ShapeClass::classify("9:00"), ShapeClass::OneDigitColon);
        assert_eq!(ShapeClass::classify("23.00"), ShapeClass::TwoDigitDot);
        assert_eq!(ShapeClass::classify("9.00"), ShapeClass::OneDigitDot);
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(ShapeClass::classify("10"), ShapeClass::Other);
        assert_eq!(ShapeClass::classify("123:00"), ShapeClass::Other);
        assert_eq!(ShapeClass::classify("база"), ShapeClass::Other);
        assert_eq!(ShapeClass::classify("10,50"), ShapeClass::Other);
        assert!(!ShapeClass::Other.is_time());
    }

    #[test]
    fn test_token_constructors() {
        let number = Token::number("10,5");
        assert!(number.is_numeric);
        assert!(!number.is_punctuation);
        assert_eq!(number.lemma, "10,5");

        let word = Token::word("базу", "база");
        assert_eq!(word.lower, "базу");
        assert_eq!(word.lemma, "база");

        assert!(Token::punct("%").is_punctuation);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_token_serialization() {
        let token = Token::literal("17:00");
        let json = serde_json::to_string(&token).expect("token should serialize");
        assert!(json.contains(r#""shape":"dd:dd""#));

        let deserialized: Token = serde_json::from_str(&json).expect("valid JSON should deserialize");
        assert_eq!(deserialized, token);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_token_deserialization_defaults() {
        let json = r#"{"surface":"на","lower":"на","lemma":"на","shape":"xx"}"#;
        let token: Token = serde_json::from_str(json).expect("valid JSON should deserialize");
        assert_eq!(token.shape, ShapeClass::Other);
        assert!(!token.is_numeric);
        assert!(!token.is_punctuation);
    }
}
