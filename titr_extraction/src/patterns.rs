//! Token-sequence pattern definitions.
//!
//! A pattern is an ordered list of per-position constraints over token
//! attributes. The built-in library recognizes basal-rate changes,
//! carbohydrate-ratio changes and time segments in Russian clinical text.
//! It is built once and never mutated.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use titr_core::{ShapeClass, Token};

/// Verbs that lower the basal rate.
pub const DECREASE_VERBS: &[&str] = &["снизить", "уменьшить"];

/// Verbs that raise the basal rate.
pub const INCREASE_VERBS: &[&str] = &["повысить", "увеличить"];

const CHANGE_VERBS: &[&str] = &["снизить", "уменьшить", "повысить", "увеличить"];
const BASAL_NOUNS: &[&str] = &["база", "базальный"];
const RATIO_NOUNS: &[&str] = &["ук", "коэффициент"];
const MEAL_NOUNS: &[&str] = &["завтрак", "обед", "ужин"];
const SEGMENT_OPENERS: &[&str] = &["с", "от"];
const SEGMENT_CLOSERS: &[&str] = &["до", "по"];
const ON: &[&str] = &["на"];
const PERCENT: &[&str] = &["%"];

/// Identifier of a registered pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum PatternId {
    /// "снизить базу на 10 %"
    BasalChange = 0,
    /// "ук на завтрак 1:10"
    CarbRatioChange = 1,
    /// "с 23:00 до 6:00"
    TimeSegment = 2,
}

impl PatternId {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BasalChange => "BASAL_CHANGE",
            Self::CarbRatioChange => "CARB_RATIO_CHANGE",
            Self::TimeSegment => "TIME_SEGMENT",
        }
    }
}

impl FromStr for PatternId {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BASAL_CHANGE" => Ok(Self::BasalChange),
            "CARB_RATIO_CHANGE" => Ok(Self::CarbRatioChange),
            "TIME_SEGMENT" => Ok(Self::TimeSegment),
            _ => Err("unknown pattern id"),
        }
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a basal change, inferred from the verb lemma.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Increase,
    Decrease,
}

impl ChangeDirection {
    #[must_use]
    pub fn from_lemma(lemma: &str) -> Option<Self> {
        if DECREASE_VERBS.iter().any(|v| *v == lemma) {
            Some(Self::Decrease)
        } else if INCREASE_VERBS.iter().any(|v| *v == lemma) {
            Some(Self::Increase)
        } else {
            None
        }
    }

    /// Apply the direction to a non-negative magnitude.
    #[must_use]
    pub fn apply(self, magnitude: f64) -> f64 {
        match self {
            Self::Increase => magnitude,
            Self::Decrease => -magnitude,
        }
    }
}

/// A single attribute test on a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    LemmaIn(&'static [&'static str]),
    LowerIn(&'static [&'static str]),
    ShapeIn(&'static [ShapeClass]),
    IsNumeric,
    IsPunctuation,
}

impl Predicate {
    #[must_use]
    pub fn holds(&self, token: &Token) -> bool {
        match self {
            Self::LemmaIn(set) => set.iter().any(|s| *s == token.lemma),
            Self::LowerIn(set) => set.iter().any(|s| *s == token.lower),
            Self::ShapeIn(set) => set.contains(&token.shape),
            Self::IsNumeric => token.is_numeric,
            Self::IsPunctuation => token.is_punctuation,
        }
    }
}

/// One position of a pattern.
///
/// A token fills the position when every predicate holds; an empty set admits
/// any token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionConstraint {
    pub predicates: Vec<Predicate>,
    pub optional: bool,
}

impl PositionConstraint {
    #[must_use]
    pub const fn required(predicates: Vec<Predicate>) -> Self {
        Self {
            predicates,
            optional: false,
        }
    }

    #[must_use]
    pub const fn optional(predicates: Vec<Predicate>) -> Self {
        Self {
            predicates,
            optional: true,
        }
    }

    #[must_use]
    pub fn holds(&self, token: &Token) -> bool {
        self.predicates.iter().all(|p| p.holds(token))
    }
}

/// Ordered position constraints identified by a [`PatternId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternDefinition {
    pub id: PatternId,
    pub positions: Vec<PositionConstraint>,
}

impl PatternDefinition {
    #[must_use]
    pub const fn new(id: PatternId) -> Self {
        Self {
            id,
            positions: Vec::new(),
        }
    }

    /// Append a required single-predicate position.
    #[must_use]
    pub fn then(mut self, predicate: Predicate) -> Self {
        self.positions.push(PositionConstraint::required(vec![predicate]));
        self
    }

    /// Append an optional single-predicate position.
    #[must_use]
    pub fn maybe(mut self, predicate: Predicate) -> Self {
        self.positions.push(PositionConstraint::optional(vec![predicate]));
        self
    }

    /// Number of positions that must consume a token.
    #[must_use]
    pub fn required_len(&self) -> usize {
        self.positions.iter().filter(|p| !p.optional).count()
    }

    /// `verb base на <number> %`
    #[must_use]
    pub fn basal_change() -> Self {
        Self::new(PatternId::BasalChange)
            .then(Predicate::LemmaIn(CHANGE_VERBS))
            .then(Predicate::LemmaIn(BASAL_NOUNS))
            .then(Predicate::LowerIn(ON))
            .then(Predicate::IsNumeric)
            .then(Predicate::LowerIn(PERCENT))
    }

    /// `ук на <meal> [punct] <number>`
    #[must_use]
    pub fn carb_ratio_change() -> Self {
        Self::new(PatternId::CarbRatioChange)
            .then(Predicate::LowerIn(RATIO_NOUNS))
            .then(Predicate::LowerIn(ON))
            .then(Predicate::LemmaIn(MEAL_NOUNS))
            .maybe(Predicate::IsPunctuation)
            .then(Predicate::IsNumeric)
    }

    /// `с <time> до <time>`
    #[must_use]
    pub fn time_segment() -> Self {
        Self::new(PatternId::TimeSegment)
            .then(Predicate::LowerIn(SEGMENT_OPENERS))
            .then(Predicate::ShapeIn(&ShapeClass::TIME_SHAPES))
            .then(Predicate::LowerIn(SEGMENT_CLOSERS))
            .then(Predicate::ShapeIn(&ShapeClass::TIME_SHAPES))
    }
}

static DEFAULT_LIBRARY: Lazy<PatternLibrary> = Lazy::new(|| {
    PatternLibrary::new(vec![
        PatternDefinition::time_segment(),
        PatternDefinition::basal_change(),
        PatternDefinition::carb_ratio_change(),
    ])
});

/// Immutable registry of patterns, in registration order.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    patterns: Vec<PatternDefinition>,
}

impl PatternLibrary {
    #[must_use]
    pub const fn new(patterns: Vec<PatternDefinition>) -> Self {
        Self { patterns }
    }

    /// The process-wide built-in library.
    #[must_use]
    pub fn global() -> &'static Self {
        &DEFAULT_LIBRARY
    }

    #[must_use]
    pub fn patterns(&self) -> &[PatternDefinition] {
        &self.patterns
    }

    #[must_use]
    pub fn get(&self, id: PatternId) -> Option<&PatternDefinition> {
        self.patterns.iter().find(|p| p.id == id)
    }

    /// Total position count across all patterns.
    #[must_use]
    pub fn total_positions(&self) -> usize {
        self.patterns.iter().map(|p| p.positions.len()).sum()
    }
}
