//! Conversion of pattern matches into typed directives.

use titr_core::{
    BasalChangeDirective, CarbRatioDirective, DEFAULT_TIME_SEGMENT, ExtractionError, MealTime,
    Result, Token,
};

use crate::context::TimeSegmentContext;
use crate::matcher::Match;
use crate::patterns::{ChangeDirection, PatternId};

const VERB_OFFSET: usize = 0;
const PERCENT_OFFSET: usize = 3;
const MEAL_OFFSET: usize = 2;

/// Parse a numeric token surface, accepting `,` as the decimal separator.
///
/// Returns `None` for anything that is not a finite number. The sign is kept;
/// magnitudes are checked by the builder.
#[must_use]
pub fn parse_number(surface: &str) -> Option<f64> {
    surface
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Builds directives for one extraction, against one resolved context.
pub struct DirectiveBuilder<'a> {
    tokens: &'a [Token],
    time_segment: String,
}

impl<'a> DirectiveBuilder<'a> {
    #[must_use]
    pub fn new(tokens: &'a [Token], context: Option<&TimeSegmentContext>) -> Self {
        Self {
            tokens,
            time_segment: context
                .map_or_else(|| DEFAULT_TIME_SEGMENT.to_string(), ToString::to_string),
        }
    }

    /// Time segment attached to every basal change.
    #[must_use]
    pub fn time_segment(&self) -> &str {
        &self.time_segment
    }

    pub fn basal_change(&self, m: &Match) -> Result<BasalChangeDirective> {
        let pattern = Self::expect_pattern(m, PatternId::BasalChange)?;

        let verb = self.token(m, VERB_OFFSET)?;
        let direction = ChangeDirection::from_lemma(&verb.lemma).ok_or_else(|| {
            ExtractionError::malformed(
                pattern,
                m.span.start + VERB_OFFSET,
                format!("'{}' is not a known change verb", verb.lemma),
            )
        })?;

        let magnitude = self.number(m, PERCENT_OFFSET)?;

        Ok(BasalChangeDirective {
            time_segment: self.time_segment.clone(),
            change_percent: direction.apply(magnitude),
        })
    }

    pub fn carb_ratio(&self, m: &Match) -> Result<CarbRatioDirective> {
        let pattern = Self::expect_pattern(m, PatternId::CarbRatioChange)?;

        let meal = self.token(m, MEAL_OFFSET)?;
        let meal_time = MealTime::from_lemma(&meal.lemma).ok_or_else(|| {
            ExtractionError::malformed(
                pattern,
                m.span.start + MEAL_OFFSET,
                format!("'{}' is not a known meal", meal.lemma),
            )
        })?;

        // In "1:10" notation only the last number is the ratio.
        let last = m.span.len().checked_sub(1).ok_or_else(|| {
            ExtractionError::malformed(pattern, m.span.start, "empty match span")
        })?;
        let value = self.number(m, last)?;

        Ok(CarbRatioDirective { meal_time, value })
    }

    fn expect_pattern(m: &Match, expected: PatternId) -> Result<&'static str> {
        if m.pattern == expected {
            Ok(expected.as_str())
        } else {
            Err(ExtractionError::malformed(
                expected.as_str(),
                m.span.start,
                format!("got a {} match", m.pattern),
            ))
        }
    }

    fn token(&self, m: &Match, offset: usize) -> Result<&'a Token> {
        m.tokens(self.tokens).get(offset).ok_or_else(|| {
            ExtractionError::malformed(
                m.pattern.as_str(),
                m.span.start + offset,
                "match span is shorter than its pattern",
            )
        })
    }

    fn number(&self, m: &Match, offset: usize) -> Result<f64> {
        let token = self.token(m, offset)?;
        let index = m.span.start + offset;
        if !token.is_numeric {
            return Err(ExtractionError::malformed(
                m.pattern.as_str(),
                index,
                format!("'{}' is not flagged numeric", token.surface),
            ));
        }
        let value = parse_number(&token.surface).ok_or_else(|| {
            ExtractionError::malformed(
                m.pattern.as_str(),
                index,
                format!("numeric token '{}' does not parse as a number", token.surface),
            )
        })?;
        // The change direction comes from the verb alone.
        if value.is_sign_negative() {
            return Err(ExtractionError::malformed(
                m.pattern.as_str(),
                index,
                format!("negative magnitude '{}'", token.surface),
            ));
        }
        Ok(value)
    }
}
