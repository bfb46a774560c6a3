//! Time-segment context resolution.
//!
//! At most one time window is resolved per extraction: the first
//! `TIME_SEGMENT` match in document order. Later segments are ignored and the
//! resolved window applies to every basal change in the input.

use std::fmt;
use titr_core::{ExtractionError, Result, Token};
use tracing::debug;

use crate::matcher::Match;
use crate::patterns::PatternId;

/// Offsets of the two clock-time tokens inside a `TIME_SEGMENT` span.
const START_OFFSET: usize = 1;
const END_OFFSET: usize = 3;

/// Resolved `HH:MM-HH:MM` window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSegmentContext {
    pub start: String,
    pub end: String,
}

impl TimeSegmentContext {
    /// Resolve the context from the first `TIME_SEGMENT` match, if any.
    ///
    /// `matches` must be in document order.
    pub fn resolve(tokens: &[Token], matches: &[Match]) -> Result<Option<Self>> {
        let Some(segment) = matches.iter().find(|m| m.pattern == PatternId::TimeSegment) else {
            return Ok(None);
        };

        let start = time_token(tokens, segment, START_OFFSET)?;
        let end = time_token(tokens, segment, END_OFFSET)?;
        let context = Self {
            start: normalize_time(&start.surface),
            end: normalize_time(&end.surface),
        };

        debug!(
            "Resolved time segment {} from tokens {:?}",
            context, segment.span
        );
        Ok(Some(context))
    }
}

impl fmt::Display for TimeSegmentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

fn time_token<'t>(tokens: &'t [Token], segment: &Match, offset: usize) -> Result<&'t Token> {
    let index = segment.span.start + offset;
    let token = segment
        .tokens(tokens)
        .get(offset)
        .ok_or_else(|| {
            ExtractionError::malformed(
                PatternId::TimeSegment.as_str(),
                index,
                "time segment span is shorter than its pattern",
            )
        })?;

    if !token.shape.is_time() {
        return Err(ExtractionError::malformed(
            PatternId::TimeSegment.as_str(),
            index,
            format!("'{}' does not have a clock-time shape", token.surface),
        ));
    }
    Ok(token)
}

/// Normalize a clock time to `HH:MM`: `.` becomes `:`, then the string is
/// left-padded with `0` up to five characters.
#[must_use]
pub fn normalize_time(raw: &str) -> String {
    let time = raw.replace('.', ":");
    format!("{time:0>5}")
}
