//! Left-to-right token pattern matcher.
//!
//! Every pattern rescans the whole stream, so a scan costs O(N·P) for N
//! tokens and P pattern positions. Matches of different patterns may overlap.

use std::ops::Range;
use titr_core::Token;

use crate::patterns::{PatternDefinition, PatternId, PatternLibrary};

/// A successful pattern match: a half-open span into the token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub pattern: PatternId,
    pub span: Range<usize>,
}

impl Match {
    /// The matched tokens.
    #[must_use]
    pub fn tokens<'t>(&self, tokens: &'t [Token]) -> &'t [Token] {
        tokens.get(self.span.clone()).unwrap_or_default()
    }
}

impl PatternDefinition {
    /// Try to match this pattern starting exactly at `start`.
    ///
    /// An optional position consumes the current token only when its predicate
    /// holds; otherwise the next position is tried against the same token.
    #[must_use]
    pub fn match_at(&self, tokens: &[Token], start: usize) -> Option<Match> {
        let mut cursor = start;
        for position in &self.positions {
            match tokens.get(cursor) {
                Some(token) if position.holds(token) => cursor += 1,
                _ if position.optional => {}
                _ => return None,
            }
        }

        // A pattern made only of skipped optional positions matches nothing.
        (cursor > start).then(|| Match {
            pattern: self.id,
            span: start..cursor,
        })
    }

    /// Every match of this pattern, in document order.
    #[must_use]
    pub fn find_all(&self, tokens: &[Token]) -> Vec<Match> {
        (0..tokens.len())
            .filter_map(|start| self.match_at(tokens, start))
            .collect()
    }
}

impl PatternLibrary {
    /// Run every registered pattern over the stream.
    ///
    /// Results are ordered by start index; matches sharing a start keep the
    /// library's registration order.
    #[must_use]
    pub fn scan(&self, tokens: &[Token]) -> Vec<Match> {
        let mut matches: Vec<Match> = self
            .patterns()
            .iter()
            .flat_map(|pattern| pattern.find_all(tokens))
            .collect();
        matches.sort_by_key(|m| m.span.start);
        matches
    }
}
