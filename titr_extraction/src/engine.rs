//! Extraction engine for dosage-change directives.
//!
//! The engine lowercases the recommendation, has the annotator turn it into a
//! token stream, runs the pattern library over it and then builds directives
//! in two passes: the time-segment context is resolved first, and only then
//! are basal and carbohydrate-ratio matches turned into directives.

use titr_core::{Annotator, ExtractionResult, Result, Token};
use tracing::{debug, info};

use crate::assembler::ResultAssembler;
use crate::builder::DirectiveBuilder;
use crate::context::TimeSegmentContext;
use crate::patterns::{PatternId, PatternLibrary};

/// Configuration for the extraction engine.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExtractionConfig {
    /// Emit one directive per match even when identical directives repeat.
    #[serde(default = "default_allow_duplicates")]
    pub allow_duplicate_directives: bool,
}

const fn default_allow_duplicates() -> bool {
    true
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            allow_duplicate_directives: default_allow_duplicates(),
        }
    }
}

/// Extraction engine turning clinical recommendations into directives.
///
/// Holds no per-call state; concurrent calls on a shared engine are
/// independent.
pub struct ExtractionEngine<A> {
    annotator: A,
    library: &'static PatternLibrary,
    config: ExtractionConfig,
}

impl<A: Annotator> ExtractionEngine<A> {
    /// Create a new extraction engine over the built-in pattern library.
    pub fn new(annotator: A, config: ExtractionConfig) -> Self {
        let library = PatternLibrary::global();
        info!(
            "Extraction engine ready: {} patterns, allow_duplicate_directives={}",
            library.patterns().len(),
            config.allow_duplicate_directives
        );
        Self {
            annotator,
            library,
            config,
        }
    }

    /// Create an extraction engine with the default configuration.
    pub fn with_defaults(annotator: A) -> Self {
        Self::new(annotator, ExtractionConfig::default())
    }

    #[must_use]
    pub const fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract directives from free text.
    ///
    /// The annotator is called exactly once, on the lowercased text.
    ///
    /// # Errors
    /// Returns an error if annotation fails or the annotator produced a token
    /// stream that breaks the matcher's invariants.
    #[tracing::instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub fn extract(&self, text: &str) -> Result<ExtractionResult> {
        let lowered = text.to_lowercase();
        let tokens = self.annotator.annotate(&lowered)?;
        self.extract_tokens(&tokens)
    }

    /// Extract directives from an already annotated token stream.
    ///
    /// # Errors
    /// Returns `MalformedTokenStream` if a matched token violates the
    /// annotator contract.
    pub fn extract_tokens(&self, tokens: &[Token]) -> Result<ExtractionResult> {
        let matches = self.library.scan(tokens);
        debug!("{} tokens, {} pattern matches", tokens.len(), matches.len());

        let context = TimeSegmentContext::resolve(tokens, &matches)?;
        let builder = DirectiveBuilder::new(tokens, context.as_ref());

        let mut assembler = ResultAssembler::new(self.config.allow_duplicate_directives);
        for m in &matches {
            match m.pattern {
                PatternId::BasalChange => assembler.push_basal(builder.basal_change(m)?),
                PatternId::CarbRatioChange => assembler.push_carb_ratio(builder.carb_ratio(m)?),
                PatternId::TimeSegment => {}
            }
        }

        let result = assembler.finish();
        if result.is_empty() {
            debug!("No directives found");
        } else {
            debug!(
                "Extracted {} basal and {} carb ratio directives (time segment {})",
                result.basal_changes.len(),
                result.carb_ratio_changes.len(),
                builder.time_segment()
            );
        }
        Ok(result)
    }
}
