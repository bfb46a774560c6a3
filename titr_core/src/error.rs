use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Failure reported by an annotator implementation.
#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("Annotator unavailable: {0}")]
    Unavailable(String),

    #[error("Annotator rejected input: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The annotator broke the token contract the matcher relies on.
    #[error("Malformed token stream in {pattern} match at token {index}: {reason}")]
    MalformedTokenStream {
        pattern: &'static str,
        index: usize,
        reason: String,
    },

    #[error("Annotation failed: {0}")]
    Annotation(#[from] AnnotateError),
}

impl ExtractionError {
    pub fn malformed(pattern: &'static str, index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedTokenStream {
            pattern,
            index,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedTokenStream { .. })
    }
}
