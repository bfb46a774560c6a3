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

pub mod directive;
pub mod error;
pub mod token;

pub use directive::{
    BasalChangeDirective, CarbRatioDirective, CorrectionFactorDirective, DEFAULT_TIME_SEGMENT,
    ExtractionResult, MealTime,
};
pub use error::{AnnotateError, ExtractionError, Result};
pub use token::{ShapeClass, Token};

/// Natural-language annotator collaborator.
///
/// Turns raw text into an annotated token stream. The extraction engine calls
/// `annotate` at most once per extraction, always with lowercased text.
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> std::result::Result<Vec<Token>, AnnotateError>;
}

impl<A: Annotator + ?Sized> Annotator for &A {
    fn annotate(&self, text: &str) -> std::result::Result<Vec<Token>, AnnotateError> {
        (**self).annotate(text)
    }
}

impl<A: Annotator + ?Sized> Annotator for std::sync::Arc<A> {
    fn annotate(&self, text: &str) -> std::result::Result<Vec<Token>, AnnotateError> {
        (**self).annotate(text)
    }
}
