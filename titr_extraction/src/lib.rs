#![warn(
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

mod assembler;
mod builder;
pub mod context;
pub mod engine;
pub mod matcher;
pub mod patterns;

pub use builder::{DirectiveBuilder, parse_number};
pub use context::TimeSegmentContext;
pub use engine::{ExtractionConfig, ExtractionEngine};
pub use matcher::Match;
pub use patterns::{
    ChangeDirection, PatternDefinition, PatternId, PatternLibrary, PositionConstraint, Predicate,
};
