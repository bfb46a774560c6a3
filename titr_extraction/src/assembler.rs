//! Aggregation of built directives into an [`ExtractionResult`].

use titr_core::{BasalChangeDirective, CarbRatioDirective, ExtractionResult};

/// Collects directives in document order.
///
/// With duplicates disallowed, a directive equal to one already collected in
/// the same category is dropped and the first occurrence kept.
pub struct ResultAssembler {
    allow_duplicates: bool,
    result: ExtractionResult,
}

impl ResultAssembler {
    pub fn new(allow_duplicates: bool) -> Self {
        Self {
            allow_duplicates,
            result: ExtractionResult::default(),
        }
    }

    pub fn push_basal(&mut self, directive: BasalChangeDirective) {
        push_unique(&mut self.result.basal_changes, directive, self.allow_duplicates);
    }

    pub fn push_carb_ratio(&mut self, directive: CarbRatioDirective) {
        push_unique(&mut self.result.carb_ratio_changes, directive, self.allow_duplicates);
    }

    /// Correction factors are never populated; the list is always empty.
    pub fn finish(self) -> ExtractionResult {
        self.result
    }
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T, allow_duplicates: bool) {
    if allow_duplicates || !items.contains(&item) {
        items.push(item);
    }
}
