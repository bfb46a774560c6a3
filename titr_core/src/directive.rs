//! Typed dosage-change directives and the extraction result.
//!
//! The serialized field names are a fixed contract with existing consumers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Time segment attached to basal changes when the text names none.
pub const DEFAULT_TIME_SEGMENT: &str = "00:00-24:00";

/// Meal a carbohydrate ratio applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum MealTime {
    Breakfast = 0,
    Lunch = 1,
    Dinner = 2,
}

impl MealTime {
    /// Returns the string representation of this meal.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }

    /// Canonicalize a meal lemma from clinical text (`завтрак`, `обед`, `ужин`).
    #[must_use]
    pub fn from_lemma(lemma: &str) -> Option<Self> {
        match lemma {
            "завтрак" => Some(Self::Breakfast),
            "обед" => Some(Self::Lunch),
            "ужин" => Some(Self::Dinner),
            _ => None,
        }
    }
}

impl fmt::Display for MealTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change of the basal rate, in percent, over a time segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasalChangeDirective {
    /// `HH:MM-HH:MM`, or [`DEFAULT_TIME_SEGMENT`].
    pub time_segment: String,

    /// Negative for a decrease, positive for an increase.
    pub change_percent: f64,
}

/// New carbohydrate ratio for a meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarbRatioDirective {
    pub meal_time: MealTime,
    pub value: f64,
}

/// Correction factor change.
///
/// Part of the output contract; nothing produces it yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionFactorDirective {
    pub time_segment: String,
    pub value: f64,
}

/// All directives found in one recommendation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub basal_changes: Vec<BasalChangeDirective>,
    pub carb_ratio_changes: Vec<CarbRatioDirective>,
    #[serde(default)]
    pub correction_factor_changes: Vec<CorrectionFactorDirective>,
}

impl ExtractionResult {
    /// True when the text contained no recognizable directive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.basal_changes.is_empty()
            && self.carb_ratio_changes.is_empty()
            && self.correction_factor_changes.is_empty()
    }

    /// Total number of directives across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.basal_changes.len() + self.carb_ratio_changes.len() + self.correction_factor_changes.len()
    }
}
