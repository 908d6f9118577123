//! Outline domain models and section arithmetic.

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Minutes reserved for the opening section.
pub const OPENING_MINUTES: u32 = 3;
/// Minutes reserved for the closing section.
pub const CLOSING_MINUTES: u32 = 5;
/// Smallest duration that leaves at least one minute of main content.
pub const MIN_DURATION_MINUTES: u32 = OPENING_MINUTES + CLOSING_MINUTES + 1;

/// One named section of the suggested episode structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionAllocation {
    /// Section kind: "opening", "main", or "closing".
    #[serde(rename = "type")]
    pub kind: String,
    /// Allocated minutes.
    pub duration: u32,
}

/// Suggested time allocation across the episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedStructure {
    pub sections: Vec<SectionAllocation>,
}

impl SuggestedStructure {
    /// Compute the fixed opening/main/closing split for a requested duration.
    ///
    /// Durations below [`MIN_DURATION_MINUTES`] are rejected rather than
    /// clamped: clamping would break the guarantee that section durations sum
    /// to the requested duration.
    pub fn for_duration(duration: u32) -> Result<Self, AppError> {
        if duration < MIN_DURATION_MINUTES {
            return Err(AppError::DurationTooShort { min: MIN_DURATION_MINUTES, got: duration });
        }

        Ok(Self {
            sections: vec![
                SectionAllocation { kind: "opening".to_string(), duration: OPENING_MINUTES },
                SectionAllocation {
                    kind: "main".to_string(),
                    duration: duration - OPENING_MINUTES - CLOSING_MINUTES,
                },
                SectionAllocation { kind: "closing".to_string(), duration: CLOSING_MINUTES },
            ],
        })
    }

    pub fn total_minutes(&self) -> u32 {
        self.sections.iter().map(|s| s.duration).sum()
    }
}

/// Composite result of the staged outline pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineResult {
    /// Stage 2 output: the episode outline text.
    pub outline: String,
    /// Stage 1 output: the research brief.
    pub research: String,
    /// Stage 3 output: engagement hooks.
    pub hooks: String,
    pub suggested_structure: SuggestedStructure,
}
