//! The six-field prompt bundle that drives script generation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::AppError;

/// The six required keys, in the order they are validated and reported.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "researchPrompt",
    "structurePrompt",
    "introPrompt",
    "segmentPrompts",
    "factCheckPrompt",
    "conclusionPrompt",
];

/// Structured prompts for one episode: research, structure, intro, one prompt
/// per content segment, fact checking, and conclusion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptBundle {
    pub research_prompt: String,
    pub structure_prompt: String,
    pub intro_prompt: String,
    pub segment_prompts: Vec<String>,
    pub fact_check_prompt: String,
    pub conclusion_prompt: String,
}

impl PromptBundle {
    /// Parse a model response into a bundle, validating the required shape.
    ///
    /// Malformed JSON is a parse error carrying the raw text; a well-formed
    /// object missing any required key (or with a non-array `segmentPrompts`)
    /// is a validation error naming the offending field.
    pub fn from_json(raw: &str) -> Result<Self, AppError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| AppError::parse("prompt bundle", e.to_string(), raw))?;

        let object = value
            .as_object()
            .ok_or_else(|| AppError::validation("Prompt bundle must be a JSON object"))?;

        for field in REQUIRED_FIELDS {
            let entry = object
                .get(field)
                .ok_or_else(|| AppError::validation(format!("Missing required field: {field}")))?;

            if field == "segmentPrompts" {
                if !entry.is_array() {
                    return Err(AppError::validation("Field segmentPrompts must be an array"));
                }
            } else if entry.as_str().is_none_or(|text| text.trim().is_empty()) {
                return Err(AppError::validation(format!("Field {field} must be non-empty text")));
            }
        }

        serde_json::from_value(value)
            .map_err(|e| AppError::parse("prompt bundle", e.to_string(), raw))
    }

    /// Fields required by the section-by-section script generator that are
    /// absent or blank. `segmentPrompts` may legitimately be empty.
    pub fn missing_script_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.intro_prompt.trim().is_empty() {
            missing.push("introPrompt");
        }
        if self.conclusion_prompt.trim().is_empty() {
            missing.push("conclusionPrompt");
        }
        missing
    }
}
