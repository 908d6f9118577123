//! Script draft model: section join, word counting, sliding context.

use serde::{Deserialize, Serialize};

/// Canonical separator between script sections.
///
/// Joining introduction, segments, and conclusion with this separator always
/// reproduces `full_script` exactly.
pub const SECTION_SEPARATOR: &str = "\n\n---\n\n";

/// How many trailing characters of the previous section are fed into the next
/// section's prompt for continuity.
pub const CONTEXT_WINDOW_CHARS: usize = 500;

const SENTINEL_PREFIX: &str = "[ERROR";

/// A generated script: introduction, one text block per segment prompt, and a
/// conclusion. Segments are appended in order during generation and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptDraft {
    pub introduction: String,
    pub segments: Vec<String>,
    pub conclusion: String,
}

impl ScriptDraft {
    /// All sections joined with the canonical separator.
    pub fn full_script(&self) -> String {
        let mut sections = Vec::with_capacity(self.segments.len() + 2);
        sections.push(self.introduction.as_str());
        sections.extend(self.segments.iter().map(String::as_str));
        sections.push(self.conclusion.as_str());
        sections.join(SECTION_SEPARATOR)
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.full_script())
    }

    /// Sections that failed generation or came back empty. Non-empty result
    /// means the draft must be rejected as incomplete.
    pub fn incomplete_sections(&self) -> Vec<String> {
        let mut incomplete = Vec::new();
        if self.introduction.trim().is_empty() {
            incomplete.push("introduction".to_string());
        }
        for (index, segment) in self.segments.iter().enumerate() {
            if is_sentinel(segment) {
                incomplete.push(format!("segment {}", index + 1));
            }
        }
        if self.conclusion.trim().is_empty() {
            incomplete.push("conclusion".to_string());
        }
        incomplete
    }
}

/// Whitespace-delimited token count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// The trailing `max_chars` characters of `text`, split on a char boundary.
pub fn trailing_chars(text: &str, max_chars: usize) -> &str {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        return text;
    }
    let skip = char_count - max_chars;
    let (start, _) = text.char_indices().nth(skip).expect("skip is within bounds");
    &text[start..]
}

/// Placeholder recorded for a segment whose generation failed after retries.
/// Indices are reported 1-based.
pub fn segment_sentinel(index: usize) -> String {
    format!("[ERROR: FAILED TO GENERATE SEGMENT {}]", index + 1)
}

pub fn is_sentinel(text: &str) -> bool {
    text.trim_start().starts_with(SENTINEL_PREFIX)
}
