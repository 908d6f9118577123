//! Quality rating model and the two-variant critique parser.
//!
//! The model's critique is untrusted free text. Parsing tries a fenced JSON
//! block first, then falls back to keyword/number scanning. Neither path can
//! fail: missing data degrades to zeroed scores and empty feedback lists.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Category keywords, in reporting order.
pub const CATEGORY_KEYWORDS: [&str; 5] = ["content", "structure", "engagement", "clarity", "pacing"];

const MAX_SCORE: f64 = 5.0;
const MIN_FEEDBACK_CHARS: usize = 5;
const BULLET_MARKERS: [&str; 3] = ["-", "*", "\u{2022}"];

/// Per-category 1-5 scores (0 when absent from the critique).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub content: f64,
    pub structure: f64,
    pub engagement: f64,
    pub clarity: f64,
    pub pacing: f64,
}

impl CategoryScores {
    fn as_array(&self) -> [f64; 5] {
        [self.content, self.structure, self.engagement, self.clarity, self.pacing]
    }

    /// Mean of the five scores, rounded to one decimal.
    pub fn mean(&self) -> f64 {
        let sum: f64 = self.as_array().iter().sum();
        round_one_decimal(sum / 5.0)
    }

    fn clamped(self) -> Self {
        Self {
            content: clamp_score(self.content),
            structure: clamp_score(self.structure),
            engagement: clamp_score(self.engagement),
            clarity: clamp_score(self.clarity),
            pacing: clamp_score(self.pacing),
        }
    }
}

/// Strengths and suggested improvements pulled from the critique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

/// Structured quality rating of a finished script.
///
/// `overall` is always the mean of the category scores rounded to one
/// decimal, regardless of which parsing path produced the categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub overall: f64,
    pub categories: CategoryScores,
    pub feedback: Feedback,
}

impl Rating {
    fn from_parts(categories: CategoryScores, feedback: Feedback) -> Self {
        let categories = categories.clamped();
        Self { overall: categories.mean(), categories, feedback }
    }
}

/// Parse a free-text critique into a rating. First match wins: a fenced JSON
/// block if present and well formed, otherwise keyword heuristics.
pub fn parse_rating(text: &str) -> Rating {
    if let Some(rating) = try_parse_json_block(text) {
        return rating;
    }
    parse_by_heuristics(text)
}

fn try_parse_json_block(text: &str) -> Option<Rating> {
    let block = extract_fenced_block(text)?;
    let value: Value = serde_json::from_str(block.trim()).ok()?;
    let object = value.as_object()?;

    // Accept both nested {"categories": {...}} and flat top-level keys.
    let lookup = |key: &str| -> Option<f64> {
        object
            .get("categories")
            .and_then(|c| c.get(key))
            .or_else(|| object.get(key))
            .and_then(Value::as_f64)
    };

    let categories = CategoryScores {
        content: lookup("content").unwrap_or(0.0),
        structure: lookup("structure").unwrap_or(0.0),
        engagement: lookup("engagement").unwrap_or(0.0),
        clarity: lookup("clarity").unwrap_or(0.0),
        pacing: lookup("pacing").unwrap_or(0.0),
    };

    let string_list = |key: &str| -> Vec<String> {
        object
            .get("feedback")
            .and_then(|f| f.get(key))
            .or_else(|| object.get(key))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|s| s.len() > MIN_FEEDBACK_CHARS)
                    .map(ToOwned::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    };

    let feedback =
        Feedback { strengths: string_list("strengths"), improvements: string_list("improvements") };

    Some(Rating::from_parts(categories, feedback))
}

fn extract_fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    // Skip an optional language tag on the fence line.
    let body_start = after_fence.find('\n')?;
    let body = &after_fence[body_start + 1..];
    let close = body.find("```")?;
    Some(&body[..close])
}

fn parse_by_heuristics(text: &str) -> Rating {
    let lower = text.to_ascii_lowercase();

    let categories = CategoryScores {
        content: score_after_keyword(&lower, "content").unwrap_or(0.0),
        structure: score_after_keyword(&lower, "structure").unwrap_or(0.0),
        engagement: score_after_keyword(&lower, "engagement").unwrap_or(0.0),
        clarity: score_after_keyword(&lower, "clarity").unwrap_or(0.0),
        pacing: score_after_keyword(&lower, "pacing").unwrap_or(0.0),
    };

    let feedback = Feedback {
        strengths: bullet_lines_after(text, "strengths"),
        improvements: bullet_lines_after(text, "improvements"),
    };

    Rating::from_parts(categories, feedback)
}

/// Find the first number following `keyword`, e.g. "Content: 4.5/5" -> 4.5.
/// The search is bounded to the rest of the keyword's line.
fn score_after_keyword(lower_text: &str, keyword: &str) -> Option<f64> {
    let start = lower_text.find(keyword)? + keyword.len();
    let tail = &lower_text[start..];
    let line = tail.lines().next().unwrap_or("");

    let digits_start = line.find(|ch: char| ch.is_ascii_digit())?;
    let number: String = line[digits_start..]
        .chars()
        .take_while(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();
    number.parse::<f64>().ok()
}

/// Bullet lines following the first case-insensitive occurrence of `heading`.
/// Collection stops at the first non-blank line that is not a bullet.
fn bullet_lines_after(text: &str, heading: &str) -> Vec<String> {
    let lower = text.to_ascii_lowercase();
    let Some(start) = lower.find(heading) else {
        return Vec::new();
    };

    let tail = &text[start..];
    let mut items = Vec::new();

    for line in tail.lines().skip(1) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if items.is_empty() {
                continue;
            }
            break;
        }
        let Some(item) = strip_bullet(trimmed) else {
            break;
        };
        if item.len() > MIN_FEEDBACK_CHARS {
            items.push(item.to_string());
        }
    }

    items
}

fn strip_bullet(line: &str) -> Option<&str> {
    for marker in BULLET_MARKERS {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(rest.trim());
        }
    }
    // Numbered bullets: "1. point" or "2) point".
    let digits = line.chars().take_while(|ch| ch.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return Some(rest.trim());
        }
    }
    None
}

fn clamp_score(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, MAX_SCORE)
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
