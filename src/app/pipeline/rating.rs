//! Script rating: request a critique, parse it, and never block the
//! pipeline. Rating is best-effort telemetry; a failed call degrades to a
//! zeroed rating instead of propagating.

use crate::app::AppContext;
use crate::domain::{PromptContext, Rating, TemplateRenderer, parse_rating};
use crate::ports::{ChatMessage, CompletionClient, CompletionRequest};

// Low temperature for consistent scoring.
const RATING_TEMPERATURE: f64 = 0.3;
const RATING_MAX_TOKENS: u32 = 500;

/// Rate a finished script. Always returns a rating.
pub fn execute<C: CompletionClient, R: TemplateRenderer>(
    ctx: &AppContext<C, R>,
    full_script: &str,
    topic: &str,
    duration: u32,
) -> Rating {
    let context = PromptContext::new()
        .with("topic", topic)
        .with("duration", duration)
        .with("script", full_script);

    let prompt = match ctx.render_template("rating", &context) {
        Ok(prompt) => prompt,
        Err(error) => {
            eprintln!("Rating skipped (template error): {}", error);
            return Rating::default();
        }
    };

    let request = CompletionRequest::new(
        ctx.model(),
        "script rating",
        vec![ChatMessage::user(prompt)],
        RATING_TEMPERATURE,
        RATING_MAX_TOKENS,
    );

    match ctx.client().complete(request) {
        Ok(critique) => parse_rating(&critique),
        Err(error) => {
            eprintln!("Rating call failed, returning default rating: {}", error);
            Rating::default()
        }
    }
}
