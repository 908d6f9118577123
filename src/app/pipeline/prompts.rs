//! Structured prompt synthesis: one JSON-mode call, validated into a bundle.

use serde::{Deserialize, Serialize};

use crate::adapters::assets::SAMPLE_PROMPTS_JSON;
use crate::app::AppContext;
use crate::domain::{AppError, PromptBundle, PromptContext, TemplateRenderer};
use crate::ports::{ChatMessage, CompletionClient, CompletionRequest};

const SYNTHESIS_TEMPERATURE: f64 = 0.7;
const SYNTHESIS_MAX_TOKENS: u32 = 2000;
const DEFAULT_SEGMENT_COUNT: u32 = 2;

/// Inbound request for prompt synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsRequest {
    pub topic: String,
    pub mood: String,
    /// Episode duration in minutes.
    pub duration: u32,
}

impl PromptsRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.topic.trim().is_empty() {
            return Err(AppError::validation("topic must not be empty"));
        }
        Ok(())
    }
}

/// Where a returned bundle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptsSource {
    Generated,
    Fallback,
}

/// A synthesized bundle plus its provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsOutput {
    pub bundle: PromptBundle,
    pub source: PromptsSource,
}

/// Synthesize a prompt bundle from topic, mood, and duration.
///
/// Structural problems in the model's response (malformed JSON, missing
/// fields) surface as errors; they indicate a contract violation, not
/// transience, and are not retried here.
pub fn execute<C: CompletionClient, R: TemplateRenderer>(
    ctx: &AppContext<C, R>,
    request: &PromptsRequest,
) -> Result<PromptBundle, AppError> {
    request.validate()?;

    let prompt = ctx.render_template(
        "prompt_synthesis",
        &PromptContext::new()
            .with("topic", &request.topic)
            .with("mood", &request.mood)
            .with("duration", request.duration)
            .with("segment_count", DEFAULT_SEGMENT_COUNT),
    )?;

    let completion = CompletionRequest::new(
        ctx.model(),
        "prompt synthesis",
        vec![ChatMessage::user(prompt)],
        SYNTHESIS_TEMPERATURE,
        SYNTHESIS_MAX_TOKENS,
    )
    .with_json_mode();

    let raw = ctx.client().complete(completion)?;
    PromptBundle::from_json(&raw)
}

/// Synthesize a bundle, falling back to the bundled sample when the upstream
/// is unreachable. The fallback is documented behavior, not silent failure:
/// the output's `source` says which path produced it.
pub fn execute_with_fallback<C: CompletionClient, R: TemplateRenderer>(
    ctx: &AppContext<C, R>,
    request: &PromptsRequest,
) -> Result<PromptsOutput, AppError> {
    match execute(ctx, request) {
        Ok(bundle) => Ok(PromptsOutput { bundle, source: PromptsSource::Generated }),
        Err(error @ AppError::Upstream { .. }) => {
            eprintln!("Prompt synthesis unreachable, using bundled sample: {}", error);
            let bundle = PromptBundle::from_json(SAMPLE_PROMPTS_JSON)?;
            Ok(PromptsOutput { bundle, source: PromptsSource::Fallback })
        }
        Err(other) => Err(other),
    }
}
