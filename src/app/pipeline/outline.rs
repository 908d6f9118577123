//! Staged outline generation: research, then outline, then engagement hooks.
//!
//! Stages run strictly in sequence; each interpolates the previous stage's
//! full output into its prompt. A stage that returns empty text aborts the
//! whole run, so callers never see a partial outline.

use serde::{Deserialize, Serialize};

use crate::app::AppContext;
use crate::domain::outline::{CLOSING_MINUTES, OPENING_MINUTES};
use crate::domain::{
    AppError, OutlineResult, PromptContext, SuggestedStructure, TemplateRenderer,
};
use crate::ports::{ChatMessage, CompletionClient, CompletionRequest};

/// Per-stage generation parameters. Fixed by design, not caller-configurable.
struct StageParams {
    name: &'static str,
    template: &'static str,
    temperature: f64,
    max_tokens: u32,
}

const RESEARCH: StageParams =
    StageParams { name: "research", template: "research", temperature: 0.7, max_tokens: 1000 };
const OUTLINE: StageParams =
    StageParams { name: "outline", template: "outline", temperature: 0.8, max_tokens: 2000 };
const HOOKS: StageParams =
    StageParams { name: "hooks", template: "hooks", temperature: 0.8, max_tokens: 1000 };

/// Inbound request for outline generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineRequest {
    pub topic: String,
    /// Episode duration in minutes.
    pub duration: u32,
    /// Number of speakers.
    pub member_count: u32,
}

impl OutlineRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.topic.trim().is_empty() {
            return Err(AppError::validation("topic must not be empty"));
        }
        if self.member_count == 0 {
            return Err(AppError::validation("member_count must be at least 1"));
        }
        Ok(())
    }
}

/// Run the three-stage outline pipeline.
pub fn execute<C: CompletionClient, R: TemplateRenderer>(
    ctx: &AppContext<C, R>,
    request: &OutlineRequest,
) -> Result<OutlineResult, AppError> {
    request.validate()?;
    let structure = SuggestedStructure::for_duration(request.duration)?;

    let base_context = PromptContext::new()
        .with("topic", &request.topic)
        .with("duration", request.duration)
        .with("member_count", request.member_count)
        .with("opening_minutes", OPENING_MINUTES)
        .with("closing_minutes", CLOSING_MINUTES)
        .with("main_minutes", request.duration - OPENING_MINUTES - CLOSING_MINUTES);

    let research = run_stage(ctx, &RESEARCH, base_context.clone())?;
    let outline = run_stage(ctx, &OUTLINE, base_context.clone().with("research", &research))?;
    let hooks = run_stage(ctx, &HOOKS, base_context.with("outline", &outline))?;

    Ok(OutlineResult { outline, research, hooks, suggested_structure: structure })
}

fn run_stage<C: CompletionClient, R: TemplateRenderer>(
    ctx: &AppContext<C, R>,
    params: &StageParams,
    context: PromptContext,
) -> Result<String, AppError> {
    let prompt = ctx.render_template(params.template, &context)?;
    let request = CompletionRequest::new(
        ctx.model(),
        format!("outline {} stage", params.name),
        vec![ChatMessage::user(prompt)],
        params.temperature,
        params.max_tokens,
    );

    let text = ctx.client().complete(request)?;
    if text.trim().is_empty() {
        return Err(AppError::StageFailure(params.name.to_string()));
    }
    Ok(text)
}
