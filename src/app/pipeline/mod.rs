//! The script-generation pipeline: staged outline, prompt synthesis,
//! section-by-section generation, length enforcement, and rating.

pub mod length;
pub mod outline;
pub mod prompts;
pub mod rating;
pub mod script;
pub mod variants;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::AppContext;
use crate::domain::script::word_count;
use crate::domain::{AppError, Rating, ScriptDraft, TemplateRenderer};
use crate::ports::CompletionClient;

pub use outline::OutlineRequest;
pub use prompts::{PromptsOutput, PromptsRequest, PromptsSource};
pub use variants::{PipelineVariant, ScriptPipeline, ScriptRequest, pipeline_for};

/// Everything produced for one script request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptGenerationOutput {
    /// The generated sections before length enforcement.
    pub script: ScriptDraft,
    /// The final script text, after length enforcement.
    pub full_script: String,
    /// Word count of `full_script`.
    pub word_count: usize,
    pub target_word_count: usize,
    pub rating: Rating,
    pub variant: PipelineVariant,
    pub generated_at: DateTime<Utc>,
}

/// Run the full script pipeline: generate sections, enforce the target
/// length, and rate the result.
pub fn generate_script<C: CompletionClient, R: TemplateRenderer>(
    ctx: &AppContext<C, R>,
    request: &ScriptRequest,
    variant: PipelineVariant,
) -> Result<ScriptGenerationOutput, AppError> {
    request.validate()?;

    let pipeline = pipeline_for::<C, R>(variant);
    let draft = pipeline.generate(ctx, request)?;

    let target = ctx.config().length.target_word_count(request.duration);
    let full_script = length::ensure_minimum_length(
        ctx,
        draft.full_script(),
        &request.prompts,
        &request.topic,
        request.member_count,
        target,
    );

    let rating = rating::execute(ctx, &full_script, &request.topic, request.duration);

    Ok(ScriptGenerationOutput {
        word_count: word_count(&full_script),
        target_word_count: target,
        script: draft,
        full_script,
        rating,
        variant,
        generated_at: Utc::now(),
    })
}
