//! Script pipeline variants.
//!
//! Two strategies produce a [`ScriptDraft`] behind one interface: the
//! segmented pipeline (introduction, one section per segment prompt,
//! conclusion) and the short-form pipeline (hook, insight, takeaway). Both
//! generate sequentially with sliding context, so later sections can refer
//! to text generated moments earlier.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::app::AppContext;
use crate::app::pipeline::script;
use crate::domain::script::{CONTEXT_WINDOW_CHARS, segment_sentinel, trailing_chars};
use crate::domain::{AppError, PromptBundle, PromptContext, ScriptDraft, TemplateRenderer};
use crate::ports::{ChatMessage, CompletionClient, CompletionRequest};

const SHORT_FORM_TEMPERATURE: f64 = 0.7;
const HOOK_MAX_TOKENS: u32 = 300;
const INSIGHT_MAX_TOKENS: u32 = 800;
const TAKEAWAY_MAX_TOKENS: u32 = 300;

/// Which script pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineVariant {
    /// Introduction, N segments, conclusion (the canonical default).
    #[default]
    Segmented,
    /// Hook, insight, takeaway.
    ShortForm,
}

impl PipelineVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineVariant::Segmented => "segmented",
            PipelineVariant::ShortForm => "short-form",
        }
    }
}

/// Inbound request for script generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptRequest {
    pub prompts: PromptBundle,
    pub topic: String,
    /// Episode duration in minutes.
    pub duration: u32,
    /// Number of speakers.
    pub member_count: u32,
}

impl ScriptRequest {
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

/// Strategy interface over the two pipeline variants.
pub trait ScriptPipeline<C: CompletionClient, R: TemplateRenderer> {
    fn variant(&self) -> PipelineVariant;

    fn generate(
        &self,
        ctx: &AppContext<C, R>,
        request: &ScriptRequest,
    ) -> Result<ScriptDraft, AppError>;
}

/// Select the strategy for a variant.
pub fn pipeline_for<C: CompletionClient, R: TemplateRenderer>(
    variant: PipelineVariant,
) -> Box<dyn ScriptPipeline<C, R>> {
    match variant {
        PipelineVariant::Segmented => Box::new(SegmentedPipeline),
        PipelineVariant::ShortForm => Box::new(ShortFormPipeline),
    }
}

/// Canonical intro/segments/conclusion strategy.
pub struct SegmentedPipeline;

impl<C: CompletionClient, R: TemplateRenderer> ScriptPipeline<C, R> for SegmentedPipeline {
    fn variant(&self) -> PipelineVariant {
        PipelineVariant::Segmented
    }

    fn generate(
        &self,
        ctx: &AppContext<C, R>,
        request: &ScriptRequest,
    ) -> Result<ScriptDraft, AppError> {
        script::execute(ctx, &request.prompts, &request.topic, request.member_count)
    }
}

/// Hook/insight/takeaway strategy for short-form episodes.
///
/// The three prompts come from compact templates parameterized by topic; the
/// prompt bundle's segment prompts are not used. Sentinel recording and the
/// incomplete-script post-check match the segmented pipeline.
pub struct ShortFormPipeline;

impl<C: CompletionClient, R: TemplateRenderer> ScriptPipeline<C, R> for ShortFormPipeline {
    fn variant(&self) -> PipelineVariant {
        PipelineVariant::ShortForm
    }

    fn generate(
        &self,
        ctx: &AppContext<C, R>,
        request: &ScriptRequest,
    ) -> Result<ScriptDraft, AppError> {
        let context = PromptContext::new().with("topic", &request.topic);
        let system_prompt = ctx.render_template(
            "script_system",
            &PromptContext::new()
                .with("topic", &request.topic)
                .with("member_count", request.member_count),
        )?;

        let hook_prompt = ctx.render_template("hook", &context)?;
        let hook = short_form_section(ctx, &system_prompt, hook_prompt, "hook", HOOK_MAX_TOKENS)
            .unwrap_or_default();

        let insight_prompt = with_tail(&hook, ctx.render_template("insight", &context)?);
        let insight =
            short_form_section(ctx, &system_prompt, insight_prompt, "insight", INSIGHT_MAX_TOKENS)
                .unwrap_or_else(|_| segment_sentinel(0));

        let takeaway_prompt = with_tail(&insight, ctx.render_template("takeaway", &context)?);
        let takeaway = short_form_section(
            ctx,
            &system_prompt,
            takeaway_prompt,
            "takeaway",
            TAKEAWAY_MAX_TOKENS,
        )
        .unwrap_or_default();

        let draft = ScriptDraft { introduction: hook, segments: vec![insight], conclusion: takeaway };
        let incomplete = draft.incomplete_sections();
        if !incomplete.is_empty() {
            return Err(AppError::IncompleteScript(incomplete.join(", ")));
        }
        Ok(draft)
    }
}

fn with_tail(previous: &str, prompt: String) -> String {
    let tail = trailing_chars(previous, CONTEXT_WINDOW_CHARS);
    if tail.is_empty() {
        return prompt;
    }
    format!("The script so far ends with:\n\n{tail}\n\nContinue naturally from there.\n\n{prompt}")
}

fn short_form_section<C: CompletionClient, R: TemplateRenderer>(
    ctx: &AppContext<C, R>,
    system_prompt: &str,
    user_prompt: String,
    label: &str,
    max_tokens: u32,
) -> Result<String, AppError> {
    let request = CompletionRequest::new(
        ctx.model(),
        label,
        vec![ChatMessage::system(system_prompt), ChatMessage::user(user_prompt)],
        SHORT_FORM_TEMPERATURE,
        max_tokens,
    );

    let text = ctx.client().complete(request)?;
    if text.trim().is_empty() {
        return Err(AppError::upstream(
            format!("{label} came back empty"),
            None,
            crate::domain::UpstreamErrorKind::EmptyResponse,
        ));
    }
    Ok(text)
}
