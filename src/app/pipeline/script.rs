//! Section-by-section script generation with sliding context.
//!
//! Each section is conditioned on the trailing characters of the previous
//! section's text, which keeps conversational continuity with a bounded
//! prompt size regardless of how long the script grows. A segment that fails
//! after retries is recorded as a sentinel and generation continues; the
//! post-check still rejects the whole draft. The sentinel is diagnostic, not
//! a recovery path.

use crate::app::AppContext;
use crate::domain::script::{CONTEXT_WINDOW_CHARS, segment_sentinel, trailing_chars};
use crate::domain::{AppError, PromptBundle, PromptContext, ScriptDraft, TemplateRenderer};
use crate::ports::{ChatMessage, CompletionClient, CompletionRequest};

const INTRO_MAX_TOKENS: u32 = 500;
const SEGMENT_MAX_TOKENS: u32 = 1000;
const CONCLUSION_MAX_TOKENS: u32 = 500;
const SECTION_TEMPERATURE: f64 = 0.7;

/// Generate a full script draft from a prompt bundle.
pub fn execute<C: CompletionClient, R: TemplateRenderer>(
    ctx: &AppContext<C, R>,
    bundle: &PromptBundle,
    topic: &str,
    member_count: u32,
) -> Result<ScriptDraft, AppError> {
    let missing = bundle.missing_script_fields();
    if !missing.is_empty() {
        return Err(AppError::MissingPromptFields {
            fields: missing.into_iter().map(str::to_string).collect(),
        });
    }

    let system_prompt = ctx.render_template(
        "script_system",
        &PromptContext::new().with("topic", topic).with("member_count", member_count),
    )?;

    let introduction = generate_section(
        ctx,
        &system_prompt,
        bundle.intro_prompt.clone(),
        "introduction",
        INTRO_MAX_TOKENS,
    )
    .unwrap_or_default();

    let mut segments = Vec::with_capacity(bundle.segment_prompts.len());
    for (index, segment_prompt) in bundle.segment_prompts.iter().enumerate() {
        let previous = segments.last().unwrap_or(&introduction);
        let prompt = with_continuity(previous, segment_prompt);

        // Segment failures are independent: record the sentinel and keep
        // going so sibling segments still get generated.
        let text = generate_section(
            ctx,
            &system_prompt,
            prompt,
            &format!("segment {}", index + 1),
            SEGMENT_MAX_TOKENS,
        )
        .unwrap_or_else(|_| segment_sentinel(index));
        segments.push(text);
    }

    let last_section = segments.last().unwrap_or(&introduction);
    let conclusion = generate_section(
        ctx,
        &system_prompt,
        with_continuity(last_section, &bundle.conclusion_prompt),
        "conclusion",
        CONCLUSION_MAX_TOKENS,
    )
    .unwrap_or_default();

    let draft = ScriptDraft { introduction, segments, conclusion };
    let incomplete = draft.incomplete_sections();
    if !incomplete.is_empty() {
        return Err(AppError::IncompleteScript(incomplete.join(", ")));
    }

    Ok(draft)
}

fn with_continuity(previous_section: &str, prompt: &str) -> String {
    let tail = trailing_chars(previous_section, CONTEXT_WINDOW_CHARS);
    if tail.is_empty() {
        return prompt.to_string();
    }
    format!(
        "The script so far ends with:\n\n{tail}\n\nContinue naturally from there.\n\n{prompt}"
    )
}

fn generate_section<C: CompletionClient, R: TemplateRenderer>(
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
        SECTION_TEMPERATURE,
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
