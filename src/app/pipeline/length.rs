//! Length enforcement: escalate through padding, expansion, and synthesized
//! sections until the target word count is met or every source is exhausted.
//!
//! This step never fails and never shrinks the script. Falling short of the
//! target after exhausting every source is not an error; the product always
//! ships a usable script.

use crate::app::AppContext;
use crate::domain::length::{
    SUPPLEMENTARY_SECTIONS, extract_key_points, qa_bank, render_padding_dialogue,
    render_qa_exchange, render_supplementary_section,
};
use crate::domain::script::{SECTION_SEPARATOR, word_count};
use crate::domain::{PromptBundle, PromptContext, TemplateRenderer};
use crate::ports::{ChatMessage, CompletionClient, CompletionRequest};

const EXPANSION_TEMPERATURE: f64 = 0.7;
const EXPANSION_MAX_TOKENS: u32 = 4000;
const PADDING_TITLE: &str = "Further Discussion";
const QA_TITLE: &str = "Listener Questions";

/// Grow `script` until it reaches `target_words`, escalating through:
/// template padding, a gateway expansion call, supplementary sections, and
/// finally a generic Q&A section.
pub fn ensure_minimum_length<C: CompletionClient, R: TemplateRenderer>(
    ctx: &AppContext<C, R>,
    mut script: String,
    bundle: &PromptBundle,
    topic: &str,
    member_count: u32,
    target_words: usize,
) -> String {
    if word_count(&script) >= target_words {
        return script;
    }

    let points = extract_key_points(bundle);
    // Points already consumed by the generated segments don't get reused for
    // padding; everything beyond them is fair game.
    let used = bundle.segment_prompts.len().min(points.len());
    let leftover = &points[used..];

    // Step 1: template padding from unused key points.
    if !leftover.is_empty() {
        let padding = render_padding_dialogue(leftover, member_count, 0);
        script.push_str(SECTION_SEPARATOR);
        script.push_str(&format!("## {PADDING_TITLE}\n\n{padding}"));
        if word_count(&script) >= target_words {
            return script;
        }
    }

    // Step 2: ask the gateway to expand the whole script. The expansion is
    // adopted only if it comes back non-empty and at least as long as what
    // we already have.
    script = expand_via_gateway(ctx, script, topic, target_words);
    if word_count(&script) >= target_words {
        return script;
    }

    // Step 3: synthesized supplementary sections from the point pool.
    let pool: Vec<String> = if !leftover.is_empty() {
        leftover.to_vec()
    } else if !points.is_empty() {
        points.clone()
    } else {
        vec![format!("there is far more to {topic} than a single episode can cover")]
    };

    for (index, title) in SUPPLEMENTARY_SECTIONS.iter().enumerate() {
        script.push_str(SECTION_SEPARATOR);
        script.push_str(&render_supplementary_section(title, &pool, index, member_count));
        if word_count(&script) >= target_words {
            return script;
        }
    }

    // Step 4: open-ended Q&A from the fixed bank.
    script.push_str(SECTION_SEPARATOR);
    script.push_str(&format!("## {QA_TITLE}"));
    for (index, triple) in qa_bank(topic).iter().enumerate() {
        script.push_str("\n\n");
        script.push_str(&render_qa_exchange(triple, index * 2, member_count));
        if word_count(&script) >= target_words {
            return script;
        }
    }

    script
}

fn expand_via_gateway<C: CompletionClient, R: TemplateRenderer>(
    ctx: &AppContext<C, R>,
    script: String,
    topic: &str,
    target_words: usize,
) -> String {
    let context = PromptContext::new()
        .with("topic", topic)
        .with("target_word_count", target_words)
        .with("script", &script);

    let prompt = match ctx.render_template("expansion", &context) {
        Ok(prompt) => prompt,
        Err(error) => {
            eprintln!("Length expansion skipped (template error): {}", error);
            return script;
        }
    };

    let request = CompletionRequest::new(
        ctx.model(),
        "length expansion",
        vec![ChatMessage::user(prompt)],
        EXPANSION_TEMPERATURE,
        EXPANSION_MAX_TOKENS,
    );

    match ctx.client().complete(request) {
        Ok(expanded)
            if !expanded.trim().is_empty() && word_count(&expanded) >= word_count(&script) =>
        {
            expanded
        }
        Ok(_) => script,
        Err(error) => {
            eprintln!("Length expansion failed, keeping current script: {}", error);
            script
        }
    }
}
