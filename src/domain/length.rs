//! Pure building blocks for the length-enforcement ladder.
//!
//! Everything here is deterministic text synthesis; the gateway-backed
//! expansion step lives in the pipeline layer. These helpers only ever append
//! content, so each escalation step is monotonically non-decreasing in word
//! count.

use crate::domain::prompts::PromptBundle;

/// Connector phrases rotated across padded dialogue lines.
pub const CONNECTOR_PHRASES: [&str; 6] = [
    "Building on that,",
    "Additionally,",
    "What's interesting here is that",
    "It's also worth noting that",
    "On a related note,",
    "To put that in context,",
];

/// Supplementary section titles, applied in order when the script is still
/// short after expansion.
pub const SUPPLEMENTARY_SECTIONS: [&str; 7] = [
    "Additional Perspectives",
    "Expert Insights",
    "Practical Applications",
    "Future Outlook",
    "Related Developments",
    "Historical Context",
    "Global Impact",
];

const MIN_POINT_CHARS: usize = 20;
const POINTS_PER_SECTION: usize = 4;

/// A generic question/answer/follow-up triple for the open-ended Q&A section.
#[derive(Debug, Clone)]
pub struct QaTriple {
    pub question: String,
    pub answer: String,
    pub follow_up: String,
}

/// Split the research and fact-check prompts into candidate key points:
/// sentence-sized fragments long enough to carry content.
pub fn extract_key_points(bundle: &PromptBundle) -> Vec<String> {
    let source = format!("{}\n{}", bundle.research_prompt, bundle.fact_check_prompt);
    source
        .split(['.', '\n', ';'])
        .map(str::trim)
        .filter(|fragment| fragment.len() >= MIN_POINT_CHARS)
        .map(ToOwned::to_owned)
        .collect()
}

/// Speaker label for a zero-based turn index, rotating across members.
pub fn speaker_label(turn: usize, member_count: u32) -> String {
    let members = member_count.max(1) as usize;
    format!("Speaker {}", turn % members + 1)
}

/// Render key points as additional dialogue lines, rotating connector phrases
/// and speakers. `start_turn` keeps the speaker rotation continuous across
/// multiple padded blocks.
pub fn render_padding_dialogue(points: &[String], member_count: u32, start_turn: usize) -> String {
    points
        .iter()
        .enumerate()
        .map(|(offset, point)| {
            let turn = start_turn + offset;
            let connector = CONNECTOR_PHRASES[turn % CONNECTOR_PHRASES.len()];
            format!(
                "{}: {} {}",
                speaker_label(turn, member_count),
                connector,
                ensure_sentence(point)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render one titled supplementary section from leftover points, reusing
/// points cyclically when the pool is exhausted.
pub fn render_supplementary_section(
    title: &str,
    points: &[String],
    section_index: usize,
    member_count: u32,
) -> String {
    let mut lines = vec![format!("## {title}")];
    if points.is_empty() {
        return lines.remove(0);
    }

    let start = section_index * POINTS_PER_SECTION;
    for offset in 0..POINTS_PER_SECTION {
        let point = &points[(start + offset) % points.len()];
        let turn = start + offset;
        let connector = CONNECTOR_PHRASES[turn % CONNECTOR_PHRASES.len()];
        lines.push(format!(
            "{}: {} {}",
            speaker_label(turn, member_count),
            connector,
            ensure_sentence(point)
        ));
    }
    lines.join("\n\n")
}

/// Fixed bank of ten generic Q&A triples parameterized by topic.
pub fn qa_bank(topic: &str) -> Vec<QaTriple> {
    let templates: [(&str, &str, &str); 10] = [
        (
            "What first drew people's attention to {topic}?",
            "It started gaining traction once the practical stakes became impossible to ignore, and early coverage turned a niche concern into a mainstream conversation.",
            "And that early attention shaped how the whole debate around {topic} is framed today.",
        ),
        (
            "What do newcomers most often get wrong about {topic}?",
            "The most common mistake is treating it as a single problem with a single fix, when in reality it spans several interconnected challenges.",
            "Which is why experts keep stressing nuance whenever {topic} comes up.",
        ),
        (
            "How has thinking about {topic} changed over the last decade?",
            "The conversation has moved from raising awareness toward concrete, measurable action, with much more attention on outcomes than on intentions.",
            "That shift tells you a lot about how mature the field around {topic} has become.",
        ),
        (
            "Who are the key players shaping {topic} right now?",
            "It's a mix of researchers, policymakers, and practitioners on the ground, each bringing a different lens and a different set of incentives.",
            "And the tension between those groups is part of what keeps {topic} moving.",
        ),
        (
            "What's the biggest open question around {topic}?",
            "Whether the current momentum can be sustained once the initial enthusiasm fades and the harder trade-offs have to be confronted directly.",
            "That's the question anyone following {topic} should keep an eye on.",
        ),
        (
            "How does {topic} affect everyday life?",
            "More than most people realize. The downstream effects show up in small decisions and costs that accumulate quietly over time.",
            "So even listeners who feel distant from {topic} are living with its consequences.",
        ),
        (
            "Are there success stories worth highlighting in {topic}?",
            "Absolutely. Several initiatives have moved from pilot projects to real scale, and they offer a template others are now copying.",
            "Those examples are the best argument that progress on {topic} is achievable.",
        ),
        (
            "What are the main obstacles still standing in the way of {topic}?",
            "Funding, coordination, and inertia. The technical pieces often exist already; aligning the people and institutions is the slow part.",
            "Which suggests the next breakthrough in {topic} may be organizational rather than technical.",
        ),
        (
            "Where can listeners learn more about {topic}?",
            "Start with the primary sources and the practitioners doing the work, rather than the loudest commentary around them.",
            "A little curiosity goes a long way with a subject like {topic}.",
        ),
        (
            "If you had to sum up {topic} in one sentence, what would it be?",
            "It's a story about trade-offs: every promising path forward asks something of us, and the interesting debates are about what we're willing to give.",
            "And that's exactly why {topic} makes for such a rich conversation.",
        ),
    ];

    templates
        .iter()
        .map(|(q, a, f)| QaTriple {
            question: q.replace("{topic}", topic),
            answer: a.replace("{topic}", topic),
            follow_up: f.replace("{topic}", topic),
        })
        .collect()
}

/// Render one Q&A exchange as dialogue across the available speakers.
pub fn render_qa_exchange(triple: &QaTriple, turn: usize, member_count: u32) -> String {
    format!(
        "{}: {}\n\n{}: {}\n\n{}: {}",
        speaker_label(turn, member_count),
        triple.question,
        speaker_label(turn + 1, member_count),
        triple.answer,
        speaker_label(turn, member_count),
        triple.follow_up
    )
}

fn ensure_sentence(fragment: &str) -> String {
    let trimmed = fragment.trim_end();
    if trimmed.ends_with(['.', '!', '?']) {
        trimmed.to_string()
    } else {
        format!("{trimmed}.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> PromptBundle {
        PromptBundle {
            research_prompt: "Investigate the scale of ocean plastic pollution. Quantify annual inflow from rivers. tiny".to_string(),
            structure_prompt: "Three acts.".to_string(),
            intro_prompt: "Welcome the audience.".to_string(),
            segment_prompts: vec!["Origins.".to_string()],
            fact_check_prompt: "Verify the tonnage figures against recent surveys.".to_string(),
            conclusion_prompt: "Close with action items.".to_string(),
        }
    }

    #[test]
    fn key_points_drop_short_fragments() {
        let points = extract_key_points(&bundle());
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.len() >= 20));
    }

    #[test]
    fn padding_rotates_speakers_and_connectors() {
        let points: Vec<String> =
            (0..3).map(|i| format!("Key point number {i} with enough substance")).collect();
        let dialogue = render_padding_dialogue(&points, 2, 0);
        assert!(dialogue.contains("Speaker 1: Building on that,"));
        assert!(dialogue.contains("Speaker 2: Additionally,"));
        assert!(dialogue.contains("Speaker 1: What's interesting here is that"));
    }

    #[test]
    fn padding_only_appends_words() {
        let points: Vec<String> = vec!["A reasonably substantial point".to_string()];
        let dialogue = render_padding_dialogue(&points, 1, 0);
        assert!(crate::domain::script::word_count(&dialogue) > 0);
    }

    #[test]
    fn supplementary_section_cycles_points() {
        let points: Vec<String> = vec!["Only one available point here".to_string()];
        let section = render_supplementary_section("Expert Insights", &points, 0, 2);
        assert!(section.starts_with("## Expert Insights"));
        // The single point is reused for all four lines.
        assert_eq!(section.matches("Only one available point here").count(), 4);
    }

    #[test]
    fn qa_bank_has_ten_topic_specific_entries() {
        let bank = qa_bank("ocean plastic");
        assert_eq!(bank.len(), 10);
        assert!(bank.iter().all(|t| t.question.contains("ocean plastic")
            || t.answer.contains("ocean plastic")
            || t.follow_up.contains("ocean plastic")));
    }

    #[test]
    fn qa_exchange_alternates_speakers() {
        let bank = qa_bank("solar power");
        let exchange = render_qa_exchange(&bank[0], 0, 2);
        assert!(exchange.contains("Speaker 1:"));
        assert!(exchange.contains("Speaker 2:"));
    }

    #[test]
    fn single_speaker_never_panics() {
        let bank = qa_bank("history");
        let exchange = render_qa_exchange(&bank[0], 5, 1);
        assert!(exchange.contains("Speaker 1:"));
        assert_eq!(speaker_label(7, 0), "Speaker 1");
    }
}
