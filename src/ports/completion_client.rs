//! Completion API client port definition.

use crate::domain::AppError;

/// Message role accepted by the completion API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

impl Role {
    /// Convert to API string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
        }
    }
}

/// One role-tagged message in a completion request.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user<S: Into<String>>(content: S) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// A single text-completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier.
    pub model: String,
    /// Ordered messages.
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Ask the API to return a JSON object.
    pub json_mode: bool,
    /// Short human-readable label for logs and error tagging
    /// (e.g. "outline research stage", "segment 2").
    pub label: String,
}

impl CompletionRequest {
    pub fn new<M: Into<String>, L: Into<String>>(
        model: M,
        label: L,
        messages: Vec<ChatMessage>,
        temperature: f64,
        max_tokens: u32,
    ) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature,
            max_tokens,
            json_mode: false,
            label: label.into(),
        }
    }

    pub fn with_json_mode(mut self) -> Self {
        self.json_mode = true;
        self
    }
}

/// Port for completion API operations.
pub trait CompletionClient {
    /// Execute a single completion call, returning the response text.
    fn complete(&self, request: CompletionRequest) -> Result<String, AppError>;
}

/// Mock client for running the pipeline without API calls.
///
/// Returns deterministic canned text sized to the request; JSON-mode requests
/// receive a well-formed prompt bundle so downstream stages keep working.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionClient;

impl CompletionClient for MockCompletionClient {
    fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        eprintln!(
            "[mock] {} ({} messages, temp {}, max {} tokens)",
            request.label,
            request.messages.len(),
            request.temperature,
            request.max_tokens
        );

        if request.json_mode {
            return Ok(sample_bundle_json());
        }

        let subject = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| first_line(&m.content))
            .unwrap_or_else(|| "the requested material".to_string());

        // Roughly one sentence per 40 requested tokens keeps mock output
        // proportional to what the real API would return.
        let sentences = (request.max_tokens / 40).max(3);
        let body: Vec<String> = (0..sentences)
            .map(|i| {
                format!(
                    "Mock line {} for {}: generated at {} to stand in for model output.",
                    i + 1,
                    request.label,
                    chrono::Utc::now().format("%Y-%m-%d")
                )
            })
            .collect();

        Ok(format!("Mock response covering: {}\n\n{}", subject, body.join(" ")))
    }
}

fn first_line(text: &str) -> String {
    let line = text.lines().next().unwrap_or("").trim();
    let truncated: String = line.chars().take(80).collect();
    truncated
}

fn sample_bundle_json() -> String {
    serde_json::json!({
        "researchPrompt": "Research the topic thoroughly: key facts, recent developments, and the figures listeners will want to hear.",
        "structurePrompt": "Structure the episode as a guided conversation: context first, then the core story, then what comes next.",
        "introPrompt": "Open the episode warmly, introduce the hosts, and frame why this topic matters right now.",
        "segmentPrompts": [
            "Explore how the topic emerged and the forces that shaped it.",
            "Discuss where things stand today, with concrete examples and numbers."
        ],
        "factCheckPrompt": "Re-examine every factual claim in the script and flag anything that needs a source.",
        "conclusionPrompt": "Summarize the main threads and leave listeners with one actionable takeaway."
    })
    .to_string()
}
