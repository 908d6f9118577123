use std::io;

use thiserror::Error;

/// Classifies why an upstream completion call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    /// Invalid or missing credentials (401/403).
    Auth,
    /// Quota exhausted or rate limited (429).
    RateLimit,
    /// Upstream server failure (5xx).
    Server,
    /// Transport-level failure (DNS, connect, timeout).
    Network,
    /// The call succeeded but returned no usable content.
    EmptyResponse,
}

impl UpstreamErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpstreamErrorKind::Auth => "auth",
            UpstreamErrorKind::RateLimit => "rate-limit",
            UpstreamErrorKind::Server => "server",
            UpstreamErrorKind::Network => "network",
            UpstreamErrorKind::EmptyResponse => "empty-response",
        }
    }
}

/// Library-wide error type for podgen operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration value is invalid.
    #[error("{0}")]
    InvalidConfig(String),

    /// Required environment variable is not set.
    #[error("Environment variable {0} is not set")]
    EnvironmentVariableMissing(String),

    /// Completion API call failed.
    #[error("Completion API error ({}): {message}", kind.as_str())]
    Upstream { message: String, status: Option<u16>, kind: UpstreamErrorKind },

    /// A staged generation step produced no usable text.
    #[error("Stage '{0}' produced no usable text")]
    StageFailure(String),

    /// Caller-supplied or model-returned structure does not match the required shape.
    #[error("{0}")]
    Validation(String),

    /// Prompt bundle is missing fields required for script generation.
    #[error("Prompt bundle is missing required fields: {}", fields.join(", "))]
    MissingPromptFields { fields: Vec<String> },

    /// Model response could not be parsed. Carries the raw text for diagnosis.
    #[error("Failed to parse {what}: {details}")]
    Parse { what: String, details: String, raw: String },

    /// One or more script sections failed after retries.
    #[error("Script generation incomplete: {0}")]
    IncompleteScript(String),

    /// Requested duration leaves no room for the main section.
    #[error("Duration must be at least {min} minutes to fit opening and closing sections, got {got}")]
    DurationTooShort { min: u32, got: u32 },

    /// Template rendering failed.
    #[error("Failed to render template '{template}': {reason}")]
    TemplateRender { template: String, reason: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl AppError {
    pub fn upstream<S: Into<String>>(message: S, status: Option<u16>, kind: UpstreamErrorKind) -> Self {
        AppError::Upstream { message: message.into(), status, kind }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    pub fn parse<W: Into<String>, D: Into<String>, R: Into<String>>(what: W, details: D, raw: R) -> Self {
        AppError::Parse { what: what.into(), details: details.into(), raw: raw.into() }
    }

    /// True for caller-side input problems (the CLI analogue of a 400).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::MissingPromptFields { .. }
                | AppError::DurationTooShort { .. }
                | AppError::InvalidConfig(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_display_includes_kind() {
        let err = AppError::upstream("rate limited", Some(429), UpstreamErrorKind::RateLimit);
        assert_eq!(err.to_string(), "Completion API error (rate-limit): rate limited");
    }

    #[test]
    fn missing_prompt_fields_lists_all_fields() {
        let err = AppError::MissingPromptFields {
            fields: vec!["introPrompt".to_string(), "conclusionPrompt".to_string()],
        };
        assert!(err.to_string().contains("introPrompt, conclusionPrompt"));
    }

    #[test]
    fn validation_classification() {
        assert!(AppError::DurationTooShort { min: 9, got: 5 }.is_validation());
        assert!(AppError::validation("topic must not be empty").is_validation());
        assert!(!AppError::StageFailure("research".to_string()).is_validation());
    }
}
