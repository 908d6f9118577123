//! Completion API client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{API_KEY_ENV, AppError, CompletionApiConfig, UpstreamErrorKind};
use crate::ports::{CompletionClient, CompletionRequest};

const DEFAULT_STATUS_MESSAGE: &str = "Completion API request failed";
const JSON_OBJECT_FORMAT: &str = "json_object";

/// HTTP transport for an OpenAI-compatible chat-completions API.
///
/// This client performs a single request per call. Retry behavior is implemented
/// by a dedicated retry wrapper adapter.
#[derive(Clone)]
pub struct HttpCompletionClient {
    api_key: String,
    api_url: Url,
    client: Client,
}

impl std::fmt::Debug for HttpCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCompletionClient")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpCompletionClient {
    /// Create a new HTTP client with the given API key and configuration.
    pub fn new(api_key: String, config: &CompletionApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AppError::upstream(
                    format!("Failed to create HTTP client: {}", e),
                    None,
                    UpstreamErrorKind::Network,
                )
            })?;

        Ok(Self { api_key, api_url: config.api_url.clone(), client })
    }

    /// Create from environment variable with custom configuration.
    pub fn from_env_with_config(config: &CompletionApiConfig) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AppError::EnvironmentVariableMissing(API_KEY_ENV.into()))?;

        Self::new(api_key, config)
    }

    fn send_request(&self, request: &ApiRequest) -> Result<String, AppError> {
        let response = self
            .client
            .post(self.api_url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .map_err(|e| {
                AppError::upstream(
                    format!("HTTP request failed: {}", e),
                    None,
                    UpstreamErrorKind::Network,
                )
            })?;

        let status = response.status();
        let retry_after_ms = response.headers().get(RETRY_AFTER).and_then(parse_retry_after_ms);
        let body_text = response.text().unwrap_or_default();

        if status.is_success() {
            let api_response: ApiResponse =
                serde_json::from_str(&body_text).map_err(|e| {
                    AppError::upstream(
                        format!("Failed to parse response: {}", e),
                        Some(status.as_u16()),
                        UpstreamErrorKind::Server,
                    )
                })?;

            let content = api_response
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .unwrap_or_default();

            if content.trim().is_empty() {
                return Err(AppError::upstream(
                    "Completion returned no content",
                    Some(status.as_u16()),
                    UpstreamErrorKind::EmptyResponse,
                ));
            }

            return Ok(content);
        }

        let mut message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status.as_u16() == 429 {
                "Rate limited".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        if let Some(value) = retry_after_ms {
            message.push_str(&format!(" (retry_after_ms={})", value));
        }

        Err(AppError::upstream(message, Some(status.as_u16()), classify_status(status.as_u16())))
    }
}

fn classify_status(status: u16) -> UpstreamErrorKind {
    match status {
        401 | 403 => UpstreamErrorKind::Auth,
        429 => UpstreamErrorKind::RateLimit,
        code if code >= 500 => UpstreamErrorKind::Server,
        _ => UpstreamErrorKind::Network,
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    temperature: f64,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ApiChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

fn parse_retry_after_ms(value: &HeaderValue) -> Option<u64> {
    let raw = value.to_str().ok()?.trim();
    let seconds = raw.parse::<u64>().ok()?;
    Some(seconds.saturating_mul(1000))
}

impl CompletionClient for HttpCompletionClient {
    fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        let api_request = ApiRequest {
            model: request.model,
            messages: request
                .messages
                .into_iter()
                .map(|m| ApiMessage { role: m.role.as_str(), content: m.content })
                .collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request
                .json_mode
                .then_some(ResponseFormat { format_type: JSON_OBJECT_FORMAT }),
        };

        self.send_request(&api_request)
    }
}
