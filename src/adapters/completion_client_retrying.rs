//! Retry wrapper for completion API client operations.
//!
//! This is the only place backoff occurs; pipeline stages never retry
//! themselves.

use std::thread;
use std::time::Duration;

use crate::domain::{AppError, CompletionApiConfig, UpstreamErrorKind};
use crate::ports::{CompletionClient, CompletionRequest};

const DEFAULT_MAX_DELAY_MS: u64 = 30_000;
const RETRY_AFTER_TOKEN: &str = "retry_after_ms=";
const MAX_LOG_ERROR_CHARS: usize = 512;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn from_config(config: &CompletionApiConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay_ms: config.retry_delay_ms.max(1),
            max_delay_ms: DEFAULT_MAX_DELAY_MS.max(config.retry_delay_ms),
        }
    }

    #[cfg(test)]
    pub(crate) fn new(max_attempts: u32, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self { max_attempts, base_delay_ms, max_delay_ms }
    }

    /// Linear backoff: the wait after failed attempt n is n * base delay.
    /// A server-supplied retry_after_ms takes precedence, capped.
    fn delay_for_retry(&self, failed_attempt: u32, error: &AppError) -> Duration {
        if let Some(retry_after_ms) = extract_retry_after_ms(error) {
            return Duration::from_millis(retry_after_ms.min(self.max_delay_ms));
        }

        let backoff_ms =
            self.base_delay_ms.saturating_mul(failed_attempt as u64).min(self.max_delay_ms);
        Duration::from_millis(backoff_ms)
    }
}

pub struct RetryingCompletionClient {
    inner: Box<dyn CompletionClient>,
    policy: RetryPolicy,
}

impl RetryingCompletionClient {
    pub fn new(inner: Box<dyn CompletionClient>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl CompletionClient for RetryingCompletionClient {
    fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        let label = request.label.clone();
        let mut last_error: Option<AppError> = None;

        for attempt in 1..=self.policy.max_attempts {
            match self.inner.complete(request.clone()) {
                Ok(response) => return Ok(response),
                Err(error) => {
                    let retryable = is_retryable_error(&error);
                    let last_attempt = attempt == self.policy.max_attempts;

                    if !retryable {
                        return Err(error);
                    }
                    if last_attempt {
                        return Err(tag_with_label(error, &label, self.policy.max_attempts));
                    }

                    let delay = self.policy.delay_for_retry(attempt, &error);
                    let log_error = format_error_for_log(&error);
                    eprintln!(
                        "Completion call '{}' failed (attempt {}/{}): {}. Retrying in {} ms.",
                        label,
                        attempt,
                        self.policy.max_attempts,
                        log_error,
                        delay.as_millis()
                    );
                    last_error = Some(error);
                    thread::sleep(delay);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            AppError::upstream(
                format!("'{}' failed after retries", label),
                None,
                UpstreamErrorKind::Server,
            )
        }))
    }
}

fn tag_with_label(error: AppError, label: &str, attempts: u32) -> AppError {
    match error {
        AppError::Upstream { message, status, kind } => AppError::Upstream {
            message: format!("'{}' failed after {} attempts: {}", label, attempts, message),
            status,
            kind,
        },
        other => other,
    }
}

fn is_retryable_error(error: &AppError) -> bool {
    match error {
        AppError::Upstream { message, status, kind } => {
            match kind {
                UpstreamErrorKind::RateLimit
                | UpstreamErrorKind::Server
                | UpstreamErrorKind::Network
                | UpstreamErrorKind::EmptyResponse => return true,
                UpstreamErrorKind::Auth => {}
            }

            if status.is_some_and(|code| code == 429 || code == 408 || code >= 500) {
                return true;
            }

            let lower = message.to_ascii_lowercase();
            lower.contains("timeout")
                || lower.contains("timed out")
                || lower.contains("connect")
                || lower.contains("connection")
                || lower.contains("temporary")
        }
        _ => false,
    }
}

fn extract_retry_after_ms(error: &AppError) -> Option<u64> {
    let message = match error {
        AppError::Upstream { message, .. } => message,
        _ => return None,
    };

    let start = message.find(RETRY_AFTER_TOKEN)? + RETRY_AFTER_TOKEN.len();
    let tail = &message[start..];
    let digits: String = tail.chars().take_while(|ch| ch.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<u64>().ok()
}

fn format_error_for_log(error: &AppError) -> String {
    match error {
        AppError::Upstream { message, status, kind } => {
            let sanitized = sanitize_and_truncate_for_log(message);
            match status {
                Some(code) => format!("Upstream(kind={}, status={}): {}", kind.as_str(), code, sanitized),
                None => format!("Upstream(kind={}): {}", kind.as_str(), sanitized),
            }
        }
        _ => sanitize_and_truncate_for_log(&error.to_string()),
    }
}

fn sanitize_and_truncate_for_log(input: &str) -> String {
    let mut output = String::new();

    for (count, ch) in input.chars().enumerate() {
        if count >= MAX_LOG_ERROR_CHARS {
            break;
        }
        output.push(if ch.is_control() { ' ' } else { ch });
    }

    let mut compact = output.split_whitespace().collect::<Vec<_>>().join(" ");
    if input.chars().count() > MAX_LOG_ERROR_CHARS {
        compact.push_str(" [truncated]");
    }
    compact.trim().to_string()
}
