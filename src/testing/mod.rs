//! Shared test doubles for pipeline tests.

use std::sync::{Arc, Mutex};

use crate::domain::{AppError, UpstreamErrorKind};
use crate::ports::{CompletionClient, CompletionRequest};

/// Client that replays a fixed sequence of responses.
pub(crate) struct ScriptedClient {
    responses: Mutex<Vec<Result<String, AppError>>>,
}

impl ScriptedClient {
    pub(crate) fn new(responses: Vec<Result<String, AppError>>) -> Self {
        Self { responses: Mutex::new(responses) }
    }
}

impl CompletionClient for ScriptedClient {
    fn complete(&self, _request: CompletionRequest) -> Result<String, AppError> {
        let mut guard = self.responses.lock().expect("responses lock poisoned");
        if guard.is_empty() {
            return Err(AppError::upstream(
                "test: unexpected extra call",
                Some(500),
                UpstreamErrorKind::Server,
            ));
        }
        guard.remove(0)
    }
}

/// Scripted client that also records the label and rendered prompt of every
/// call, for asserting on ordering and prompt contents.
pub(crate) struct RecordingClient {
    inner: ScriptedClient,
    pub(crate) labels: Arc<Mutex<Vec<String>>>,
    pub(crate) prompts: Arc<Mutex<Vec<String>>>,
}

impl RecordingClient {
    pub(crate) fn returning(responses: Vec<Result<String, AppError>>) -> Self {
        Self {
            inner: ScriptedClient::new(responses),
            labels: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl CompletionClient for RecordingClient {
    fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        self.labels.lock().expect("labels lock poisoned").push(request.label.clone());
        let combined =
            request.messages.iter().map(|m| m.content.as_str()).collect::<Vec<_>>().join("\n");
        self.prompts.lock().expect("prompts lock poisoned").push(combined);
        self.inner.complete(request)
    }
}
