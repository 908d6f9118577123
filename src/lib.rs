//! podgen: generate podcast scripts through a staged LLM pipeline with
//! target-length enforcement and a best-effort quality rating.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

use adapters::{
    HttpCompletionClient, MinijinjaTemplateRenderer, RetryPolicy, RetryingCompletionClient,
};
use app::AppContext;
use ports::MockCompletionClient;

pub use app::pipeline::{
    OutlineRequest, PipelineVariant, PromptsOutput, PromptsRequest, PromptsSource,
    ScriptGenerationOutput, ScriptRequest,
};
pub use domain::{AppError, OutlineResult, PromptBundle, Rating, RunConfig, ScriptDraft};

/// Context wired with the HTTP transport behind the retry wrapper.
pub type DefaultContext = AppContext<RetryingCompletionClient, MinijinjaTemplateRenderer>;

/// Context wired with the mock client, for dry runs without API calls.
pub type MockContext = AppContext<MockCompletionClient, MinijinjaTemplateRenderer>;

/// Build a context backed by the real completion API.
///
/// The API key comes from the environment; retry policy and timeouts come
/// from the configuration.
pub fn build_context(config: RunConfig) -> Result<DefaultContext, AppError> {
    config.validate()?;
    let transport = HttpCompletionClient::from_env_with_config(&config.api)?;
    let policy = RetryPolicy::from_config(&config.api);
    let client = RetryingCompletionClient::new(Box::new(transport), policy);
    Ok(AppContext::new(client, MinijinjaTemplateRenderer::new(), config))
}

/// Build a context backed by the mock client.
pub fn build_mock_context(config: RunConfig) -> Result<MockContext, AppError> {
    config.validate()?;
    Ok(AppContext::new(MockCompletionClient, MinijinjaTemplateRenderer::new(), config))
}

/// Generate a research brief, outline, and engagement hooks for a topic.
pub fn generate_outline<C, R>(
    ctx: &AppContext<C, R>,
    request: &OutlineRequest,
) -> Result<OutlineResult, AppError>
where
    C: ports::CompletionClient,
    R: domain::TemplateRenderer,
{
    app::pipeline::outline::execute(ctx, request)
}

/// Synthesize the six-field prompt bundle for an episode, falling back to
/// the bundled sample when the upstream is unreachable.
pub fn generate_prompts<C, R>(
    ctx: &AppContext<C, R>,
    request: &PromptsRequest,
) -> Result<PromptsOutput, AppError>
where
    C: ports::CompletionClient,
    R: domain::TemplateRenderer,
{
    app::pipeline::prompts::execute_with_fallback(ctx, request)
}

/// Generate a full script from a prompt bundle: sections, length
/// enforcement, and rating.
pub fn generate_script<C, R>(
    ctx: &AppContext<C, R>,
    request: &ScriptRequest,
    variant: PipelineVariant,
) -> Result<ScriptGenerationOutput, AppError>
where
    C: ports::CompletionClient,
    R: domain::TemplateRenderer,
{
    app::pipeline::generate_script(ctx, request, variant)
}
