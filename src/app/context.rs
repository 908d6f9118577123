use crate::adapters::assets;
use crate::domain::{AppError, PromptContext, RunConfig, TemplateRenderer};
use crate::ports::CompletionClient;

/// Application context holding dependencies for pipeline execution.
pub struct AppContext<C: CompletionClient, R: TemplateRenderer> {
    client: C,
    renderer: R,
    config: RunConfig,
}

impl<C: CompletionClient, R: TemplateRenderer> AppContext<C, R> {
    /// Create a new application context.
    pub fn new(client: C, renderer: R, config: RunConfig) -> Self {
        Self { client, renderer, config }
    }

    /// Get a reference to the completion client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Get a reference to the run configuration.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Model identifier used for all pipeline stages.
    pub fn model(&self) -> &str {
        &self.config.models.default_model
    }

    /// Render an embedded prompt template by name.
    pub fn render_template(
        &self,
        name: &str,
        context: &PromptContext,
    ) -> Result<String, AppError> {
        let template = assets::template(name)?;
        self.renderer.render(template, context, name)
    }
}
