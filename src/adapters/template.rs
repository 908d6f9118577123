use minijinja::{Environment, UndefinedBehavior};
use std::sync::OnceLock;

use crate::domain::{AppError, PromptContext, TemplateRenderer};

/// Template renderer using Minijinja.
pub struct MinijinjaTemplateRenderer;

impl MinijinjaTemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MinijinjaTemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MinijinjaTemplateRenderer {
    fn render(
        &self,
        template: &str,
        context: &PromptContext,
        template_name: &str,
    ) -> Result<String, AppError> {
        let env = ENV.get_or_init(|| {
            let mut env = Environment::new();
            env.set_undefined_behavior(UndefinedBehavior::Strict);
            env
        });

        env.render_str(template, &context.variables)
            .map_err(|err| AppError::TemplateRender {
                template: template_name.to_string(),
                reason: err.to_string(),
            })
    }
}

static ENV: OnceLock<Environment<'static>> = OnceLock::new();
