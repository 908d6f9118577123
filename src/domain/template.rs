//! Template rendering abstraction.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::domain::AppError;

/// Variables available to a prompt template.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PromptContext {
    #[serde(flatten)]
    pub variables: BTreeMap<String, Value>,
}

impl PromptContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable, serializing it to a JSON value.
    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.variables.insert(key.to_string(), value);
        self
    }
}

/// Trait for rendering prompt templates.
///
/// This abstraction allows swapping out the template engine (e.g. minijinja)
/// and keeping infrastructure details out of the domain layer.
pub trait TemplateRenderer {
    /// Render a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - The template string to render.
    /// * `context` - The context variables to use for rendering.
    /// * `template_name` - A name for the template (for error reporting).
    fn render(
        &self,
        template: &str,
        context: &PromptContext,
        template_name: &str,
    ) -> Result<String, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_builder_collects_variables() {
        let context = PromptContext::new().with("topic", "ocean plastic").with("duration", 15);
        assert_eq!(context.variables["topic"], Value::String("ocean plastic".to_string()));
        assert_eq!(context.variables["duration"], Value::from(15));
    }
}
