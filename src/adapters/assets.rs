//! Embedded prompt assets.

use include_dir::{Dir, include_dir};

use crate::domain::AppError;

static TEMPLATE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

/// Bundled sample prompt bundle used as the documented fallback when prompt
/// synthesis is unreachable.
pub static SAMPLE_PROMPTS_JSON: &str = include_str!("../assets/sample_prompts.json");

/// Look up an embedded prompt template by name (without the `.j2` suffix).
pub fn template(name: &str) -> Result<&'static str, AppError> {
    TEMPLATE_DIR
        .get_file(format!("{name}.j2"))
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| AppError::TemplateRender {
            template: name.to_string(),
            reason: "embedded template not found".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PromptBundle;

    #[test]
    fn all_pipeline_templates_are_embedded() {
        for name in [
            "research",
            "outline",
            "hooks",
            "prompt_synthesis",
            "script_system",
            "expansion",
            "rating",
            "hook",
            "insight",
            "takeaway",
        ] {
            let content = template(name).unwrap();
            assert!(!content.trim().is_empty(), "{name} template should have content");
        }
    }

    #[test]
    fn unknown_template_is_an_error() {
        assert!(template("nonexistent").is_err());
    }

    #[test]
    fn sample_prompts_parse_as_a_valid_bundle() {
        let bundle = PromptBundle::from_json(SAMPLE_PROMPTS_JSON).unwrap();
        assert_eq!(bundle.segment_prompts.len(), 2);
    }
}
