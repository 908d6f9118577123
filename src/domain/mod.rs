pub mod config;
pub mod error;
pub mod length;
pub mod outline;
pub mod prompts;
pub mod rating;
pub mod script;
pub mod template;

pub use config::{API_KEY_ENV, CONFIG_FILE, CompletionApiConfig, LengthConfig, ModelConfig, RunConfig};
pub use error::{AppError, UpstreamErrorKind};
pub use outline::{MIN_DURATION_MINUTES, OutlineResult, SectionAllocation, SuggestedStructure};
pub use prompts::PromptBundle;
pub use rating::{CategoryScores, Feedback, Rating, parse_rating};
pub use script::{CONTEXT_WINDOW_CHARS, SECTION_SEPARATOR, ScriptDraft};
pub use template::{PromptContext, TemplateRenderer};
