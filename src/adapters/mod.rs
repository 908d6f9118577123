pub mod assets;
pub mod completion_client_http;
pub mod completion_client_retrying;
pub mod template;

pub use completion_client_http::HttpCompletionClient;
pub use completion_client_retrying::{RetryPolicy, RetryingCompletionClient};
pub use template::MinijinjaTemplateRenderer;
