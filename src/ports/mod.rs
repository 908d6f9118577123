pub mod completion_client;

pub use completion_client::{
    ChatMessage, CompletionClient, CompletionRequest, MockCompletionClient, Role,
};
