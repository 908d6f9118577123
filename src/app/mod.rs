mod context;
pub mod pipeline;

pub use context::AppContext;
