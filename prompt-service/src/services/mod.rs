pub mod extraction;
pub mod generation;
pub mod metrics;
pub mod prompts;
pub mod providers;
pub mod timeline;

pub use prompts::PromptCatalog;
pub use timeline::TimelineGenerator;
