pub mod config;
pub mod dtos;
pub mod handlers;
pub mod services;
pub mod startup;
pub mod utils;

use config::PromptConfig;
use services::prompts::PromptCatalog;
use services::providers::TextProvider;
use std::sync::Arc;

/// Shared, read-only application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PromptConfig>,
    pub catalog: Arc<PromptCatalog>,
    pub provider: Arc<dyn TextProvider>,
}

impl AppState {
    pub fn new(config: PromptConfig, provider: Arc<dyn TextProvider>) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(PromptCatalog::default()),
            provider,
        }
    }
}
