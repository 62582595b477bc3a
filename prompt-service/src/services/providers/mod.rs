//! Text generation provider abstraction.
//!
//! Handlers talk to a `TextProvider`, so the Gemini backend can be swapped for
//! the scripted mock in tests.

pub mod gemini;
pub mod mock;
pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use types::GenerateContentResponse;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Upstream answered with a non-success status.
    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::Status { .. } => "status",
            ProviderError::Network(_) => "network",
            ProviderError::Decode(_) => "decode",
        }
    }
}

/// Single-shot text generation. No retries are performed by implementations.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send one prompt and return the decoded upstream response.
    async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse, ProviderError>;

    /// Model name reported in logs and metrics.
    fn model(&self) -> &str;

    /// Cheap local check that the provider can be used at all.
    fn health_check(&self) -> Result<(), ProviderError>;
}
