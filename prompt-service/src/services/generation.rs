//! The shared call → extract step used by every tool.

use super::extraction::{first_candidate_text, ExtractionError};
use super::metrics;
use super::providers::{ProviderError, TextProvider};
use service_core::error::AppError;
use std::time::Instant;

/// The tools exposed over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Unsummary,
    ReverseCancel,
    Excuse,
    Timeline,
}

impl Tool {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Unsummary => "unsummary",
            Tool::ReverseCancel => "reverse_cancel",
            Tool::Excuse => "excuse",
            Tool::Timeline => "timeline",
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Status { .. } => AppError::UpstreamError(err.to_string()),
            ProviderError::NotConfigured(_)
            | ProviderError::Network(_)
            | ProviderError::Decode(_) => AppError::InternalError(anyhow::Error::new(err)),
        }
    }
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::InvalidStructure => AppError::UpstreamError(err.to_string()),
            ExtractionError::OutsideTolerance { .. } => AppError::BadRequest(err.to_string()),
        }
    }
}

/// Send `prompt` once and return the first candidate's text.
pub async fn generate_text(
    provider: &dyn TextProvider,
    tool: Tool,
    prompt: &str,
) -> Result<String, AppError> {
    let started = Instant::now();
    let result = provider.generate(prompt).await;
    metrics::record_upstream_latency(provider.model(), started.elapsed().as_secs_f64());

    let response = result.map_err(|e| {
        metrics::record_upstream_error(e.kind());
        tracing::error!(tool = tool.as_str(), error = %e, "Upstream generation failed");
        e
    })?;

    let text = first_candidate_text(&response).map_err(|e| {
        metrics::record_upstream_error("invalid_structure");
        tracing::error!(
            tool = tool.as_str(),
            candidates = response.candidates.len(),
            "Upstream response had no usable text"
        );
        e
    })?;

    tracing::info!(
        tool = tool.as_str(),
        model = provider.model(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        text_len = text.len(),
        "Generated text"
    );

    Ok(text.to_string())
}

/// Tag a finished request with its outcome in metrics and hand the result back.
pub fn finish<T>(tool: Tool, result: Result<T, AppError>) -> Result<T, AppError> {
    let outcome = match &result {
        Ok(_) => "success",
        Err(e) if e.status_code().is_client_error() => "rejected",
        Err(_) => "failed",
    };
    metrics::record_generation(tool.as_str(), outcome);
    result
}
