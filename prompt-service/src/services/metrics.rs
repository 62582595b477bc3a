//! Prometheus metrics for prompt-service.
//!
//! HTTP request metrics come from service-core's `metrics` middleware and are
//! rendered through the Prometheus recorder; tool-level metrics live in a
//! dedicated `prometheus` registry appended to the same exposition.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub static PROMPT_GENERATIONS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static PROMPT_UPSTREAM_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static PROMPT_UPSTREAM_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Install the recorder and register tool metrics. Later calls are no-ops.
pub fn init_metrics() -> anyhow::Result<()> {
    if REGISTRY.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))?;

    let registry = Registry::new();

    let generations = IntCounterVec::new(
        Opts::new("prompt_generations_total", "Generation requests by tool and outcome"),
        &["tool", "outcome"],
    )?;

    let upstream_latency = HistogramVec::new(
        HistogramOpts::new(
            "prompt_upstream_latency_seconds",
            "Latency of generateContent calls in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["model"],
    )?;

    let upstream_errors = IntCounterVec::new(
        Opts::new("prompt_upstream_errors_total", "Failed generateContent calls"),
        &["error_type"],
    )?;

    registry.register(Box::new(generations.clone()))?;
    registry.register(Box::new(upstream_latency.clone()))?;
    registry.register(Box::new(upstream_errors.clone()))?;

    let _ = METRICS_HANDLE.set(handle);
    let _ = PROMPT_GENERATIONS_TOTAL.set(generations);
    let _ = PROMPT_UPSTREAM_LATENCY_SECONDS.set(upstream_latency);
    let _ = PROMPT_UPSTREAM_ERRORS_TOTAL.set(upstream_errors);
    let _ = REGISTRY.set(registry);

    tracing::info!("Prometheus metrics initialized");
    Ok(())
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut output = METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string());

    if let Some(registry) = REGISTRY.get() {
        let mut buffer = Vec::new();
        if let Err(e) = TextEncoder::new().encode(&registry.gather(), &mut buffer) {
            tracing::error!(error = %e, "Failed to encode metrics");
            return output;
        }
        match String::from_utf8(buffer) {
            Ok(custom) => output.push_str(&custom),
            Err(e) => tracing::error!(error = %e, "Failed to convert metrics to UTF-8"),
        }
    }

    output
}

/// Record the final outcome of a tool request.
pub fn record_generation(tool: &str, outcome: &str) {
    if let Some(counter) = PROMPT_GENERATIONS_TOTAL.get() {
        counter.with_label_values(&[tool, outcome]).inc();
    }
}

pub fn record_upstream_latency(model: &str, duration_secs: f64) {
    if let Some(histogram) = PROMPT_UPSTREAM_LATENCY_SECONDS.get() {
        histogram.with_label_values(&[model]).observe(duration_secs);
    }
}

pub fn record_upstream_error(error_type: &str) {
    if let Some(counter) = PROMPT_UPSTREAM_ERRORS_TOTAL.get() {
        counter.with_label_values(&[error_type]).inc();
    }
}
