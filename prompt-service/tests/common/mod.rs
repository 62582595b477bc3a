//! Shared helpers for prompt-service integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use prompt_service::config::{GeminiSettings, PromptConfig, TimelineSettings};
use prompt_service::services::providers::mock::MockTextProvider;
use prompt_service::services::providers::TextProvider;
use prompt_service::startup::{build_router, Application};
use prompt_service::AppState;
use secrecy::Secret;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_MODEL: &str = "gemini-test";

/// Config pointing at `api_base`, on a random port, with no timeline delay.
pub fn test_config(api_base: &str) -> PromptConfig {
    PromptConfig {
        common: service_core::config::Config {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        gemini: GeminiSettings {
            api_key: Secret::new(TEST_API_KEY.to_string()),
            model: TEST_MODEL.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(5),
        },
        timeline: TimelineSettings {
            event_count: 6,
            event_delay: Duration::ZERO,
        },
    }
}

/// Router backed by a scripted provider.
pub fn router_with(provider: Arc<MockTextProvider>) -> Router {
    let provider: Arc<dyn TextProvider> = provider;
    build_router(AppState::new(test_config("http://unused.invalid"), provider))
}

/// Send a JSON POST through the router and return status plus parsed body.
pub async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// Send a raw request through the router and return status plus parsed body.
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// `n` space-separated words.
pub fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}

/// Spawn the real application on a random port and return its base URL.
pub async fn spawn_app(config: PromptConfig) -> String {
    let app = Application::build(config)
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    format!("http://127.0.0.1:{}", port)
}
