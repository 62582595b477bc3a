//! Operational endpoints on a running server.

mod common;

use common::{spawn_app, test_config};
use reqwest::Client;
use std::time::Duration;

#[tokio::test]
async fn health_check_returns_ok() {
    let address = spawn_app(test_config("http://127.0.0.1:9")).await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", address))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "prompt-service");
}

#[tokio::test]
async fn readiness_check_returns_ok() {
    let address = spawn_app(test_config("http://127.0.0.1:9")).await;

    let response = Client::new()
        .get(format!("{}/ready", address))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
async fn metrics_endpoint_renders_text() {
    prompt_service::services::metrics::init_metrics().expect("Failed to init metrics");
    let address = spawn_app(test_config("http://127.0.0.1:9")).await;
    let client = Client::new();

    client
        .get(format!("{}/health", address))
        .send()
        .await
        .expect("Failed to send request");

    let response = client
        .get(format!("{}/metrics", address))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("http_requests_total"));
}
