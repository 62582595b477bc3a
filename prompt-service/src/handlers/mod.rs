//! HTTP handlers for prompt-service.

pub mod generation;
pub mod health;
pub mod metrics;
