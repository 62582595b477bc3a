use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The upstream generation API answered with something we cannot use.
    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Service Unavailable")]
    ServiceUnavailable,

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::UpstreamError(_) | AppError::InternalError(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Pick the first human-readable message out of a set of field errors.
///
/// Falls back to the error code when a rule was declared without a message.
pub fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    let mut fallback = None;
    for field_errors in errors.field_errors().values() {
        for error in field_errors.iter() {
            if let Some(message) = &error.message {
                return message.to_string();
            }
            fallback.get_or_insert_with(|| error.code.to_string());
        }
    }
    fallback.unwrap_or_else(|| "Invalid request".to_string())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: String,
        }

        let status = self.status_code();
        let error = match self {
            AppError::ValidationError(err) => first_validation_message(&err),
            AppError::BadRequest(msg) | AppError::UpstreamError(msg) => msg,
            AppError::InternalError(err) => format!("An error occurred: {}", err),
            AppError::ServiceUnavailable => "Service unavailable".to_string(),
            AppError::ConfigError(err) => format!("Configuration error: {}", err),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %error, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %error, "Request rejected");
        }

        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("nope").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::UpstreamError("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::ServiceUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_first_validation_message_prefers_message() {
        let mut error = ValidationError::new("range");
        error.message = Some(Cow::Borrowed("Word count must be between 50 and 1000."));
        let mut errors = ValidationErrors::new();
        errors.add("word_count", error);

        assert_eq!(
            first_validation_message(&errors),
            "Word count must be between 50 and 1000."
        );
    }

    #[test]
    fn test_first_validation_message_falls_back_to_code() {
        let mut errors = ValidationErrors::new();
        errors.add("word_count", ValidationError::new("range"));

        assert_eq!(first_validation_message(&errors), "range");
    }

    #[tokio::test]
    async fn test_internal_error_body_carries_message() {
        let response = AppError::InternalError(anyhow::anyhow!("socket closed")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "An error occurred: socket closed");
    }
}
