use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;
use validator::Validate;

/// Presence check that runs before range validation.
///
/// Returns the endpoint's missing-fields message when any required field is
/// absent or empty.
pub trait RequiredFields {
    fn missing_fields_message(&self) -> Option<&'static str>;
}

/// JSON body extractor that parses, checks required fields, then validates.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + RequiredFields + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request(format!("Invalid request body: {}", e.body_text())))?;

        if let Some(message) = value.missing_fields_message() {
            return Err(AppError::bad_request(message));
        }

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request as HttpRequest, StatusCode};
    use serde::Deserialize;

    #[derive(Deserialize, Validate)]
    struct Sample {
        name: Option<String>,
        #[validate(range(min = 1, max = 10, message = "count out of range"))]
        count: Option<u32>,
    }

    impl RequiredFields for Sample {
        fn missing_fields_message(&self) -> Option<&'static str> {
            self.name
                .as_deref()
                .map_or(true, str::is_empty)
                .then_some("name is required")
        }
    }

    async fn extract(body: &'static str) -> Result<Sample, AppError> {
        let request = HttpRequest::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        ValidatedJson::<Sample>::from_request(request, &())
            .await
            .map(|ValidatedJson(value)| value)
    }

    #[tokio::test]
    async fn test_accepts_valid_body() {
        let sample = extract(r#"{"name": "a", "count": 3}"#).await.unwrap();
        assert_eq!(sample.name.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let err = extract("{not json").await.err().unwrap();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("Invalid request body"));
    }

    #[tokio::test]
    async fn test_required_fields_checked_before_range() {
        let err = extract(r#"{"name": "", "count": 99}"#).await.err().unwrap();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "name is required"));
    }

    #[tokio::test]
    async fn test_range_failure_is_validation_error() {
        let err = extract(r#"{"name": "a", "count": 99}"#).await.err().unwrap();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
