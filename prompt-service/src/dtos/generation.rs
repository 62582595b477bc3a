//! Request and response bodies for the generation endpoints.
//!
//! Every request field is optional at the serde level so that an absent
//! field and an empty one are both reported through `RequiredFields` with the
//! endpoint's own message, instead of a generic deserialization error.

use crate::services::timeline::TIMELINE_TOOL;
use crate::utils::validation::RequiredFields;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

pub const MIN_WORD_COUNT: u64 = 50;
pub const MAX_WORD_COUNT: u64 = 1000;

/// Absent, `null` and `""` all count as missing.
fn text_missing(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn single_error(field: &'static str, code: &'static str, message: &'static str) -> ValidationErrors {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    errors
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UnsummaryRequest {
    pub prompt: Option<String>,
    pub style: Option<String>,
    #[validate(range(
        min = 50.0,
        max = 1000.0,
        message = "Word count must be between 50 and 1000."
    ))]
    pub word_count: Option<f64>,
}

impl RequiredFields for UnsummaryRequest {
    fn missing_fields_message(&self) -> Option<&'static str> {
        let word_count_missing = self.word_count.map_or(true, |n| n == 0.0);
        if text_missing(&self.prompt) || text_missing(&self.style) || word_count_missing {
            return Some(
                "Missing required fields: 'prompt', 'style', and 'wordCount' are required.",
            );
        }
        None
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseCancelRequest {
    pub topic: Option<String>,
    pub style: Option<String>,
    /// Kept as a raw JSON number so `100.0` can be told apart from `100`.
    pub word_count: Option<serde_json::Number>,
}

impl ReverseCancelRequest {
    /// The requested word count when it is a whole number in range.
    pub fn whole_word_count(&self) -> Option<u64> {
        self.word_count
            .as_ref()
            .and_then(serde_json::Number::as_u64)
            .filter(|n| (MIN_WORD_COUNT..=MAX_WORD_COUNT).contains(n))
    }
}

impl RequiredFields for ReverseCancelRequest {
    fn missing_fields_message(&self) -> Option<&'static str> {
        let word_count_missing = self
            .word_count
            .as_ref()
            .map_or(true, |n| n.as_f64() == Some(0.0));
        if text_missing(&self.topic) || text_missing(&self.style) || word_count_missing {
            return Some(
                "Missing required fields: 'topic', 'style', and 'wordCount' are required.",
            );
        }
        None
    }
}

impl Validate for ReverseCancelRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.whole_word_count().is_none() {
            return Err(single_error(
                "word_count",
                "word_count_range",
                "Invalid word count. It must be between 50 and 1000 words.",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExcuseRequest {
    pub situation: Option<String>,
}

impl RequiredFields for ExcuseRequest {
    fn missing_fields_message(&self) -> Option<&'static str> {
        text_missing(&self.situation).then_some("Missing required field: 'situation'")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimelineRequest {
    pub tool: Option<String>,
    pub prompt: Option<String>,
}

impl RequiredFields for TimelineRequest {
    fn missing_fields_message(&self) -> Option<&'static str> {
        (text_missing(&self.tool) || text_missing(&self.prompt))
            .then_some("Missing required fields: 'tool' and 'prompt' are required.")
    }
}

impl Validate for TimelineRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.tool.as_deref() != Some(TIMELINE_TOOL) {
            return Err(single_error(
                "tool",
                "unknown_tool",
                "Invalid tool specified.",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UnsummaryResponse {
    pub result: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReverseCancelResponse {
    pub defense: String,
    pub word_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExcuseResponse {
    pub excuse: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineResponse {
    pub timeline: Vec<TimelineEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StylesResponse {
    pub unsummary: Vec<&'static str>,
    pub reverse_cancel: Vec<&'static str>,
}

/// One generated alternate-history event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
    pub short_description: String,
    pub long_description: String,
}

/// Models sometimes answer `"year": 1848` instead of `"year": "1848"`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Year::deserialize(deserializer)? {
        Year::Text(text) => text,
        Year::Number(number) => number.to_string(),
    })
}
