//! Pull generated text out of upstream responses and check its length.

use super::providers::GenerateContentResponse;
use thiserror::Error;

/// Accepted deviation from the requested word count, in percent.
pub const WORD_COUNT_TOLERANCE_PERCENT: u64 = 20;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("Invalid API response structure.")]
    InvalidStructure,

    #[error("Response length ({actual} words) is outside the acceptable range.")]
    OutsideTolerance { actual: usize, requested: u64 },
}

/// Text of the first part of the first candidate.
pub fn first_candidate_text(response: &GenerateContentResponse) -> Result<&str, ExtractionError> {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.first())
        .and_then(|part| part.text.as_deref())
        .ok_or(ExtractionError::InvalidStructure)
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count words in `text` and require the count to be within
/// `requested × (100 ± WORD_COUNT_TOLERANCE_PERCENT) / 100`, bounds included.
pub fn check_word_count(text: &str, requested: u64) -> Result<usize, ExtractionError> {
    let actual = word_count(text);
    // Compare in integer hundredths so the band edges are exact.
    let scaled_actual = actual as u128 * 100;
    let lower = requested as u128 * (100 - WORD_COUNT_TOLERANCE_PERCENT) as u128;
    let upper = requested as u128 * (100 + WORD_COUNT_TOLERANCE_PERCENT) as u128;

    if scaled_actual < lower || scaled_actual > upper {
        return Err(ExtractionError::OutsideTolerance { actual, requested });
    }
    Ok(actual)
}
