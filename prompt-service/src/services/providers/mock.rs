//! Scripted provider for tests.

use super::{GenerateContentResponse, ProviderError, TextProvider};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

type Scripted = Result<GenerateContentResponse, ProviderError>;

/// Mock text provider that replays scripted results and records prompts.
///
/// With a single scripted result every call returns it; with several, calls
/// consume them in order and fail with `NotConfigured` once exhausted.
pub struct MockTextProvider {
    script: Mutex<VecDeque<Scripted>>,
    repeat_last: bool,
    prompts: Mutex<Vec<String>>,
    enabled: bool,
}

impl MockTextProvider {
    /// Always answer with one candidate containing `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::repeating(Ok(GenerateContentResponse::from_text(text)))
    }

    /// Always answer with `response`.
    pub fn with_response(response: GenerateContentResponse) -> Self {
        Self::repeating(Ok(response))
    }

    /// Always fail with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::repeating(Err(error))
    }

    /// Answer successive calls from `results`.
    pub fn sequence(results: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            repeat_last: false,
            prompts: Mutex::new(Vec::new()),
            enabled: true,
        }
    }

    /// A provider whose health check fails.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::sequence(Vec::new())
        }
    }

    fn repeating(result: Scripted) -> Self {
        Self {
            repeat_last: true,
            ..Self::sequence(vec![result])
        }
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        let mut script = self
            .script
            .lock()
            .map_err(|_| ProviderError::NotConfigured("Mock script poisoned".to_string()))?;

        let next = if self.repeat_last && script.len() == 1 {
            script.front().cloned()
        } else {
            script.pop_front()
        };

        next.unwrap_or_else(|| {
            Err(ProviderError::NotConfigured(
                "Mock text provider has no scripted response left".to_string(),
            ))
        })
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    fn health_check(&self) -> Result<(), ProviderError> {
        if self.enabled {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(response: &GenerateContentResponse) -> Option<&str> {
        response.candidates[0].content.as_ref()?.parts[0].text.as_deref()
    }

    #[tokio::test]
    async fn test_with_text_repeats() {
        let provider = MockTextProvider::with_text("same");
        for _ in 0..3 {
            let response = provider.generate("p").await.unwrap();
            assert_eq!(text_of(&response), Some("same"));
        }
        assert_eq!(provider.prompts(), vec!["p", "p", "p"]);
    }

    #[tokio::test]
    async fn test_sequence_is_consumed() {
        let provider = MockTextProvider::sequence(vec![
            Ok(GenerateContentResponse::from_text("one")),
            Err(ProviderError::Network("reset".to_string())),
        ]);

        assert_eq!(
            text_of(&provider.generate("a").await.unwrap()),
            Some("one")
        );
        assert_eq!(
            provider.generate("b").await.unwrap_err(),
            ProviderError::Network("reset".to_string())
        );
        assert!(matches!(
            provider.generate("c").await,
            Err(ProviderError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_disabled_fails_health_check() {
        assert!(MockTextProvider::disabled().health_check().is_err());
        assert!(MockTextProvider::with_text("x").health_check().is_ok());
    }
}
