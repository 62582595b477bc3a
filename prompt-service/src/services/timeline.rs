//! Alternate-history timeline generation.
//!
//! Events are generated one after another so each prompt can list the events
//! already produced. A failed call or unparsable reply drops that event only.

use super::generation::{generate_text, Tool};
use super::prompts::PromptCatalog;
use super::providers::TextProvider;
use crate::config::TimelineSettings;
use crate::dtos::generation::TimelineEvent;
use thiserror::Error;

/// The only tool name accepted by `/generate-timeline`.
pub const TIMELINE_TOOL: &str = "timeline-divergence";

#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("Event reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub struct TimelineGenerator<'a> {
    provider: &'a dyn TextProvider,
    catalog: &'a PromptCatalog,
    settings: &'a TimelineSettings,
}

impl<'a> TimelineGenerator<'a> {
    pub fn new(
        provider: &'a dyn TextProvider,
        catalog: &'a PromptCatalog,
        settings: &'a TimelineSettings,
    ) -> Self {
        Self {
            provider,
            catalog,
            settings,
        }
    }

    /// Generate up to `event_count` events about `prompt`, sorted by year.
    pub async fn generate(&self, prompt: &str) -> Vec<TimelineEvent> {
        let mut events: Vec<TimelineEvent> = Vec::with_capacity(self.settings.event_count);

        for attempt in 0..self.settings.event_count {
            if attempt > 0 && !self.settings.event_delay.is_zero() {
                tokio::time::sleep(self.settings.event_delay).await;
            }

            let event_prompt = self.catalog.compose_timeline_event(prompt, &events);
            let text = match generate_text(self.provider, Tool::Timeline, &event_prompt).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Skipping timeline event");
                    continue;
                }
            };

            match parse_event(&text) {
                Ok(event) => events.push(event),
                Err(e) => tracing::warn!(attempt, error = %e, "Skipping unparsable timeline event"),
            }
        }

        sort_by_year(&mut events);
        events
    }
}

/// Parse a model reply into an event, tolerating Markdown code fences.
pub fn parse_event(text: &str) -> Result<TimelineEvent, TimelineError> {
    let cleaned = text.replace("```json", "").replace("```", "");
    Ok(serde_json::from_str(cleaned.trim())?)
}

/// Leading signed integer of a year string, e.g. `"1848 AD"` → 1848.
pub fn year_key(year: &str) -> Option<i64> {
    let trimmed = year.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// Stable sort by year; events without a readable year go last.
pub fn sort_by_year(events: &mut [TimelineEvent]) {
    events.sort_by_key(|event| {
        let key = year_key(&event.year);
        (key.is_none(), key)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::MockTextProvider;
    use crate::services::providers::{GenerateContentResponse, ProviderError};
    use std::time::Duration;

    fn event(year: &str, short: &str) -> TimelineEvent {
        TimelineEvent {
            year: year.to_string(),
            short_description: short.to_string(),
            long_description: "Long.".to_string(),
        }
    }

    fn reply(year: &str, short: &str) -> Result<GenerateContentResponse, ProviderError> {
        Ok(GenerateContentResponse::from_text(format!(
            "```json\n{{\"year\": \"{}\", \"shortDescription\": \"{}\", \"longDescription\": \"Long.\"}}\n```",
            year, short
        )))
    }

    fn settings(count: usize) -> TimelineSettings {
        TimelineSettings {
            event_count: count,
            event_delay: Duration::ZERO,
        }
    }

    #[test]
    fn test_parse_event_strips_fences() {
        let parsed = parse_event(
            "```json\n{\"year\": \"1848\", \"shortDescription\": \"S\", \"longDescription\": \"L\"}\n```",
        )
        .unwrap();
        assert_eq!(parsed.year, "1848");
        assert_eq!(parsed.short_description, "S");
        assert_eq!(parsed.long_description, "L");
    }

    #[test]
    fn test_parse_event_accepts_numeric_year() {
        let parsed =
            parse_event(r#"{"year": 1066, "shortDescription": "S", "longDescription": "L"}"#)
                .unwrap();
        assert_eq!(parsed.year, "1066");
    }

    #[test]
    fn test_parse_event_rejects_prose() {
        assert!(parse_event("Once upon a time").is_err());
    }

    #[test]
    fn test_year_key() {
        assert_eq!(year_key("1848"), Some(1848));
        assert_eq!(year_key(" 1848 AD"), Some(1848));
        assert_eq!(year_key("-44"), Some(-44));
        assert_eq!(year_key("c. 1200"), None);
        assert_eq!(year_key(""), None);
    }

    #[test]
    fn test_sort_by_year_puts_unknown_last() {
        let mut events = vec![
            event("1901", "b"),
            event("unknown", "x"),
            event("-44", "a"),
            event("1901", "c"),
        ];
        sort_by_year(&mut events);
        let order: Vec<&str> = events
            .iter()
            .map(|e| e.short_description.as_str())
            .collect();
        assert_eq!(order, vec!["a", "b", "c", "x"]);
    }

    #[tokio::test]
    async fn test_generate_skips_failures_and_sorts() {
        let provider = MockTextProvider::sequence(vec![
            reply("1950", "Moon base"),
            Err(ProviderError::Network("reset".to_string())),
            Ok(GenerateContentResponse::from_text("not json at all")),
            reply("1848", "Steam airships"),
        ]);
        let catalog = PromptCatalog::default();
        let settings = settings(4);

        let events = TimelineGenerator::new(&provider, &catalog, &settings)
            .generate("steam power")
            .await;

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].short_description, "Steam airships");
        assert_eq!(events[1].short_description, "Moon base");

        let prompts = provider.prompts();
        assert_eq!(prompts.len(), 4);
        assert!(prompts[3].contains("following events: Moon base."));
    }
}
