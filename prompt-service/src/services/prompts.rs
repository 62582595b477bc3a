//! Style tables and prompt composition.
//!
//! The catalog is built once at startup and shared read-only by every request.
//! All composition functions are pure.

use crate::dtos::generation::TimelineEvent;

/// Prefix used by the excuse tool, which has no selectable styles.
pub const EXCUSE_PREFIX: &str = "Give a very realistic and believable excuse for this situation:";

/// Fallback prefix for unknown defense styles.
pub const DEFAULT_DEFENSE_PREFIX: &str = "Defend this controversial topic:";

const UNSUMMARY_STYLES: &[(&str, &str)] = &[
    ("Default", ""),
    (
        "Shakespearean English",
        "Rewrite this text in the style of William Shakespeare:",
    ),
    (
        "Cyberpunk/Futuristic Tone",
        "Write this in a cyberpunk futuristic tone:",
    ),
    (
        "Old-School Medieval Speech",
        "Express this idea in medieval English:",
    ),
    (
        "Meme or Gen-Z Lingo",
        "Convert this into meme-style Gen Z slang:",
    ),
    (
        "Philosopher Style",
        "Rewrite this as if a deep philosopher were explaining it:",
    ),
];

const DEFENSE_STYLES: &[(&str, &str)] = &[
    (
        "Serious Defense",
        "Defend this topic with well-reasoned, logical arguments:",
    ),
    (
        "Humorous Reversal",
        "Make a funny, satirical defense of this situation:",
    ),
    (
        "Historical Context",
        "Compare this controversy with a similar event from history and explain the similarities:",
    ),
    (
        "Devil's Advocate",
        "Play devil's advocate and provide a counterargument defending this issue:",
    ),
];

/// Ordered mapping from style name to instruction prefix.
#[derive(Debug, Clone)]
pub struct StyleTable {
    entries: &'static [(&'static str, &'static str)],
    fallback: &'static str,
}

impl StyleTable {
    pub const fn new(
        entries: &'static [(&'static str, &'static str)],
        fallback: &'static str,
    ) -> Self {
        Self { entries, fallback }
    }

    /// Instruction prefix for `style`, or the table's fallback when unknown.
    /// Matching is exact, including case.
    pub fn prefix(&self, style: &str) -> &'static str {
        self.entries
            .iter()
            .find(|(name, _)| *name == style)
            .map(|(_, prefix)| *prefix)
            .unwrap_or(self.fallback)
    }

    pub fn contains(&self, style: &str) -> bool {
        self.entries.iter().any(|(name, _)| *name == style)
    }

    /// Style names in declaration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }
}

/// Every prompt table the service knows about.
#[derive(Debug, Clone)]
pub struct PromptCatalog {
    pub unsummary: StyleTable,
    pub defense: StyleTable,
    pub excuse_prefix: &'static str,
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self {
            unsummary: StyleTable::new(UNSUMMARY_STYLES, ""),
            defense: StyleTable::new(DEFENSE_STYLES, DEFAULT_DEFENSE_PREFIX),
            excuse_prefix: EXCUSE_PREFIX,
        }
    }
}

impl PromptCatalog {
    /// Expand a short prompt to roughly `word_count` words in the given style.
    pub fn compose_unsummary(&self, style: &str, prompt: &str, word_count: f64) -> String {
        format!(
            "{} {} (Expand to {} words.)",
            self.unsummary.prefix(style),
            prompt,
            word_count
        )
    }

    /// Persuasive defense of `topic` of roughly `word_count` words.
    pub fn compose_defense(&self, style: &str, topic: &str, word_count: u64) -> String {
        format!(
            "{} {} (Make it persuasive and compelling.)\n\nEnsure the response is approximately {} words.",
            self.defense.prefix(style),
            topic,
            word_count
        )
    }

    pub fn compose_excuse(&self, situation: &str) -> String {
        format!(
            "{} {} (Make it absurd but very realistic.)",
            self.excuse_prefix, situation
        )
    }

    /// One alternate-history event that must differ from `previous`.
    pub fn compose_timeline_event(&self, prompt: &str, previous: &[TimelineEvent]) -> String {
        let previous = previous
            .iter()
            .map(|e| e.short_description.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Create an alternate historical event involving: {}.\n\
             The event should be unique and evolve over time and not similar to the following events: {}.\n\
             Format: Return only JSON with year (a historically plausible year), \
             shortDescription (one sentence, max 10 words), and longDescription \
             (two sentences, max 20 words each).",
            prompt, previous
        )
    }
}
