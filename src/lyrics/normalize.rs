//! Lyrics text cleanup.
//!
//! Lyrics pages usually open with a banner (contributor count, song title,
//! the word "Lyrics") before the first section header. The [`TextNormalizer`]
//! removes it with a chain of rules tried in order; the first rule that
//! matches wins, and text no rule matches is only trimmed.
//!
//! This is a heuristic. A song without section headers whose first line
//! happens to contain "lyrics" loses that line.

use once_cell::sync::Lazy;
use regex::Regex;

/// Everything up to and including the first "lyrics", any case, across lines.
static LYRICS_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^.*?lyrics").expect("lyrics header pattern is valid"));

/// One way of recognizing and removing a banner.
pub trait NormalizationRule: Send + Sync {
    /// Returns the cleaned text, or `None` when the rule does not apply.
    fn apply(&self, text: &str) -> Option<String>;
}

/// Keeps everything from the first `[` (the first section header) onward.
pub struct SectionMarkerRule;

impl NormalizationRule for SectionMarkerRule {
    fn apply(&self, text: &str) -> Option<String> {
        text.find('[').map(|start| text[start..].trim().to_string())
    }
}

/// Drops everything up to and including the first "Lyrics".
pub struct LyricsHeaderRule;

impl NormalizationRule for LyricsHeaderRule {
    fn apply(&self, text: &str) -> Option<String> {
        LYRICS_HEADER
            .find(text)
            .map(|header| text[header.end()..].trim().to_string())
    }
}

pub struct TextNormalizer {
    rules: Vec<Box<dyn NormalizationRule>>,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(vec![Box::new(SectionMarkerRule), Box::new(LyricsHeaderRule)])
    }
}

impl TextNormalizer {
    pub fn new(rules: Vec<Box<dyn NormalizationRule>>) -> Self {
        Self { rules }
    }

    pub fn clean(&self, raw: &str) -> String {
        self.rules
            .iter()
            .find_map(|rule| rule.apply(raw))
            .unwrap_or_else(|| raw.trim().to_string())
    }
}
