//! Sentence-initial capitalization

use serde::Serialize;

/// Proposed capitalization fix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapitalizationFix {
    /// Trimmed input with the first letter upper-cased
    pub corrected: String,
    /// First token of the input as written
    pub flagged: String,
}

/// Detects a lowercase first letter
#[derive(Debug, Clone, Copy, Default)]
pub struct CapitalizationNormalizer;

impl CapitalizationNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Fix for `text`, or `None` when it already starts with an uppercase
    /// letter or does not start with a letter at all
    pub fn check(&self, text: &str) -> Option<CapitalizationFix> {
        let trimmed = text.trim();
        let mut chars = trimmed.chars();
        let first = chars.next()?;
        if !first.is_lowercase() {
            return None;
        }

        let mut corrected: String = first.to_uppercase().collect();
        corrected.push_str(chars.as_str());

        let flagged = trimmed
            .split_whitespace()
            .next()
            .unwrap_or(trimmed)
            .to_string();

        Some(CapitalizationFix { corrected, flagged })
    }
}
