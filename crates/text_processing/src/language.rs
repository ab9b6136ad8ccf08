//! Language gate
//!
//! Heuristic check that a sentence is mostly Filipino. A token counts as
//! native when it is a known function word or starts with a Filipino
//! prefix followed by a stem of at least three letters. Foreign terms only
//! reject a sentence that is not already mostly native.

use tagasuri_core::{AffixRuleTable, WordList};

use crate::tokens::normalized_words;

/// Shortest stem that lets an affixed token count as native
const MIN_AFFIX_STEM_CHARS: usize = 3;

/// Filipino-versus-other-language gate
pub struct LanguageGate {
    native: WordList,
    foreign: WordList,
    native_prefixes: Vec<String>,
    min_native_ratio: f32,
    min_native_tokens: usize,
}

impl LanguageGate {
    /// Build a gate from the word lists, the affix table and any extra prefixes
    pub fn new(
        native: WordList,
        foreign: WordList,
        affixes: &AffixRuleTable,
        extra_native_prefixes: &[String],
        min_native_ratio: f32,
        min_native_tokens: usize,
    ) -> Self {
        let mut native_prefixes: Vec<String> = affixes
            .prefixes()
            .map(str::to_string)
            .chain(
                extra_native_prefixes
                    .iter()
                    .map(|p| p.trim().to_lowercase())
                    .filter(|p| !p.is_empty()),
            )
            .collect();
        native_prefixes.sort();
        native_prefixes.dedup();

        Self {
            native,
            foreign,
            native_prefixes,
            min_native_ratio,
            min_native_tokens,
        }
    }

    /// True if any token exactly matches the foreign-term list
    pub fn looks_foreign(&self, text: &str) -> bool {
        normalized_words(text)
            .iter()
            .any(|word| self.foreign.contains(word))
    }

    /// True if enough tokens are native, both by count and by ratio
    pub fn is_mostly_native(&self, text: &str) -> bool {
        let words = normalized_words(text);
        if words.is_empty() {
            return false;
        }
        let native = self.native_count(&words);
        native >= self.min_native_tokens
            && native as f32 / words.len() as f32 >= self.min_native_ratio
    }

    /// Share of native tokens; 0.0 when there are no tokens
    pub fn native_ratio(&self, text: &str) -> f32 {
        let words = normalized_words(text);
        if words.is_empty() {
            return 0.0;
        }
        self.native_count(&words) as f32 / words.len() as f32
    }

    /// Reject only foreign-looking text that is not mostly native
    pub fn should_reject(&self, text: &str) -> bool {
        self.looks_foreign(text) && !self.is_mostly_native(text)
    }

    fn native_count(&self, words: &[String]) -> usize {
        words.iter().filter(|w| self.is_native_word(w)).count()
    }

    fn is_native_word(&self, word: &str) -> bool {
        if self.native.contains(word) {
            return true;
        }
        self.native_prefixes.iter().any(|prefix| {
            word.strip_prefix(prefix.as_str())
                .map(|rest| rest.strip_prefix('-').unwrap_or(rest))
                .map(|stem| stem.chars().count() >= MIN_AFFIX_STEM_CHARS)
                .unwrap_or(false)
        })
    }
}
