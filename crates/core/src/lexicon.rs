//! Lexicon types
//!
//! Immutable word lists and the affix rule table. Both are built once at
//! startup and shared read-only by every filter.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Set of lowercase tokens used for membership tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Build from any list of words. Entries are trimmed and lowercased;
    /// blank entries are dropped.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Parse newline-delimited content. Lines starting with `#` are comments.
    pub fn parse(content: &str) -> Self {
        Self::new(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    /// Case-insensitive membership test
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for WordList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Hyphenation rule for one prefix
///
/// Exemplar lists override the general vowel/consonant rule:
/// `vowel_exemplars` holds hyphenated forms (`maka-diyos`) that keep their
/// hyphen, `consonant_exemplars` holds joined forms (`maganda`) that must
/// never gain one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixRule {
    pub prefix: String,
    #[serde(default)]
    pub vowel_exemplars: HashSet<String>,
    #[serde(default)]
    pub consonant_exemplars: HashSet<String>,
}

impl AffixRule {
    pub fn new<V, C, S, T>(prefix: &str, vowel_exemplars: V, consonant_exemplars: C) -> Self
    where
        V: IntoIterator<Item = S>,
        C: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            prefix: prefix.trim().to_lowercase(),
            vowel_exemplars: vowel_exemplars
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .collect(),
            consonant_exemplars: consonant_exemplars
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// Rule with no exemplars
    pub fn bare(prefix: &str) -> Self {
        Self::new::<[&str; 0], [&str; 0], &str, &str>(prefix, [], [])
    }

    fn normalized(self) -> Self {
        Self::new(
            &self.prefix,
            self.vowel_exemplars,
            self.consonant_exemplars,
        )
    }
}

/// Prefix rules, ordered longest prefix first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffixRuleTable {
    rules: Vec<AffixRule>,
}

impl AffixRuleTable {
    pub fn new(rules: Vec<AffixRule>) -> Self {
        let mut rules: Vec<AffixRule> = rules
            .into_iter()
            .map(AffixRule::normalized)
            .filter(|r| !r.prefix.is_empty())
            .collect();
        // Longest first so "napaka" wins over "nap..." style overlaps
        rules.sort_by(|a, b| {
            b.prefix
                .chars()
                .count()
                .cmp(&a.prefix.chars().count())
                .then_with(|| a.prefix.cmp(&b.prefix))
        });
        rules.dedup_by(|a, b| a.prefix == b.prefix);
        Self { rules }
    }

    /// Longest rule whose prefix starts `lowercase_token`
    pub fn match_prefix(&self, lowercase_token: &str) -> Option<&AffixRule> {
        self.rules
            .iter()
            .find(|rule| lowercase_token.starts_with(rule.prefix.as_str()))
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.prefix.as_str())
    }

    /// Rule for exactly this prefix
    pub fn get(&self, prefix: &str) -> Option<&AffixRule> {
        self.rules.iter().find(|rule| rule.prefix == prefix)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// All lexical data the pre-filters need
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    /// Filipino function words
    pub native: WordList,
    /// Terms that mark a sentence as another language
    pub foreign: WordList,
    /// Censored or rejected terms
    pub disallowed: WordList,
    pub affixes: AffixRuleTable,
}
