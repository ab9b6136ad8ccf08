//! Hyphenation after Filipino prefixes
//!
//! A vowel-initial stem takes a hyphen after the prefix (`napaka-init`),
//! a consonant-initial stem does not (`napakabait`). Exemplar lists on each
//! rule override the general rule for known words such as `mag-text` and
//! `maganda`.

use serde::Serialize;
use tagasuri_core::{AffixRule, AffixRuleTable};

use crate::tokens::{is_vowel, map_tokens, split_punctuation};

/// One rewritten token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HyphenCorrection {
    pub original: String,
    pub corrected: String,
}

/// Prefix hyphenation corrector
pub struct HyphenationCorrector {
    rules: AffixRuleTable,
}

impl HyphenationCorrector {
    pub fn new(rules: AffixRuleTable) -> Self {
        Self { rules }
    }

    /// Correct every token, preserving whitespace exactly
    pub fn correct(&self, text: &str) -> String {
        map_tokens(text, |token| self.correct_token(token))
    }

    /// Token-level changes `correct` would make, in order
    pub fn corrections(&self, text: &str) -> Vec<HyphenCorrection> {
        text.split_whitespace()
            .filter_map(|token| {
                self.correct_token(token).map(|corrected| HyphenCorrection {
                    original: token.to_string(),
                    corrected,
                })
            })
            .collect()
    }

    /// Corrected token, or `None` when it is already right
    fn correct_token(&self, token: &str) -> Option<String> {
        let (leading, word, trailing) = split_punctuation(token);
        if word.is_empty() {
            return None;
        }

        let lower = word.to_lowercase();
        let rule = self.select_rule(&lower)?;

        // Split the original word after as many chars as the prefix has
        let prefix_len = rule.prefix.chars().count();
        let split = word.char_indices().nth(prefix_len).map(|(i, _)| i)?;
        let (prefix, rest) = word.split_at(split);
        if prefix.to_lowercase() != rule.prefix {
            return None;
        }

        let stem = rest.strip_prefix('-').unwrap_or(rest);
        let first = stem.chars().next()?;
        if !first.is_alphabetic() {
            return None;
        }

        let stem_lower = stem.to_lowercase();
        let mut hyphenate = if rule
            .vowel_exemplars
            .contains(&format!("{}-{}", rule.prefix, stem_lower))
        {
            true
        } else if rule
            .consonant_exemplars
            .contains(&format!("{}{}", rule.prefix, stem_lower))
        {
            false
        } else {
            is_vowel(first)
        };

        // Joining must not hand the token to a different (longer) prefix
        if !hyphenate {
            let joined = format!("{}{}", rule.prefix, stem_lower);
            let owner = self.select_rule(&joined).map(|r| r.prefix.as_str());
            if owner != Some(rule.prefix.as_str()) {
                hyphenate = true;
            }
        }

        let joiner = if hyphenate { "-" } else { "" };
        let corrected = format!("{leading}{prefix}{joiner}{stem}{trailing}");
        (corrected != token).then_some(corrected)
    }

    /// A prefix ending right at the first hyphen wins over a longer match
    fn select_rule(&self, lower: &str) -> Option<&AffixRule> {
        lower
            .split_once('-')
            .and_then(|(head, _)| self.rules.get(head))
            .or_else(|| self.rules.match_prefix(lower))
    }
}
