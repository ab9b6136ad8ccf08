//! Disallowed-term filter
//!
//! Matches whole words case-insensitively. All terms compile into one
//! alternation, longest first, so `putangina` is masked as a unit rather
//! than as `puta` plus a remainder.

use regex::Regex;
use tagasuri_core::WordList;

/// Profanity detector and censor
pub struct ProfanityFilter {
    pattern: Option<Regex>,
    mask: String,
}

impl ProfanityFilter {
    /// Compile a filter for `disallowed`, replacing matches with `mask`
    pub fn new(disallowed: &WordList, mask: impl Into<String>) -> Self {
        let mut terms: Vec<&str> = disallowed.iter().collect();
        terms.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });

        let alternatives: Vec<String> = terms.iter().map(|term| Self::term_pattern(term)).collect();
        let pattern = if alternatives.is_empty() {
            None
        } else {
            match Regex::new(&format!("(?i)(?:{})", alternatives.join("|"))) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to compile disallowed-term pattern");
                    None
                }
            }
        };

        Self {
            pattern,
            mask: mask.into(),
        }
    }

    /// Word boundaries only where the term itself starts or ends with a word character
    fn term_pattern(term: &str) -> String {
        let boundary = |c: Option<char>| match c {
            Some(c) if c.is_alphanumeric() || c == '_' => r"\b",
            _ => "",
        };
        format!(
            "{}{}{}",
            boundary(term.chars().next()),
            regex::escape(term),
            boundary(term.chars().last())
        )
    }

    /// Whether any disallowed term appears as a whole word
    pub fn contains_disallowed(&self, text: &str) -> bool {
        self.pattern
            .as_ref()
            .map(|p| p.is_match(text))
            .unwrap_or(false)
    }

    /// First disallowed term in reading order, lowercased
    pub fn first_match(&self, text: &str) -> Option<String> {
        self.pattern
            .as_ref()?
            .find(text)
            .map(|m| m.as_str().to_lowercase())
    }

    /// Replace every disallowed term with the mask token
    pub fn censor(&self, text: &str) -> String {
        match &self.pattern {
            Some(p) => p.replace_all(text, self.mask.as_str()).into_owned(),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> ProfanityFilter {
        ProfanityFilter::new(&WordList::new(["puta", "putangina", "gago"]), "****")
    }

    #[test]
    fn test_detects_whole_words_case_insensitive() {
        let f = filter();
        assert!(f.contains_disallowed("Ang GAGO mo."));
        assert!(f.contains_disallowed("gago"));
        assert!(!f.contains_disallowed("Ang bahay ay malaki."));
    }

    #[test]
    fn test_no_substring_matches() {
        let f = filter();
        // "gagong" and "reputasyon" only contain disallowed substrings
        assert!(!f.contains_disallowed("Ang reputasyon niya ay mabuti."));
        assert!(!f.contains_disallowed("gagong"));
    }

    #[test]
    fn test_censor_prefers_longest_term() {
        let f = filter();
        assert_eq!(f.censor("Putangina, gago ka!"), "****, **** ka!");
        assert_eq!(f.first_match("Putangina, gago ka!").as_deref(), Some("putangina"));
    }

    #[test]
    fn test_censor_leaves_clean_text() {
        let f = filter();
        assert_eq!(f.censor("Maganda ang araw."), "Maganda ang araw.");
        assert!(f.first_match("Maganda ang araw.").is_none());
    }

    #[test]
    fn test_empty_list_never_matches() {
        let f = ProfanityFilter::new(&WordList::default(), "****");
        assert!(!f.contains_disallowed("gago"));
        assert_eq!(f.censor("gago"), "gago");
    }

    #[test]
    fn test_terms_with_symbols() {
        let f = ProfanityFilter::new(&WordList::new(["f*ck"]), "#");
        assert!(f.contains_disallowed("ay f*ck"));
        assert_eq!(f.censor("ay F*CK!"), "ay #!");
    }
}
