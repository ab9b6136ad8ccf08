//! Immediately repeated word detection

use crate::tokens::strip_punctuation;

/// First token that appears twice in a row, compared case-insensitively
///
/// Punctuation-only tokens are skipped, so `"ang — ang"` is still a repeat.
/// The token is returned as written in its first occurrence.
pub fn first_immediate_repeat(text: &str) -> Option<String> {
    let mut previous: Option<(&str, String)> = None;

    for word in text.split_whitespace().map(strip_punctuation) {
        if word.is_empty() {
            continue;
        }
        let lower = word.to_lowercase();
        if let Some((first, prev_lower)) = &previous {
            if *prev_lower == lower {
                return Some(first.to_string());
            }
        }
        previous = Some((word, lower));
    }
    None
}
