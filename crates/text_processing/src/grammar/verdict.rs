//! Parsing of the model's labelled answer
//!
//! ```text
//! MALI: **maling bahagi**
//! TAMANG SAGOT: buong tamang pangungusap
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Result, TextProcessingError};

static MALI_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bMALI\s*:").expect("valid MALI label pattern"));

static TAMANG_SAGOT_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bTAMANG\s+SAGOT\s*:").expect("valid TAMANG SAGOT label pattern")
});

static BOLD_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold span pattern"));

/// Structured form of a correction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarVerdict {
    /// Wrong parts, in order of appearance
    pub mali: Vec<String>,
    /// Fully corrected sentence
    pub tamang_sagot: String,
}

/// Parse a `MALI:` / `TAMANG SAGOT:` answer
///
/// Bold spans after `MALI:` become the wrong parts; without bold markup the
/// whole `MALI:` section is used. Either label missing is a
/// [`TextProcessingError::MalformedResponse`].
pub fn parse_verdict(payload: &str) -> Result<GrammarVerdict> {
    let mali = MALI_LABEL
        .find(payload)
        .ok_or_else(|| malformed("missing MALI label", payload))?;
    let tamang = TAMANG_SAGOT_LABEL
        .find(payload)
        .ok_or_else(|| malformed("missing TAMANG SAGOT label", payload))?;

    let (mali_section, tamang_section) = if mali.start() < tamang.start() {
        (
            &payload[mali.end()..tamang.start()],
            &payload[tamang.end()..],
        )
    } else {
        (
            &payload[mali.end()..],
            &payload[tamang.end()..mali.start()],
        )
    };

    let mut spans: Vec<String> = BOLD_SPAN
        .captures_iter(mali_section)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if spans.is_empty() {
        let bare = strip_brackets(mali_section);
        if !bare.is_empty() {
            spans.push(bare.to_string());
        }
    }

    let tamang_sagot = strip_brackets(tamang_section).to_string();
    if tamang_sagot.is_empty() {
        return Err(malformed("empty TAMANG SAGOT", payload));
    }

    Ok(GrammarVerdict {
        mali: spans,
        tamang_sagot,
    })
}

/// Trim whitespace and the `<...>` placeholder brackets the prompt shows
fn strip_brackets(section: &str) -> &str {
    let trimmed = section.trim();
    trimmed
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(trimmed)
        .trim()
}

fn malformed(reason: &str, payload: &str) -> TextProcessingError {
    let preview: String = payload.chars().take(80).collect();
    TextProcessingError::MalformedResponse(format!("{}: {:?}", reason, preview))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_answer() {
        let verdict =
            parse_verdict("MALI: **ako**\nTAMANG SAGOT: Ako ay masaya.").unwrap();
        assert_eq!(verdict.mali, vec!["ako"]);
        assert_eq!(verdict.tamang_sagot, "Ako ay masaya.");
    }

    #[test]
    fn test_multiple_bold_spans() {
        let verdict = parse_verdict(
            "MALI: **kumain** at **kanina**\nTAMANG SAGOT: Kakain ako mamaya.",
        )
        .unwrap();
        assert_eq!(verdict.mali, vec!["kumain", "kanina"]);
    }

    #[test]
    fn test_without_bold_markup() {
        let verdict = parse_verdict("mali: <ng bahay>\ntamang sagot: <Nang umuwi siya.>").unwrap();
        assert_eq!(verdict.mali, vec!["ng bahay"]);
        assert_eq!(verdict.tamang_sagot, "Nang umuwi siya.");
    }

    #[test]
    fn test_labels_in_reverse_order() {
        let verdict = parse_verdict("TAMANG SAGOT: Ako ay masaya.\nMALI: **ako**").unwrap();
        assert_eq!(verdict.mali, vec!["ako"]);
        assert_eq!(verdict.tamang_sagot, "Ako ay masaya.");
    }

    #[test]
    fn test_missing_label_is_malformed() {
        for payload in ["TAMANG SAGOT: Ako ay masaya.", "MALI: **ako**", "Walang mali."] {
            let err = parse_verdict(payload).unwrap_err();
            assert!(
                matches!(err, TextProcessingError::MalformedResponse(_)),
                "payload {payload:?}"
            );
        }
    }

    #[test]
    fn test_empty_answer_is_malformed() {
        assert!(parse_verdict("MALI: **ako**\nTAMANG SAGOT:   ").is_err());
    }

    #[test]
    fn test_verdict_serializes() {
        let verdict = parse_verdict("MALI: **ako**\nTAMANG SAGOT: Ako ay masaya.").unwrap();
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["mali"][0], "ako");
        assert_eq!(json["tamang_sagot"], "Ako ay masaya.");
    }
}
