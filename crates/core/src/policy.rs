//! Filter policy types
//!
//! What each pre-filter does when it fires, and the fixed user-facing
//! messages returned for early rejections.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the profanity filter does on a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfanityAction {
    /// End the request with the profanity message
    #[default]
    Reject,
    /// Mask matches and keep going
    Censor,
}

/// What the capitalization normalizer does on a lowercase sentence start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapitalizationAction {
    /// End the request with a `MALI:` / `TAMANG SAGOT:` answer
    #[default]
    Report,
    /// Apply the fix and keep going
    Fix,
}

/// Why a request was stopped before reaching the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionKind {
    EmptyInput,
    Profanity,
    ForeignLanguage,
    Repetition,
    Capitalization,
}

impl RejectionKind {
    /// Stable label for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionKind::EmptyInput => "empty_input",
            RejectionKind::Profanity => "profanity",
            RejectionKind::ForeignLanguage => "foreign_language",
            RejectionKind::Repetition => "repetition",
            RejectionKind::Capitalization => "capitalization",
        }
    }

    /// Only empty input is a client error; the rest are answers
    pub fn is_validation_failure(&self) -> bool {
        matches!(self, RejectionKind::EmptyInput)
    }
}

impl fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed rejection messages
///
/// `repetition` may contain a `{token}` placeholder, replaced with the
/// repeated word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionMessages {
    #[serde(default = "default_empty_input")]
    pub empty_input: String,
    #[serde(default = "default_profanity")]
    pub profanity: String,
    #[serde(default = "default_foreign_language")]
    pub foreign_language: String,
    #[serde(default = "default_repetition")]
    pub repetition: String,
}

fn default_empty_input() -> String {
    "Walang laman ang pangungusap.".to_string()
}

fn default_profanity() -> String {
    "May hindi angkop na salita sa pangungusap.".to_string()
}

fn default_foreign_language() -> String {
    "Ang pangungusap ay hindi nakasulat sa wikang Filipino.".to_string()
}

fn default_repetition() -> String {
    "May paulit-ulit na salita: \"{token}\".".to_string()
}

impl Default for RejectionMessages {
    fn default() -> Self {
        Self {
            empty_input: default_empty_input(),
            profanity: default_profanity(),
            foreign_language: default_foreign_language(),
            repetition: default_repetition(),
        }
    }
}

impl RejectionMessages {
    /// Repetition message with the repeated token filled in
    pub fn repetition_for(&self, token: &str) -> String {
        self.repetition.replace("{token}", token)
    }

    /// Answer-format message for a lowercase sentence start
    pub fn capitalization_for(flagged: &str, corrected: &str) -> String {
        format!("MALI: **{}**\nTAMANG SAGOT: {}", flagged, corrected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_actions() {
        assert_eq!(ProfanityAction::default(), ProfanityAction::Reject);
        assert_eq!(CapitalizationAction::default(), CapitalizationAction::Report);
    }

    #[test]
    fn test_repetition_message() {
        let messages = RejectionMessages::default();
        assert_eq!(
            messages.repetition_for("ang"),
            "May paulit-ulit na salita: \"ang\"."
        );
    }

    #[test]
    fn test_capitalization_message() {
        let msg = RejectionMessages::capitalization_for("ako", "Ako ay masaya.");
        assert_eq!(msg, "MALI: **ako**\nTAMANG SAGOT: Ako ay masaya.");
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&RejectionKind::ForeignLanguage).unwrap();
        assert_eq!(json, "\"foreign_language\"");
        assert!(RejectionKind::EmptyInput.is_validation_failure());
        assert!(!RejectionKind::Profanity.is_validation_failure());
    }

    #[test]
    fn test_messages_partial_deserialize() {
        let messages: RejectionMessages =
            serde_json::from_str(r#"{"profanity": "Bawal iyan."}"#).unwrap();
        assert_eq!(messages.profanity, "Bawal iyan.");
        assert_eq!(messages.empty_input, "Walang laman ang pangungusap.");
    }
}
