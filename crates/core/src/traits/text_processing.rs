//! Text processing traits

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of relaying a sentence to the grammar model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum RelayOutcome {
    /// Trimmed model answer in `MALI:` / `TAMANG SAGOT:` form
    Correction(String),
    /// The model found nothing to correct
    NoCorrection,
}

impl RelayOutcome {
    pub fn is_correction(&self) -> bool {
        matches!(self, RelayOutcome::Correction(_))
    }
}

/// Grammar checking interface
///
/// Implementations:
/// - `LlmGrammarChecker` - relays to a `LanguageModel` with the fixed
///   instruction prompt
///
/// # Example
///
/// ```ignore
/// let checker: Arc<dyn GrammarChecker> = Arc::new(LlmGrammarChecker::new(llm, config));
/// match checker.check("Ako ay masaya.").await? {
///     RelayOutcome::Correction(text) => println!("{}", text),
///     RelayOutcome::NoCorrection => println!("walang mali"),
/// }
/// ```
#[async_trait]
pub trait GrammarChecker: Send + Sync + 'static {
    /// Check one sentence
    async fn check(&self, text: &str) -> Result<RelayOutcome>;

    /// Name for logging
    fn name(&self) -> &str;
}
