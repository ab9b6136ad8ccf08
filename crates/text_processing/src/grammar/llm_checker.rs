//! LLM-backed grammar checker

use async_trait::async_trait;
use std::sync::Arc;
use tagasuri_core::{
    GenerateRequest, GrammarChecker, LanguageModel, RelayOutcome, Result,
};

use super::LlmCheckerConfig;
use crate::TextProcessingError;

/// Grammar checker that relays each sentence to a language model
pub struct LlmGrammarChecker {
    llm: Arc<dyn LanguageModel>,
    config: LlmCheckerConfig,
    markers: Vec<String>,
}

impl LlmGrammarChecker {
    pub fn new(llm: Arc<dyn LanguageModel>, config: LlmCheckerConfig) -> Self {
        let markers = config
            .no_error_markers
            .iter()
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();
        Self {
            llm,
            config,
            markers,
        }
    }

    fn build_request(&self, text: &str) -> GenerateRequest {
        GenerateRequest::new(self.config.system_prompt.as_str())
            .with_user_message(text)
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens)
    }

    /// Classify a trimmed reply
    fn classify(&self, payload: &str) -> RelayOutcome {
        if payload.is_empty() || self.is_no_error_marker(payload) {
            RelayOutcome::NoCorrection
        } else {
            RelayOutcome::Correction(payload.to_string())
        }
    }

    fn is_no_error_marker(&self, payload: &str) -> bool {
        let bare = payload
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        self.markers.iter().any(|m| *m == bare)
    }
}

#[async_trait]
impl GrammarChecker for LlmGrammarChecker {
    async fn check(&self, text: &str) -> Result<RelayOutcome> {
        if text.trim().is_empty() {
            return Err(TextProcessingError::InvalidInput("empty sentence".to_string()).into());
        }

        let response = self.llm.generate(self.build_request(text)).await?;
        let outcome = self.classify(response.text.trim());

        tracing::debug!(
            model = self.llm.model_name(),
            correction = outcome.is_correction(),
            "Grammar model replied"
        );
        Ok(outcome)
    }

    fn name(&self) -> &str {
        "llm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tagasuri_core::{Error, GenerateResponse, Role};

    struct ScriptedLlm {
        reply: std::result::Result<String, String>,
        seen: Mutex<Vec<GenerateRequest>>,
    }

    impl ScriptedLlm {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(message.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedLlm {
        async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
            self.seen.lock().unwrap().push(request);
            match &self.reply {
                Ok(text) => Ok(GenerateResponse::text(text.clone())),
                Err(msg) => Err(Error::Llm(msg.clone())),
            }
        }

        async fn is_available(&self) -> bool {
            self.reply.is_ok()
        }

        fn model_name(&self) -> &str {
            "scripted"
        }
    }

    fn checker(llm: Arc<ScriptedLlm>) -> LlmGrammarChecker {
        LlmGrammarChecker::new(llm, LlmCheckerConfig::new("Ikaw ay isang tagasuri"))
    }

    #[tokio::test]
    async fn test_correction_is_trimmed() {
        let llm = ScriptedLlm::replying("\n  MALI: **ako**\nTAMANG SAGOT: Ako ay masaya.  \n");
        let outcome = checker(llm).check("ako ay masaya.").await.unwrap();
        assert_eq!(
            outcome,
            RelayOutcome::Correction("MALI: **ako**\nTAMANG SAGOT: Ako ay masaya.".to_string())
        );
    }

    #[tokio::test]
    async fn test_request_shape() {
        let llm = ScriptedLlm::replying("");
        checker(llm.clone()).check("Ako ay masaya.").await.unwrap();

        let seen = llm.seen.lock().unwrap();
        let request = &seen[0];
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[0].content, "Ikaw ay isang tagasuri");
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.messages[1].content, "Ako ay masaya.");
        assert_eq!(request.temperature, Some(0.0));
        assert_eq!(request.max_tokens, Some(200));
    }

    #[tokio::test]
    async fn test_empty_reply_is_no_correction() {
        let outcome = checker(ScriptedLlm::replying("   \n"))
            .check("Ako ay masaya.")
            .await
            .unwrap();
        assert_eq!(outcome, RelayOutcome::NoCorrection);
    }

    #[tokio::test]
    async fn test_no_error_marker() {
        for reply in ["Walang mali.", "WALANG MALI", "  walang mali!  "] {
            let outcome = checker(ScriptedLlm::replying(reply))
                .check("Ako ay masaya.")
                .await
                .unwrap();
            assert_eq!(outcome, RelayOutcome::NoCorrection, "reply {reply:?}");
        }

        // The marker must be the whole reply
        let outcome = checker(ScriptedLlm::replying("Walang mali sa simula, pero..."))
            .check("Ako ay masaya.")
            .await
            .unwrap();
        assert!(outcome.is_correction());
    }

    #[tokio::test]
    async fn test_custom_markers() {
        let config = LlmCheckerConfig::new("s").with_no_error_markers(["Tama"]);
        let checker = LlmGrammarChecker::new(ScriptedLlm::replying("tama."), config);
        assert_eq!(
            checker.check("Ako ay masaya.").await.unwrap(),
            RelayOutcome::NoCorrection
        );
    }

    #[tokio::test]
    async fn test_llm_error_propagates() {
        let err = checker(ScriptedLlm::failing("timeout"))
            .check("Ako ay masaya.")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Llm(_)));
    }

    #[tokio::test]
    async fn test_empty_input_skips_model() {
        let llm = ScriptedLlm::replying("MALI: **x**");
        let err = checker(llm.clone()).check("   ").await.unwrap_err();
        assert!(matches!(err, Error::TextProcessing(_)));
        assert!(llm.seen.lock().unwrap().is_empty());
    }
}
