//! Sentence pipeline
//!
//! Order: Input validation → Profanity → Language gate → Repetition →
//! Capitalization → Hyphenation → Grammar relay. Any stage that rejects
//! ends the request; only text that clears every gate reaches the model.

use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tagasuri_core::{
    CapitalizationAction, GrammarChecker, Lexicon, ProfanityAction, RejectionKind,
    RejectionMessages, RelayOutcome,
};

use crate::{
    capitalization::CapitalizationNormalizer, hyphenation::HyphenationCorrector,
    language::LanguageGate, profanity::ProfanityFilter, repetition::first_immediate_repeat,
};

/// Sentence pipeline: six deterministic filters and the grammar relay
pub struct TextProcessingPipeline {
    profanity: ProfanityFilter,
    language: LanguageGate,
    capitalization: CapitalizationNormalizer,
    hyphenation: HyphenationCorrector,
    checker: Arc<dyn GrammarChecker>,
    config: PipelineConfig,
}

impl TextProcessingPipeline {
    /// Build every filter from the lexicon once
    pub fn new(config: PipelineConfig, lexicon: Lexicon, checker: Arc<dyn GrammarChecker>) -> Self {
        let profanity = ProfanityFilter::new(&lexicon.disallowed, config.mask_token.as_str());
        let language = LanguageGate::new(
            lexicon.native,
            lexicon.foreign,
            &lexicon.affixes,
            &config.extra_native_prefixes,
            config.min_native_ratio,
            config.min_native_tokens,
        );
        let hyphenation = HyphenationCorrector::new(lexicon.affixes);

        Self {
            profanity,
            language,
            capitalization: CapitalizationNormalizer::new(),
            hyphenation,
            checker,
            config,
        }
    }

    /// Run the deterministic filters
    pub fn process(&self, text: &str) -> PipelineOutcome {
        let mut result = ProcessedText {
            original: text.to_string(),
            processed: text.to_string(),
            steps: Vec::new(),
        };
        let messages = &self.config.messages;

        // Step 1: Input validation
        if text.trim().is_empty() {
            return self.reject(RejectionKind::EmptyInput, messages.empty_input.clone(), text);
        }

        // Step 2: Profanity
        if self.profanity.contains_disallowed(&result.processed) {
            match self.config.profanity_action {
                ProfanityAction::Reject => {
                    if let Some(term) = self.profanity.first_match(&result.processed) {
                        tracing::info!(term = %term, "Disallowed term found");
                    }
                    return self.reject(RejectionKind::Profanity, messages.profanity.clone(), text);
                }
                ProfanityAction::Censor => {
                    let censored = self.profanity.censor(&result.processed);
                    result.apply("profanity_censor", censored, None);
                }
            }
        }

        // Step 3: Language gate
        if self.language.should_reject(&result.processed) {
            return self.reject(
                RejectionKind::ForeignLanguage,
                messages.foreign_language.clone(),
                text,
            );
        }

        // Step 4: Repetition
        if let Some(token) = first_immediate_repeat(&result.processed) {
            return self.reject(RejectionKind::Repetition, messages.repetition_for(&token), text);
        }

        // Step 5: Capitalization
        if let Some(fix) = self.capitalization.check(&result.processed) {
            match self.config.capitalization_action {
                CapitalizationAction::Report => {
                    let message = RejectionMessages::capitalization_for(&fix.flagged, &fix.corrected);
                    return self.reject(RejectionKind::Capitalization, message, text);
                }
                CapitalizationAction::Fix => {
                    let metadata = format!("flagged: {}", fix.flagged);
                    result.apply("capitalization", fix.corrected, Some(metadata));
                }
            }
        }

        // Step 6: Hyphenation
        let changes = self.hyphenation.corrections(&result.processed);
        if !changes.is_empty() {
            let corrected = self.hyphenation.correct(&result.processed);
            let metadata = changes
                .iter()
                .map(|c| format!("{} -> {}", c.original, c.corrected))
                .collect::<Vec<_>>()
                .join(", ");
            result.apply("hyphenation", corrected, Some(metadata));
        }

        PipelineOutcome::Accepted(result)
    }

    /// Run the filters, then relay accepted text to the grammar model
    pub async fn check(&self, text: &str) -> tagasuri_core::Result<CheckOutcome> {
        let processed = match self.process(text) {
            PipelineOutcome::Rejected(rejection) => return Ok(CheckOutcome::Rejected(rejection)),
            PipelineOutcome::Accepted(processed) => processed,
        };

        let start = Instant::now();
        let outcome = self.checker.check(&processed.processed).await?;
        let elapsed = start.elapsed();

        tracing::debug!(
            checker = self.checker.name(),
            elapsed_ms = elapsed.as_millis() as u64,
            steps = processed.steps.len(),
            "Sentence relayed"
        );

        Ok(CheckOutcome::Relayed {
            processed,
            outcome,
            elapsed,
        })
    }

    pub fn checker(&self) -> &Arc<dyn GrammarChecker> {
        &self.checker
    }

    fn reject(&self, kind: RejectionKind, message: String, text: &str) -> PipelineOutcome {
        tracing::info!(
            kind = %kind,
            text = %self.profanity.censor(text),
            "Sentence rejected"
        );
        PipelineOutcome::Rejected(Rejection { kind, message })
    }
}

/// Pipeline settings
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Share of native tokens a foreign-looking sentence needs to pass
    pub min_native_ratio: f32,
    /// Native tokens a foreign-looking sentence needs to pass
    pub min_native_tokens: usize,
    /// Prefixes counted as native besides those in the affix table
    pub extra_native_prefixes: Vec<String>,
    /// Replacement for censored terms
    pub mask_token: String,
    pub profanity_action: ProfanityAction,
    pub capitalization_action: CapitalizationAction,
    pub messages: RejectionMessages,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_native_ratio: 0.40,
            min_native_tokens: 1,
            extra_native_prefixes: Vec::new(),
            mask_token: "****".to_string(),
            profanity_action: ProfanityAction::default(),
            capitalization_action: CapitalizationAction::default(),
            messages: RejectionMessages::default(),
        }
    }
}

/// Result of the deterministic filters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PipelineOutcome {
    Rejected(Rejection),
    Accepted(ProcessedText),
}

/// Result of the full pipeline including the relay
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Rejected(Rejection),
    Relayed {
        processed: ProcessedText,
        outcome: RelayOutcome,
        /// Time spent waiting on the grammar model
        elapsed: Duration,
    },
}

/// Early rejection with its user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub kind: RejectionKind,
    pub message: String,
}

/// Text that cleared every filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedText {
    /// Original input text
    pub original: String,
    /// Text sent to the grammar model
    pub processed: String,
    /// Steps that changed the text
    pub steps: Vec<ProcessingStep>,
}

impl ProcessedText {
    fn apply(&mut self, name: &str, output: String, metadata: Option<String>) {
        if output == self.processed {
            return;
        }
        self.steps.push(ProcessingStep {
            name: name.to_string(),
            input: std::mem::replace(&mut self.processed, output.clone()),
            output,
            metadata,
        });
    }
}

/// A single processing step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingStep {
    /// Step name
    pub name: String,
    /// Input to this step
    pub input: String,
    /// Output from this step
    pub output: String,
    /// Optional metadata
    pub metadata: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tagasuri_core::{AffixRule, AffixRuleTable, Error, WordList};

    /// Records what reaches the model and answers with a fixed reply
    struct RecordingChecker {
        seen: Mutex<Vec<String>>,
        reply: RelayOutcome,
    }

    impl RecordingChecker {
        fn new(reply: RelayOutcome) -> Arc<Self> {
            Arc::new(Self {
                seen: Mutex::new(Vec::new()),
                reply,
            })
        }
    }

    #[async_trait]
    impl GrammarChecker for RecordingChecker {
        async fn check(&self, text: &str) -> tagasuri_core::Result<RelayOutcome> {
            self.seen.lock().unwrap().push(text.to_string());
            Ok(self.reply.clone())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    struct FailingChecker;

    #[async_trait]
    impl GrammarChecker for FailingChecker {
        async fn check(&self, _text: &str) -> tagasuri_core::Result<RelayOutcome> {
            Err(Error::Llm("connection refused".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn lexicon() -> Lexicon {
        Lexicon {
            native: WordList::new(["ang", "ng", "ay", "sa", "mga", "ako", "ni", "at", "ngayon"]),
            foreign: WordList::new(["the", "is", "house", "big", "very"]),
            disallowed: WordList::new(["gago", "putangina"]),
            affixes: AffixRuleTable::new(vec![
                AffixRule::bare("napaka"),
                AffixRule::new("mag", ["mag-text"], ["maganda"]),
            ]),
        }
    }

    fn pipeline_with(config: PipelineConfig, checker: Arc<dyn GrammarChecker>) -> TextProcessingPipeline {
        TextProcessingPipeline::new(config, lexicon(), checker)
    }

    fn pipeline(config: PipelineConfig) -> TextProcessingPipeline {
        pipeline_with(config, RecordingChecker::new(RelayOutcome::NoCorrection))
    }

    fn rejection(outcome: PipelineOutcome) -> Rejection {
        match outcome {
            PipelineOutcome::Rejected(r) => r,
            PipelineOutcome::Accepted(t) => panic!("expected rejection, got {t:?}"),
        }
    }

    fn accepted(outcome: PipelineOutcome) -> ProcessedText {
        match outcome {
            PipelineOutcome::Accepted(t) => t,
            PipelineOutcome::Rejected(r) => panic!("expected acceptance, got {r:?}"),
        }
    }

    #[test]
    fn test_empty_input_rejected() {
        let p = pipeline(PipelineConfig::default());
        for input in ["", "   ", "\n\t"] {
            let r = rejection(p.process(input));
            assert_eq!(r.kind, RejectionKind::EmptyInput);
            assert_eq!(r.message, "Walang laman ang pangungusap.");
        }
    }

    #[test]
    fn test_profanity_rejected_by_default() {
        let r = rejection(pipeline(PipelineConfig::default()).process("Ang gago mo."));
        assert_eq!(r.kind, RejectionKind::Profanity);
        assert_eq!(r.message, "May hindi angkop na salita sa pangungusap.");
    }

    #[test]
    fn test_profanity_censored_when_configured() {
        let config = PipelineConfig {
            profanity_action: ProfanityAction::Censor,
            ..Default::default()
        };
        let text = accepted(pipeline(config).process("Ang gago ay napakainit."));
        assert_eq!(text.processed, "Ang **** ay napaka-init.");
        assert_eq!(text.steps[0].name, "profanity_censor");
        assert_eq!(text.steps[1].name, "hyphenation");
    }

    #[test]
    fn test_foreign_language_rejected() {
        let r = rejection(pipeline(PipelineConfig::default()).process("The house is very big."));
        assert_eq!(r.kind, RejectionKind::ForeignLanguage);
    }

    #[test]
    fn test_mostly_native_with_foreign_word_accepted() {
        let text = accepted(pipeline(PipelineConfig::default()).process("Ang house ay napakaganda."));
        assert!(text.steps.is_empty());
    }

    #[test]
    fn test_repetition_rejected() {
        let r = rejection(pipeline(PipelineConfig::default()).process("Ang ang bahay."));
        assert_eq!(r.kind, RejectionKind::Repetition);
        assert_eq!(r.message, "May paulit-ulit na salita: \"Ang\".");
    }

    #[test]
    fn test_capitalization_reported_in_answer_format() {
        let r = rejection(pipeline(PipelineConfig::default()).process("ako ay masaya."));
        assert_eq!(r.kind, RejectionKind::Capitalization);
        assert_eq!(r.message, "MALI: **ako**\nTAMANG SAGOT: Ako ay masaya.");
    }

    #[test]
    fn test_capitalization_fixed_when_configured() {
        let config = PipelineConfig {
            capitalization_action: CapitalizationAction::Fix,
            ..Default::default()
        };
        let text = accepted(pipeline(config).process("napakainit ngayon."));
        assert_eq!(text.original, "napakainit ngayon.");
        assert_eq!(text.processed, "Napaka-init ngayon.");
        let names: Vec<&str> = text.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["capitalization", "hyphenation"]);
        assert_eq!(text.steps[1].input, "Napakainit ngayon.");
    }

    #[test]
    fn test_hyphenation_step_metadata() {
        let text = accepted(pipeline(PipelineConfig::default()).process("Napaka-bait ni Ana."));
        assert_eq!(text.processed, "Napakabait ni Ana.");
        assert_eq!(text.steps.len(), 1);
        assert_eq!(
            text.steps[0].metadata.as_deref(),
            Some("Napaka-bait -> Napakabait")
        );
    }

    #[test]
    fn test_stage_order_profanity_before_language() {
        // Both foreign and profane: profanity wins
        let r = rejection(pipeline(PipelineConfig::default()).process("The gago is big."));
        assert_eq!(r.kind, RejectionKind::Profanity);
    }

    #[test]
    fn test_stage_order_language_before_repetition() {
        let r = rejection(pipeline(PipelineConfig::default()).process("The the house is big."));
        assert_eq!(r.kind, RejectionKind::ForeignLanguage);
    }

    #[test]
    fn test_stage_order_repetition_before_capitalization() {
        let r = rejection(pipeline(PipelineConfig::default()).process("ang ang bahay"));
        assert_eq!(r.kind, RejectionKind::Repetition);
    }

    #[tokio::test]
    async fn test_check_relays_processed_text() {
        let checker = RecordingChecker::new(RelayOutcome::Correction(
            "MALI: **ng**\nTAMANG SAGOT: Nang umuwi siya.".to_string(),
        ));
        let p = pipeline_with(PipelineConfig::default(), checker.clone());

        match p.check("Napakainit ngayon.").await.unwrap() {
            CheckOutcome::Relayed { processed, outcome, .. } => {
                assert_eq!(processed.processed, "Napaka-init ngayon.");
                assert!(outcome.is_correction());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(*checker.seen.lock().unwrap(), vec!["Napaka-init ngayon."]);
    }

    #[tokio::test]
    async fn test_rejection_never_reaches_model() {
        let checker = RecordingChecker::new(RelayOutcome::NoCorrection);
        let p = pipeline_with(PipelineConfig::default(), checker.clone());

        for input in ["", "Ang gago mo.", "The house is big.", "Ang ang bahay.", "ako ay masaya."] {
            let outcome = p.check(input).await.unwrap();
            assert!(matches!(outcome, CheckOutcome::Rejected(_)), "input {input:?}");
        }
        assert!(checker.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_check_propagates_model_errors() {
        let p = pipeline_with(PipelineConfig::default(), Arc::new(FailingChecker));
        let err = p.check("Ako ay masaya.").await.unwrap_err();
        assert!(matches!(err, Error::Llm(_)));
        assert_eq!(p.checker().name(), "failing");
    }

    #[test]
    fn test_custom_messages() {
        let config = PipelineConfig {
            messages: RejectionMessages {
                foreign_language: "Filipino lamang.".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let r = rejection(pipeline(config).process("The house is big."));
        assert_eq!(r.message, "Filipino lamang.");
    }

    fn builtin_pipeline() -> TextProcessingPipeline {
        use tagasuri_config::constants::filters;

        let config = PipelineConfig {
            extra_native_prefixes: filters::EXTRA_NATIVE_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            ..Default::default()
        };
        TextProcessingPipeline::new(
            config,
            tagasuri_config::builtin_lexicon(),
            RecordingChecker::new(RelayOutcome::NoCorrection),
        )
    }

    #[test]
    fn test_builtin_disallowed_terms_rejected_standalone() {
        let p = builtin_pipeline();
        for term in tagasuri_config::constants::words::DISALLOWED {
            let r = rejection(p.process(&format!("Ang {} ay masama.", term)));
            assert_eq!(r.kind, RejectionKind::Profanity, "term {term:?}");
            assert_eq!(r.message, "May hindi angkop na salita sa pangungusap.");
        }
    }

    #[test]
    fn test_builtin_disallowed_terms_ignored_inside_words() {
        let p = builtin_pipeline();
        for term in tagasuri_config::constants::words::DISALLOWED {
            let text = format!("Ang x{}x ay bahay.", term);
            let t = accepted(p.process(&text));
            assert_eq!(t.processed, text);
        }
    }

    #[test]
    fn test_builtin_foreign_words_rejected() {
        let p = builtin_pipeline();
        let foreign = tagasuri_config::constants::words::FOREIGN;

        let r = rejection(p.process(&format!("{}.", foreign.join(" "))));
        assert_eq!(r.kind, RejectionKind::ForeignLanguage);

        for word in foreign {
            let r = rejection(p.process(&format!("{}.", word)));
            assert_eq!(r.kind, RejectionKind::ForeignLanguage, "word {word:?}");
        }
    }
}
