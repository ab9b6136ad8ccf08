//! Text processing for the Filipino grammar checker
//!
//! This crate provides the request-side filters and the grammar relay:
//! - **Profanity**: reject or censor disallowed terms
//! - **Language Gate**: reject sentences that are not mostly Filipino
//! - **Repetition**: reject immediately repeated words
//! - **Capitalization**: report or fix a lowercase first letter
//! - **Hyphenation**: insert or remove the hyphen after Filipino prefixes
//! - **Grammar Relay**: forward the sentence to a language model
//!
//! # Example
//!
//! ```ignore
//! use tagasuri_text_processing::{PipelineConfig, PipelineOutcome, TextProcessingPipeline};
//!
//! let pipeline = TextProcessingPipeline::new(PipelineConfig::default(), lexicon, checker);
//!
//! match pipeline.process("Napakainit ngayon.") {
//!     PipelineOutcome::Accepted(text) => println!("Relay: {}", text.processed),
//!     PipelineOutcome::Rejected(rejection) => println!("{}", rejection.message),
//! }
//! ```

pub mod capitalization;
pub mod grammar;
pub mod hyphenation;
pub mod language;
pub mod profanity;
pub mod repetition;
pub mod tokens;

mod error;
mod pipeline;

pub use error::{Result, TextProcessingError};
pub use pipeline::{
    CheckOutcome, PipelineConfig, PipelineOutcome, ProcessedText, ProcessingStep, Rejection,
    TextProcessingPipeline,
};

pub use capitalization::{CapitalizationFix, CapitalizationNormalizer};
pub use grammar::{create_checker, parse_verdict, GrammarVerdict, LlmCheckerConfig, LlmGrammarChecker};
pub use hyphenation::{HyphenCorrection, HyphenationCorrector};
pub use language::LanguageGate;
pub use profanity::ProfanityFilter;
pub use repetition::first_immediate_repeat;
