//! Core traits and types for the grammar checker
//!
//! This crate provides foundational types used across all other crates:
//! - Core traits for pluggable backends (LLM, grammar checking)
//! - LLM request/response types
//! - Lexicon types (word lists, affix rule table)
//! - Filter policy types (actions, rejection kinds, messages)
//! - Error types

pub mod error;
pub mod lexicon;
pub mod llm_types;
pub mod policy;
pub mod traits;

pub use error::{Error, Result};
pub use lexicon::{AffixRule, AffixRuleTable, Lexicon, WordList};
pub use llm_types::{FinishReason, GenerateRequest, GenerateResponse, Message, Role, TokenUsage};
pub use policy::{CapitalizationAction, ProfanityAction, RejectionKind, RejectionMessages};

pub use traits::{GrammarChecker, LanguageModel, RelayOutcome};
