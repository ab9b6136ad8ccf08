//! Core traits for the grammar checker
//!
//! Backends sit behind these traits so they can be swapped by
//! configuration and replaced with mocks in tests.
//!
//! ```text
//! Language Models:
//!   - LanguageModel: chat completion against an external service
//!
//! Text Processing:
//!   - GrammarChecker: text in, correction (or none) out
//! ```

mod llm;
mod text_processing;

pub use llm::LanguageModel;
pub use text_processing::{GrammarChecker, RelayOutcome};
