//! Retrieval-augmented answering over help-center documents.
//!
//! retrieve → format context → generate → shape the result.

pub mod answer;
pub mod context;
pub mod types;

pub use answer::AnswerGenerator;
pub use context::format_context;
pub use types::{AnswerOutcome, AnswerResult, NOT_FOUND_MESSAGE};
