//! Help-center knowledge and answering.
//!
//! - `Document` and the `Retriever` trait
//! - `CorpusRetriever`, a keyword retriever over a help-center export
//! - `rag`: context formatting and the answer generator

pub mod corpus;
pub mod rag;
pub mod retriever;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use corpus::CorpusRetriever;
pub use rag::{format_context, AnswerGenerator, AnswerOutcome, AnswerResult, NOT_FOUND_MESSAGE};
pub use retriever::Retriever;
pub use types::Document;
