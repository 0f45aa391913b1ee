//! Retriever abstraction.

use crate::types::Document;
use helpdesk_core::AppResult;

/// Source of ranked documents for a question.
///
/// An empty `Vec` means nothing relevant was found and is not an error.
/// Failures to complete the lookup are reported as `AppError::Retrieval`.
#[async_trait::async_trait]
pub trait Retriever: Send + Sync {
    /// Short name for logging (e.g., "corpus").
    fn name(&self) -> &str;

    /// Return documents for `question`, best first.
    ///
    /// `topics` narrows the search to documents tagged with any of the given
    /// topics; `None` means unrestricted.
    async fn retrieve(&self, question: &str, topics: Option<&[String]>)
        -> AppResult<Vec<Document>>;
}
