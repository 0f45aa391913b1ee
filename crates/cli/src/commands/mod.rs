//! Command handlers for the helpdesk CLI.

pub mod ask;
pub mod topics;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use topics::TopicsCommand;

use helpdesk_core::{config::AppConfig, AppError, AppResult};
use helpdesk_knowledge::CorpusRetriever;
use std::path::PathBuf;

/// Load the corpus named by `--corpus`, falling back to the configured one.
pub(crate) fn load_corpus(config: &AppConfig, corpus: Option<&PathBuf>) -> AppResult<CorpusRetriever> {
    let path = corpus.cloned().or_else(|| config.corpus_path()).ok_or_else(|| {
        AppError::Config(
            "No corpus configured. Pass --corpus or set retrieval.corpus / HELPDESK_CORPUS"
                .to_string(),
        )
    })?;

    CorpusRetriever::load(&path, config.top_k)
}
