//! Topics command handler.

use clap::Args;
use helpdesk_core::{config::AppConfig, AppResult};
use std::path::PathBuf;

use super::load_corpus;

/// List the topics available for --topic filtering
#[derive(Args, Debug)]
pub struct TopicsCommand {
    /// Help-center export (.json, .yaml) to inspect
    #[arg(long)]
    pub corpus: Option<PathBuf>,
}

impl TopicsCommand {
    /// Execute the topics command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let corpus = load_corpus(config, self.corpus.as_ref())?;

        tracing::debug!(
            "Corpus {:?} has {} documents",
            corpus.source(),
            corpus.len()
        );

        for topic in corpus.topics() {
            println!("{}", topic);
        }

        Ok(())
    }
}
