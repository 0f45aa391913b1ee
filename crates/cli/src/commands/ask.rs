//! Ask command handler.
//!
//! Answers a question from the help-center corpus.

use clap::Args;
use helpdesk_core::{config::AppConfig, AppError, AppResult};
use helpdesk_knowledge::{AnswerGenerator, AnswerOutcome};
use std::path::PathBuf;
use std::sync::Arc;

use super::load_corpus;

/// Ask a question answered only from help-center articles
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Restrict retrieval to a topic (repeatable)
    #[arg(short, long = "topic")]
    pub topics: Vec<String>,

    /// Help-center export (.json, .yaml) to retrieve from
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let question = self.question.trim();
        if question.is_empty() {
            return Err(AppError::Config("Question cannot be empty".to_string()));
        }

        config.validate()?;

        let retriever = load_corpus(config, self.corpus.as_ref())?;
        let generator = AnswerGenerator::from_config(config, Arc::new(retriever))?;

        let outcome = generator
            .generate_answer(question, self.topic_filter())
            .await?;

        self.print(&outcome)
    }

    /// Topic filter; no `--topic` flags means unrestricted.
    fn topic_filter(&self) -> Option<&[String]> {
        if self.topics.is_empty() {
            None
        } else {
            Some(self.topics.as_slice())
        }
    }

    fn print(&self, outcome: &AnswerOutcome) -> AppResult<()> {
        if self.json {
            let json = serde_json::to_string_pretty(outcome)?;
            println!("{}", json);
        } else {
            println!("{}", outcome);
        }

        Ok(())
    }
}
