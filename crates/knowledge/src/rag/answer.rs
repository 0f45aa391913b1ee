//! Answer generation orchestration.
//!
//! Retrieves documents for a question, renders them into the support-answer
//! prompt, and asks the generation service for an answer grounded in them.

use crate::rag::context::format_context;
use crate::rag::types::{AnswerOutcome, AnswerResult};
use crate::retriever::Retriever;
use helpdesk_core::{AnswerSettings, AppConfig, AppResult};
use helpdesk_llm::{complete, create_client, LlmClient};
use helpdesk_prompt::build_answer_prompt;
use std::sync::Arc;

/// Answers questions from retrieved help-center documents.
///
/// Holds no per-request state, so one generator can serve concurrent calls.
pub struct AnswerGenerator {
    retriever: Arc<dyn Retriever>,
    client: Arc<dyn LlmClient>,
    settings: AnswerSettings,
}

impl AnswerGenerator {
    /// Create a generator from its collaborators and settings.
    pub fn new(
        retriever: Arc<dyn Retriever>,
        client: Arc<dyn LlmClient>,
        settings: AnswerSettings,
    ) -> Self {
        Self {
            retriever,
            client,
            settings,
        }
    }

    /// Create a generator whose LLM client is built from `config`.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the provider is unknown or needs a key
    /// that cannot be resolved.
    pub fn from_config(config: &AppConfig, retriever: Arc<dyn Retriever>) -> AppResult<Self> {
        let api_key = config.resolve_api_key();
        let client = create_client(
            &config.provider,
            config.endpoint.as_deref(),
            api_key.as_deref(),
        )?;

        Ok(Self::new(retriever, client, config.answer_settings()))
    }

    /// Settings this generator was built with.
    pub fn settings(&self) -> &AnswerSettings {
        &self.settings
    }

    /// Answer `question`, optionally restricted to `topics`.
    ///
    /// Returns `AnswerOutcome::NotFound` without calling the generation
    /// service when retrieval finds nothing.
    ///
    /// # Errors
    /// - `AppError::Retrieval` if the retriever fails
    /// - `AppError::Generation` if prompt rendering or the completion fails
    ///
    /// Neither is retried.
    pub async fn generate_answer(
        &self,
        question: &str,
        topics: Option<&[String]>,
    ) -> AppResult<AnswerOutcome> {
        tracing::info!(
            retriever = self.retriever.name(),
            ?topics,
            "Answering question: {}",
            question
        );

        let documents = self
            .retriever
            .retrieve(question, topics)
            .await
            .map_err(|e| e.into_retrieval())?;

        if documents.is_empty() {
            tracing::info!("No documents retrieved; skipping generation");
            return Ok(AnswerOutcome::not_found());
        }

        tracing::debug!("Retrieved {} documents", documents.len());

        let context = format_context(&documents);
        let prompt = build_answer_prompt(&self.settings.persona, &context, question)
            .map_err(|e| e.into_generation())?;

        tracing::debug!(
            template = %prompt.metadata.template_id,
            chars = prompt.char_count(),
            "Rendered answer prompt"
        );

        let answer = complete(
            self.client.as_ref(),
            &prompt.text,
            &self.settings.model,
            self.settings.temperature,
        )
        .await?;

        let sources = documents.into_iter().map(|doc| doc.title).collect();

        Ok(AnswerOutcome::Answered(AnswerResult { answer, sources }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::mocks::{MockLlmClient, StaticRetriever};
    use crate::types::Document;
    use helpdesk_core::AppError;

    #[test]
    fn test_from_config_requires_openai_key() {
        let mut config = AppConfig::default();
        config.api_key = None;
        config.api_key_env = "HELPDESK_TEST_UNSET_KEY_VAR".to_string();

        let retriever = Arc::new(StaticRetriever::new(Vec::new()));
        let result = AnswerGenerator::from_config(&config, retriever);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_from_config_uses_answer_settings() {
        let mut config = AppConfig::default();
        config.provider = "ollama".to_string();
        config.model = "llama3.2".to_string();
        config.persona = "Northwind Support Assistant".to_string();

        let retriever = Arc::new(StaticRetriever::new(Vec::new()));
        let generator = AnswerGenerator::from_config(&config, retriever).unwrap();
        assert_eq!(generator.settings().model, "llama3.2");
        assert_eq!(generator.settings().persona, "Northwind Support Assistant");
        assert_eq!(generator.settings().temperature, 0.0);
    }

    #[tokio::test]
    async fn test_persona_reaches_prompt() {
        let retriever = Arc::new(StaticRetriever::new(vec![Document::new("Billing", "Monthly.")]));
        let client = Arc::new(MockLlmClient::replying("Invoices are monthly."));
        let settings = AnswerSettings {
            persona: "Northwind Support Assistant".to_string(),
            ..AnswerSettings::default()
        };

        let generator = AnswerGenerator::new(retriever, client.clone(), settings);
        generator.generate_answer("When are invoices sent?", None).await.unwrap();

        assert!(client.prompts()[0].starts_with("You are a Northwind Support Assistant."));
    }
}
