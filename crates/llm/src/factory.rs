//! LLM provider factory.
//!
//! Builds the configured generation backend from a provider name, an
//! optional endpoint, and an optional API key.

use crate::client::LlmClient;
use crate::providers::{OllamaClient, OpenAiClient};
use crate::types::ProviderType;
use helpdesk_core::{AppError, AppResult};
use std::sync::Arc;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("openai", "ollama")
/// * `endpoint` - Optional custom base URL
/// * `api_key` - API key (required by OpenAI)
///
/// # Errors
/// Returns `AppError::Config` if the provider is unknown or a required key is missing.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> AppResult<Arc<dyn LlmClient>> {
    let provider_type = ProviderType::parse(provider)
        .ok_or_else(|| AppError::Config(format!("Unknown provider: {}", provider)))?;

    tracing::debug!(provider = provider_type.as_str(), ?endpoint, "Creating LLM client");

    match provider_type {
        ProviderType::OpenAI => {
            let api_key = api_key
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| AppError::Config("OpenAI provider requires API key".to_string()))?;

            let client = match endpoint {
                Some(base_url) => OpenAiClient::with_base_url(api_key, base_url),
                None => OpenAiClient::new(api_key),
            };
            Ok(Arc::new(client))
        }
        ProviderType::Ollama => {
            let client = match endpoint {
                Some(base_url) => OllamaClient::with_base_url(base_url),
                None => OllamaClient::new(),
            };
            Ok(Arc::new(client))
        }
    }
}
