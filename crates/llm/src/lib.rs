//! Text-generation integration for the helpdesk pipeline.
//!
//! A provider-agnostic `LlmClient` trait with two backends:
//! - **OpenAI**: chat completions API (default)
//! - **Ollama**: local LLM runtime
//!
//! # Example
//! ```no_run
//! use helpdesk_llm::{complete, providers::OpenAiClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new("sk-...");
//! let text = complete(&client, "Say hello", "gpt-4o-mini", 0.0).await?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{complete, LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::{OllamaClient, OpenAiClient};
pub use types::ProviderType;
