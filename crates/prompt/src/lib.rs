//! Prompt rendering for the helpdesk pipeline.
//!
//! - Handlebars rendering of `{{field}}` templates
//! - The fixed support-answer instruction template

pub mod builder;
pub mod templates;
pub mod types;

// Re-export main types
pub use builder::{build_answer_prompt, render};
pub use templates::{SUPPORT_ANSWER_TEMPLATE, SUPPORT_ANSWER_TEMPLATE_ID};
pub use types::{BuiltPrompt, BuiltPromptMetadata};
