//! Prompt types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A fully rendered prompt ready for the generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// Rendered prompt text
    pub text: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Template the prompt was rendered from
    #[serde(rename = "templateId")]
    pub template_id: String,

    /// Template fields that were resolved
    #[serde(rename = "resolvedFields")]
    pub resolved_fields: HashMap<String, String>,
}

impl BuiltPrompt {
    /// Create a new built prompt.
    pub fn new(
        text: String,
        template_id: impl Into<String>,
        resolved_fields: HashMap<String, String>,
    ) -> Self {
        Self {
            text,
            metadata: BuiltPromptMetadata {
                template_id: template_id.into(),
                resolved_fields,
            },
        }
    }

    /// Approximate size in characters, for logging.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_prompt_creation() {
        let mut fields = HashMap::new();
        fields.insert("question".to_string(), "Where?".to_string());

        let built = BuiltPrompt::new("Question: Where?".to_string(), "support.answer", fields);

        assert_eq!(built.text, "Question: Where?");
        assert_eq!(built.metadata.template_id, "support.answer");
        assert_eq!(built.metadata.resolved_fields["question"], "Where?");
        assert_eq!(built.char_count(), 16);
    }

    #[test]
    fn test_metadata_serialization_names() {
        let built = BuiltPrompt::new("x".to_string(), "support.answer", HashMap::new());
        let json = serde_json::to_value(&built).unwrap();
        assert_eq!(json["metadata"]["templateId"], "support.answer");
        assert!(json["metadata"]["resolvedFields"].is_object());
    }
}
