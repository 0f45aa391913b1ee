//! Answer pipeline result types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Returned instead of an answer when retrieval finds nothing.
pub const NOT_FOUND_MESSAGE: &str =
    "I couldn't find any information in the help center matching your request.";

/// A generated answer and the documents it was conditioned on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Model-generated answer text
    pub answer: String,

    /// Titles of every document placed in the context, in retrieval order
    pub sources: Vec<String>,
}

/// Outcome of one answer request.
///
/// Serializes as a bare string for `NotFound` and as
/// `{"answer": ..., "sources": [...]}` for `Answered`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerOutcome {
    /// Retrieval returned nothing; carries the fixed informational message
    NotFound(String),

    /// The model answered from the retrieved context
    Answered(AnswerResult),
}

impl AnswerOutcome {
    /// The not-found outcome with the fixed message.
    pub fn not_found() -> Self {
        AnswerOutcome::NotFound(NOT_FOUND_MESSAGE.to_string())
    }

    /// Whether retrieval came back empty.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AnswerOutcome::NotFound(_))
    }

    /// The answer, if one was generated.
    pub fn as_answer(&self) -> Option<&AnswerResult> {
        match self {
            AnswerOutcome::Answered(result) => Some(result),
            AnswerOutcome::NotFound(_) => None,
        }
    }
}

impl fmt::Display for AnswerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerOutcome::NotFound(message) => write!(f, "{}", message),
            AnswerOutcome::Answered(result) => {
                write!(f, "{}", result.answer)?;
                if !result.sources.is_empty() {
                    write!(f, "\n\nSources:")?;
                    for source in &result.sources {
                        write!(f, "\n- {}", source)?;
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answered() -> AnswerOutcome {
        AnswerOutcome::Answered(AnswerResult {
            answer: "Open CRM and click New Proposal.".to_string(),
            sources: vec!["Creating Proposals in CRM".to_string()],
        })
    }

    #[test]
    fn test_not_found_outcome() {
        let outcome = AnswerOutcome::not_found();
        assert!(outcome.is_not_found());
        assert!(outcome.as_answer().is_none());
        assert_eq!(outcome.to_string(), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_not_found_serializes_as_string() {
        let json = serde_json::to_value(AnswerOutcome::not_found()).unwrap();
        assert_eq!(json, serde_json::json!(NOT_FOUND_MESSAGE));
    }

    #[test]
    fn test_answered_serializes_as_object() {
        let json = serde_json::to_value(answered()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "answer": "Open CRM and click New Proposal.",
                "sources": ["Creating Proposals in CRM"]
            })
        );
    }

    #[test]
    fn test_deserialize_both_shapes() {
        let not_found: AnswerOutcome =
            serde_json::from_str(&format!("\"{}\"", NOT_FOUND_MESSAGE)).unwrap();
        assert!(not_found.is_not_found());

        let answer: AnswerOutcome =
            serde_json::from_str(r#"{"answer": "Yes", "sources": ["A", "A"]}"#).unwrap();
        assert_eq!(answer.as_answer().unwrap().sources, vec!["A", "A"]);
    }

    #[test]
    fn test_display_lists_sources() {
        assert_eq!(
            answered().to_string(),
            "Open CRM and click New Proposal.\n\nSources:\n- Creating Proposals in CRM"
        );
    }
}
