//! Knowledge type definitions.

use serde::{Deserialize, Serialize};

/// A help-center document returned by a retriever.
///
/// Only `title` and `content` are read by the answer pipeline; everything
/// else is carried through for callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Article title, reported back as an answer source
    pub title: String,

    /// Article body
    pub content: String,

    /// Topic tags used for filtering (e.g., "CRM", "Billing")
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<String>,

    /// Canonical article URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Additional retriever-specific metadata
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub metadata: serde_json::Value,
}

impl Document {
    /// Create a document with a title and content.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            topics: Vec::new(),
            url: None,
            metadata: serde_json::Value::Null,
        }
    }

    /// Attach topic tags.
    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    /// Attach a canonical URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Whether any of the document's topics matches any requested topic
    /// (ASCII case-insensitive).
    pub fn has_any_topic(&self, topics: &[String]) -> bool {
        self.topics
            .iter()
            .any(|own| topics.iter().any(|wanted| own.eq_ignore_ascii_case(wanted)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_builder() {
        let doc = Document::new("Creating Proposals in CRM", "Open CRM.")
            .with_topics(["CRM", "Sales"])
            .with_url("https://help.example.com/proposals");

        assert_eq!(doc.title, "Creating Proposals in CRM");
        assert_eq!(doc.topics, vec!["CRM".to_string(), "Sales".to_string()]);
        assert_eq!(doc.url.as_deref(), Some("https://help.example.com/proposals"));
    }

    #[test]
    fn test_has_any_topic_is_case_insensitive() {
        let doc = Document::new("t", "c").with_topics(["CRM"]);
        assert!(doc.has_any_topic(&["crm".to_string()]));
        assert!(doc.has_any_topic(&["Billing".to_string(), "CRM".to_string()]));
        assert!(!doc.has_any_topic(&["Billing".to_string()]));
    }

    #[test]
    fn test_deserialize_minimal_document() {
        let doc: Document =
            serde_json::from_str(r#"{"title": "Timesheets", "content": "Submit weekly."}"#).unwrap();
        assert_eq!(doc.title, "Timesheets");
        assert!(doc.topics.is_empty());
        assert!(doc.metadata.is_null());
    }

    #[test]
    fn test_deserialize_keeps_extra_metadata() {
        let doc: Document = serde_json::from_str(
            r#"{"title": "T", "content": "C", "metadata": {"article_id": 42}}"#,
        )
        .unwrap();
        assert_eq!(doc.metadata["article_id"], 42);
    }
}
