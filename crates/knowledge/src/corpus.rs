//! File-backed retriever over a help-center export.
//!
//! The export is a JSON or YAML list of documents (or a map with a
//! `documents` key). Ranking is keyword overlap between the question and
//! each document, with title matches weighted above body matches.

use crate::retriever::Retriever;
use crate::types::Document;
use helpdesk_core::{AppError, AppResult};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Weight of a query term found in the title.
const TITLE_WEIGHT: u32 = 2;

/// Weight of a query term found in the body.
const CONTENT_WEIGHT: u32 = 1;

const STOP_WORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "a", "an", "as", "are", "was", "were", "for", "to", "of",
    "in", "and", "or", "but", "with", "by", "from", "this", "that", "be", "have", "has", "had",
    "it", "its", "their", "they", "them", "how", "what", "can", "does", "do", "you", "your",
    "when", "where", "who", "why", "into",
];

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CorpusFile {
    List(Vec<Document>),
    Wrapped { documents: Vec<Document> },
}

impl CorpusFile {
    fn into_documents(self) -> Vec<Document> {
        match self {
            CorpusFile::List(documents) | CorpusFile::Wrapped { documents } => documents,
        }
    }
}

/// In-memory keyword retriever loaded from a corpus file.
#[derive(Debug, Clone)]
pub struct CorpusRetriever {
    documents: Vec<Document>,
    top_k: usize,
    source: Option<PathBuf>,
}

impl CorpusRetriever {
    /// Build a retriever over documents already in memory.
    pub fn from_documents(documents: Vec<Document>, top_k: usize) -> Self {
        Self {
            documents,
            top_k,
            source: None,
        }
    }

    /// Load a corpus from a `.json`, `.yaml`, or `.yml` file.
    pub fn load(path: &Path, top_k: usize) -> AppResult<Self> {
        tracing::debug!("Loading corpus from: {:?}", path);

        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Retrieval(format!("Failed to read corpus {:?}: {}", path, e))
        })?;

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase());

        let parsed: CorpusFile = match extension.as_deref() {
            Some("json") => serde_json::from_str(&contents).map_err(|e| {
                AppError::Retrieval(format!("Failed to parse corpus {:?}: {}", path, e))
            })?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&contents).map_err(|e| {
                AppError::Retrieval(format!("Failed to parse corpus {:?}: {}", path, e))
            })?,
            _ => {
                return Err(AppError::Retrieval(format!(
                    "Unsupported corpus format {:?}. Expected .json, .yaml or .yml",
                    path
                )))
            }
        };

        let documents = parsed.into_documents();
        tracing::info!("Loaded {} documents from {:?}", documents.len(), path);

        Ok(Self {
            documents,
            top_k,
            source: Some(path.to_path_buf()),
        })
    }

    /// Number of documents in the corpus.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// File the corpus was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Distinct topics in first-seen order.
    pub fn topics(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut topics = Vec::new();

        for topic in self.documents.iter().flat_map(|d| d.topics.iter()) {
            if seen.insert(topic.to_lowercase()) {
                topics.push(topic.clone());
            }
        }

        topics
    }

    /// Rank documents against `question`, keeping at most `top_k`.
    ///
    /// Documents sharing no keyword with the question are dropped; ties keep
    /// corpus order.
    pub fn search(&self, question: &str, topics: Option<&[String]>) -> Vec<Document> {
        let query_terms = terms(question);
        if query_terms.is_empty() {
            return Vec::new();
        }

        let topic_filter = topics.filter(|t| !t.is_empty());

        let mut scored: Vec<(u32, &Document)> = self
            .documents
            .iter()
            .filter(|doc| topic_filter.map_or(true, |wanted| doc.has_any_topic(wanted)))
            .map(|doc| (score(&query_terms, doc), doc))
            .filter(|(score, _)| *score > 0)
            .collect();

        // Stable sort keeps corpus order among equal scores
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .take(self.top_k)
            .map(|(_, doc)| doc.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl Retriever for CorpusRetriever {
    fn name(&self) -> &str {
        "corpus"
    }

    async fn retrieve(
        &self,
        question: &str,
        topics: Option<&[String]>,
    ) -> AppResult<Vec<Document>> {
        Ok(self.search(question, topics))
    }
}

fn score(query_terms: &HashSet<String>, doc: &Document) -> u32 {
    let title_terms = terms(&doc.title);
    let content_terms = terms(&doc.content);

    query_terms
        .iter()
        .map(|term| {
            let mut s = 0;
            if title_terms.contains(term) {
                s += TITLE_WEIGHT;
            }
            if content_terms.contains(term) {
                s += CONTENT_WEIGHT;
            }
            s
        })
        .sum()
}

/// Lower-cased keywords with stop words and very short tokens removed.
fn terms(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 2 && !STOP_WORDS.contains(w))
        .map(normalize)
        .collect()
}

/// Fold simple plurals so "proposals" matches "proposal".
fn normalize(word: &str) -> String {
    if word.len() > 3 && word.ends_with('s') && !word.ends_with("ss") {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}
