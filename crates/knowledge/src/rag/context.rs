//! Context formatting for the answer prompt.

use crate::types::Document;

/// Separator between document blocks.
const BLOCK_SEPARATOR: &str = "\n\n";

/// Format documents as `Source:`/`Content:` blocks, in the given order.
///
/// No deduplication or truncation; an empty slice yields an empty string.
pub fn format_context(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| format!("Source: {}\nContent: {}", doc.title, doc.content))
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_single_document() {
        let docs = vec![Document::new("Creating Proposals in CRM", "Click New Proposal.")];
        assert_eq!(
            format_context(&docs),
            "Source: Creating Proposals in CRM\nContent: Click New Proposal."
        );
    }

    #[test]
    fn test_format_preserves_order_and_separates_blocks() {
        let docs = vec![
            Document::new("B", "second"),
            Document::new("A", "first"),
            Document::new("B", "second"),
        ];

        let context = format_context(&docs);
        assert_eq!(
            context,
            "Source: B\nContent: second\n\nSource: A\nContent: first\n\nSource: B\nContent: second"
        );
        assert_eq!(context.matches("Source: ").count(), 3);
        assert_eq!(context.matches("Content: ").count(), 3);
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_context(&[]), "");
    }

    #[test]
    fn test_format_keeps_multiline_content() {
        let docs = vec![Document::new("Steps", "1. Open CRM\n2. Click New")];
        assert_eq!(
            format_context(&docs),
            "Source: Steps\nContent: 1. Open CRM\n2. Click New"
        );
    }
}
