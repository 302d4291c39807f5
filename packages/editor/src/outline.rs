//! # Outline
//!
//! Navigable table of contents derived from the top-level heading nodes.
//!
//! Entries are recomputed on every scan and never mutated. The `id` is only
//! unique within one extraction; after any mutation, extract again.

use folio_common::{node_text, normalize_whitespace};
use folio_model::{DocumentNode, NodePath};
use serde::{Deserialize, Serialize};

/// One heading in the outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingEntry {
    pub id: String,
    pub level: u8,
    pub path: NodePath,
    pub title: String,
}

impl HeadingEntry {
    /// Compare against a title the way the outline normalizes titles
    pub fn matches_title(&self, title: &str) -> bool {
        self.title == normalize_whitespace(title)
    }
}

/// Collect heading entries from the top-level nodes, in document order.
/// Headings whose text is empty after normalization are skipped.
pub fn extract_headings(root: &[DocumentNode]) -> Vec<HeadingEntry> {
    root.iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let level = node.heading_level()?;
            let title = normalize_whitespace(&node_text(node));
            if title.is_empty() {
                return None;
            }

            Some(HeadingEntry {
                id: format!("heading-{index}"),
                level,
                path: NodePath::from(vec![index]),
                title,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_in_document_order() {
        let nodes = vec![
            DocumentNode::heading(1, "Intro"),
            DocumentNode::paragraph("body"),
            DocumentNode::heading(2, "Details"),
            DocumentNode::paragraph("more"),
            DocumentNode::paragraph("even more"),
            DocumentNode::heading(3, "Fine print"),
        ];

        let headings = extract_headings(&nodes);
        let summary: Vec<(&str, u8, &str)> = headings
            .iter()
            .map(|h| (h.id.as_str(), h.level, h.title.as_str()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("heading-0", 1, "Intro"),
                ("heading-2", 2, "Details"),
                ("heading-5", 3, "Fine print"),
            ]
        );
        assert_eq!(headings[1].path, NodePath::from(vec![2]));
    }

    #[test]
    fn test_title_is_normalized_across_nested_runs() {
        let nodes = vec![DocumentNode::element(
            "h4",
            vec![
                DocumentNode::text("  Payment\n"),
                DocumentNode::element("strong", vec![DocumentNode::text("  terms ")]),
            ],
        )];

        let headings = extract_headings(&nodes);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].level, 4);
        assert_eq!(headings[0].title, "Payment terms");
        assert!(headings[0].matches_title("Payment   terms"));
    }

    #[test]
    fn test_empty_and_nested_headings_are_skipped() {
        let nodes = vec![
            DocumentNode::heading(1, "   "),
            DocumentNode::element("blockquote", vec![DocumentNode::heading(2, "Nested")]),
            DocumentNode::heading(6, "Last"),
        ];

        let headings = extract_headings(&nodes);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].id, "heading-2");
        assert_eq!(headings[0].level, 6);
    }

    #[test]
    fn test_input_is_untouched() {
        let nodes = vec![DocumentNode::heading(1, " Title ")];
        let before = nodes.clone();
        let _ = extract_headings(&nodes);
        assert_eq!(nodes, before);
    }
}
