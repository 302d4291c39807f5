use crate::visitor::{walk_document, walk_element, walk_node, Visitor};
use folio_model::{DocumentNode, Element, NodePath, TextRun};

/// Concatenates run text in document order
#[derive(Debug, Default)]
pub struct TextCollector {
    text: String,
}

impl TextCollector {
    pub fn into_text(self) -> String {
        self.text
    }
}

impl Visitor for TextCollector {
    fn visit_text(&mut self, run: &TextRun, _path: &NodePath) {
        self.text.push_str(&run.text);
    }
}

/// All descendant text of one node, unmodified
pub fn node_text(node: &DocumentNode) -> String {
    let mut collector = TextCollector::default();
    walk_node(&mut collector, node, &NodePath::default());
    collector.into_text()
}

/// Descendant text of an element
pub fn element_text(element: &Element) -> String {
    let mut collector = TextCollector::default();
    walk_element(&mut collector, element, &NodePath::default());
    collector.into_text()
}

/// All text of a document, unmodified
pub fn document_text(nodes: &[DocumentNode]) -> String {
    let mut collector = TextCollector::default();
    walk_document(&mut collector, nodes);
    collector.into_text()
}

/// Collapse whitespace runs to single spaces and trim
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// True when a document carries no visible text
pub fn is_blank(nodes: &[DocumentNode]) -> bool {
    document_text(nodes).trim().is_empty()
}
