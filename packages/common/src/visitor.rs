use folio_model::{DocumentNode, Element, NodePath, TextRun};

/// Visitor pattern for traversing document trees immutably
///
/// Nodes are visited pre-order, depth-first, in document order. Each callback
/// receives the node's path from the top-level sequence.
///
/// This trait provides default implementations that walk the entire tree.
/// Override specific visit_* methods to perform custom actions on nodes.
pub trait Visitor: Sized {
    fn visit_node(&mut self, node: &DocumentNode, path: &NodePath) {
        walk_node(self, node, path);
    }

    fn visit_element(&mut self, element: &Element, path: &NodePath) {
        walk_element(self, element, path);
    }

    fn visit_text(&mut self, _run: &TextRun, _path: &NodePath) {
        // Leaf node, no children to walk
    }
}

pub fn walk_document<V: Visitor>(visitor: &mut V, nodes: &[DocumentNode]) {
    for (index, node) in nodes.iter().enumerate() {
        visitor.visit_node(node, &NodePath::from(vec![index]));
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &DocumentNode, path: &NodePath) {
    match node {
        DocumentNode::Element(element) => visitor.visit_element(element, path),
        DocumentNode::Text(run) => visitor.visit_text(run, path),
    }
}

pub fn walk_element<V: Visitor>(visitor: &mut V, element: &Element, path: &NodePath) {
    for (index, child) in element.children.iter().enumerate() {
        visitor.visit_node(child, &path.child(index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct PathRecorder {
        seen: Vec<(String, String)>,
    }

    impl Visitor for PathRecorder {
        fn visit_element(&mut self, element: &Element, path: &NodePath) {
            self.seen.push((path.to_string(), element.element_type.clone()));
            walk_element(self, element, path);
        }

        fn visit_text(&mut self, run: &TextRun, path: &NodePath) {
            self.seen.push((path.to_string(), run.text.clone()));
        }
    }

    #[test]
    fn test_pre_order_with_paths() {
        let nodes = vec![
            DocumentNode::heading(1, "Title"),
            DocumentNode::element(
                "ul",
                vec![DocumentNode::element(
                    "li",
                    vec![DocumentNode::text("one"), DocumentNode::text("two")],
                )],
            ),
        ];

        let mut recorder = PathRecorder::default();
        walk_document(&mut recorder, &nodes);

        let seen: Vec<(&str, &str)> = recorder
            .seen
            .iter()
            .map(|(path, label)| (path.as_str(), label.as_str()))
            .collect();
        assert_eq!(
            seen,
            vec![
                ("0", "h1"),
                ("0-0", "Title"),
                ("1", "ul"),
                ("1-0", "li"),
                ("1-0-0", "one"),
                ("1-0-1", "two"),
            ]
        );
    }
}
