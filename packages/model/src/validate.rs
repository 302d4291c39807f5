//! # Document Repair
//!
//! Turns arbitrary (possibly partial or corrupted) JSON into a tree that
//! satisfies the model invariants:
//!
//! - the document holds at least one node, and every top-level node is an element
//! - every element has a type (`"p"` when missing) and at least one child
//! - every text run has a string `text`
//! - transient editor state (`isSelected`) never survives
//!
//! Repair is total. Nothing here returns an error or panics; malformed input
//! degrades to the closest valid tree, and the worst case is a single empty
//! paragraph.

use crate::ast::{is_comment_extension, DocumentNode, Element, Mark, TextRun, PARAGRAPH};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Selection-only fields that must never be persisted
pub const TRANSIENT_FIELDS: &[&str] = &["isSelected"];

/// Repair a serialized document
pub fn validate(value: &Value) -> Vec<DocumentNode> {
    let nodes = match value {
        Value::Array(items) => items.iter().map(top_level_from_value).collect(),
        other => {
            tracing::debug!("Document is not a sequence ({}), using empty document", kind(other));
            Vec::new()
        }
    };

    ensure_non_empty(nodes)
}

/// Enforce the same invariants on an already-typed tree
pub fn normalize(nodes: Vec<DocumentNode>) -> Vec<DocumentNode> {
    let nodes = nodes
        .into_iter()
        .map(|node| match normalize_node(node) {
            DocumentNode::Text(run) => wrap_in_paragraph(run),
            element => element,
        })
        .collect();

    ensure_non_empty(nodes)
}

/// Structural copy sharing nothing with the source tree
pub fn deep_clone(nodes: &[DocumentNode]) -> Vec<DocumentNode> {
    nodes.to_vec()
}

/// Repair a single node. Objects carrying `type` or `children` are elements,
/// other objects are text runs, anything else becomes an empty paragraph.
pub(crate) fn node_from_value(value: &Value) -> DocumentNode {
    match value {
        Value::Object(map) if map.contains_key("type") || map.contains_key("children") => {
            DocumentNode::Element(element_from_map(map))
        }
        Value::Object(map) => DocumentNode::Text(text_run_from_map(map)),
        _ => DocumentNode::empty_paragraph(),
    }
}

fn top_level_from_value(value: &Value) -> DocumentNode {
    match node_from_value(value) {
        DocumentNode::Text(run) => wrap_in_paragraph(run),
        element => element,
    }
}

fn element_from_map(map: &Map<String, Value>) -> Element {
    let element_type = map
        .get("type")
        .and_then(Value::as_str)
        .filter(|tag| !tag.is_empty())
        .unwrap_or(PARAGRAPH)
        .to_string();

    let children = match map.get("children") {
        Some(Value::Array(items)) if !items.is_empty() => {
            items.iter().map(node_from_value).collect()
        }
        _ => vec![DocumentNode::Text(TextRun::default())],
    };

    let attributes = map
        .iter()
        .filter(|(name, _)| !matches!(name.as_str(), "type" | "children" | "text"))
        .filter(|(name, _)| !is_transient(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    Element {
        element_type,
        children,
        attributes,
    }
}

fn text_run_from_map(map: &Map<String, Value>) -> TextRun {
    let mut marks = BTreeMap::new();
    let mut extensions = BTreeMap::new();

    for (name, value) in map {
        if let Some(mark) = Mark::from_key(name) {
            if !value.is_null() {
                marks.insert(mark, value.clone());
            }
        } else if is_comment_extension(name) {
            extensions.insert(name.clone(), value.clone());
        }
    }

    TextRun {
        text: coerce_text(map.get("text")),
        marks,
        extensions,
    }
}

fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}

fn normalize_node(node: DocumentNode) -> DocumentNode {
    match node {
        DocumentNode::Element(mut element) => {
            if element.element_type.is_empty() {
                element.element_type = PARAGRAPH.to_string();
            }
            element.attributes.retain(|name, _| {
                !is_transient(name) && !matches!(name.as_str(), "type" | "children" | "text")
            });
            element.children = if element.children.is_empty() {
                vec![DocumentNode::Text(TextRun::default())]
            } else {
                element.children.into_iter().map(normalize_node).collect()
            };
            DocumentNode::Element(element)
        }
        DocumentNode::Text(mut run) => {
            run.marks.retain(|_, value| !value.is_null());
            run.extensions.retain(|name, _| is_comment_extension(name));
            DocumentNode::Text(run)
        }
    }
}

fn wrap_in_paragraph(run: TextRun) -> DocumentNode {
    DocumentNode::element(PARAGRAPH, vec![DocumentNode::Text(run)])
}

fn ensure_non_empty(nodes: Vec<DocumentNode>) -> Vec<DocumentNode> {
    if nodes.is_empty() {
        vec![DocumentNode::empty_paragraph()]
    } else {
        nodes
    }
}

fn is_transient(name: &str) -> bool {
    TRANSIENT_FIELDS.contains(&name)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
