use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Tag used for plain paragraphs and for any element missing a type
pub const PARAGRAPH: &str = "p";

/// Inline formatting marks recognized on a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    Subscript,
    Superscript,
    Highlight,
    Color,
    BackgroundColor,
    FontSize,
    FontFamily,
    FontWeight,
}

impl Mark {
    pub const ALL: [Mark; 13] = [
        Mark::Bold,
        Mark::Italic,
        Mark::Underline,
        Mark::Strikethrough,
        Mark::Code,
        Mark::Subscript,
        Mark::Superscript,
        Mark::Highlight,
        Mark::Color,
        Mark::BackgroundColor,
        Mark::FontSize,
        Mark::FontFamily,
        Mark::FontWeight,
    ];

    /// Property name used in the serialized run
    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
            Mark::Strikethrough => "strikethrough",
            Mark::Code => "code",
            Mark::Subscript => "subscript",
            Mark::Superscript => "superscript",
            Mark::Highlight => "highlight",
            Mark::Color => "color",
            Mark::BackgroundColor => "backgroundColor",
            Mark::FontSize => "fontSize",
            Mark::FontFamily => "fontFamily",
            Mark::FontWeight => "fontWeight",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|mark| mark.as_str() == key)
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comment annotations ride along on text runs untouched
pub fn is_comment_extension(key: &str) -> bool {
    key.starts_with("comment")
}

/// Inline run of text with its formatting
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextRun {
    pub text: String,
    pub marks: BTreeMap<Mark, Value>,
    pub extensions: BTreeMap<String, Value>,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_mark(mut self, mark: Mark, value: impl Into<Value>) -> Self {
        self.marks.insert(mark, value.into());
        self
    }

    pub fn has_mark(&self, mark: Mark) -> bool {
        self.marks.contains_key(&mark)
    }
}

/// Block or inline container
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub element_type: String,
    pub children: Vec<DocumentNode>,
    /// Non-structural properties (link targets, alignment, ...)
    pub attributes: BTreeMap<String, Value>,
}

impl Element {
    pub fn new(element_type: impl Into<String>, children: Vec<DocumentNode>) -> Self {
        Self {
            element_type: element_type.into(),
            children,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn heading_level(&self) -> Option<u8> {
        heading_level(&self.element_type)
    }
}

/// A node of the document tree
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
    Element(Element),
    Text(TextRun),
}

impl DocumentNode {
    pub fn element(element_type: impl Into<String>, children: Vec<DocumentNode>) -> Self {
        DocumentNode::Element(Element::new(element_type, children))
    }

    pub fn text(text: impl Into<String>) -> Self {
        DocumentNode::Text(TextRun::new(text))
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::element(PARAGRAPH, vec![Self::text(text)])
    }

    /// `level` is clamped into `1..=6`
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        let level = level.clamp(1, 6);
        Self::element(format!("h{level}"), vec![Self::text(text)])
    }

    /// The minimal valid block: a paragraph holding one empty run
    pub fn empty_paragraph() -> Self {
        Self::paragraph("")
    }

    pub fn heading_level(&self) -> Option<u8> {
        match self {
            DocumentNode::Element(element) => element.heading_level(),
            DocumentNode::Text(_) => None,
        }
    }

    pub fn children(&self) -> Option<&[DocumentNode]> {
        match self {
            DocumentNode::Element(element) => Some(&element.children),
            DocumentNode::Text(_) => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<DocumentNode>> {
        match self {
            DocumentNode::Element(element) => Some(&mut element.children),
            DocumentNode::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            DocumentNode::Text(run) => Some(run),
            DocumentNode::Element(_) => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextRun> {
        match self {
            DocumentNode::Text(run) => Some(run),
            DocumentNode::Element(_) => None,
        }
    }
}

/// Rank of a heading tag (`h1` = 1 ... `h6` = 6)
pub fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

impl Serialize for DocumentNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DocumentNode::Element(element) => {
                let mut map = serializer.serialize_map(Some(2 + element.attributes.len()))?;
                map.serialize_entry("type", &element.element_type)?;
                map.serialize_entry("children", &element.children)?;
                for (name, value) in &element.attributes {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
            DocumentNode::Text(run) => {
                let mut map =
                    serializer.serialize_map(Some(1 + run.marks.len() + run.extensions.len()))?;
                map.serialize_entry("text", &run.text)?;
                for (mark, value) in &run.marks {
                    map.serialize_entry(mark.as_str(), value)?;
                }
                for (name, value) in &run.extensions {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

/// Deserialization never fails on shape: whatever JSON arrives is repaired
/// through the same path as [`crate::validate`].
impl<'de> Deserialize<'de> for DocumentNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(crate::validate::node_from_value(&value))
    }
}

/// Child-index address of a node, starting at the document's top-level sequence
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, index) in self.0.iter().enumerate() {
            if position > 0 {
                f.write_str("-")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

/// Resolve a path against the top-level sequence
pub fn node_at<'a>(nodes: &'a [DocumentNode], path: &NodePath) -> Option<&'a DocumentNode> {
    let (first, rest) = path.indices().split_first()?;
    let mut node = nodes.get(*first)?;
    for index in rest {
        node = node.children()?.get(*index)?;
    }
    Some(node)
}

pub fn node_at_mut<'a>(
    nodes: &'a mut [DocumentNode],
    path: &NodePath,
) -> Option<&'a mut DocumentNode> {
    let (first, rest) = path.indices().split_first()?;
    let mut node = nodes.get_mut(*first)?;
    for index in rest {
        node = node.children_mut()?.get_mut(*index)?;
    }
    Some(node)
}
