//! # Placeholder Scanner
//!
//! Finds `[TOKEN]` spans in text runs and groups them into sections for a
//! field-fill panel.
//!
//! ## Section attribution
//!
//! Headings and paragraphs are block-level siblings, not parent and child, so
//! section membership follows reading order:
//!
//! - an `h1` starts a new [`Heading`] and closes the current sub-heading
//! - an `h2`/`h3` starts a new [`SubHeading`] under the current heading, or
//!   under the synthetic `root` heading when no `h1` has been seen yet
//! - `h4`..`h6` do not affect grouping
//!
//! A placeholder belongs to the current sub-heading if there is one, otherwise
//! to the current heading, otherwise to `root`. Irregular heading order (an
//! `h3` before any `h1`) is attributed by the same rule.
//!
//! ## Identity
//!
//! Every id in a [`ScanResult`] is scan-scoped. A placeholder id is derived
//! from its run path and byte offset, so any mutation invalidates the ids of
//! the previous scan.

use folio_common::{element_text, normalize_whitespace, walk_document, walk_element, Visitor};
use folio_model::{heading_level, DocumentNode, Element, IDGenerator, NodePath, TextRun};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Id of the synthetic heading owning everything before the first `h1`
pub const ROOT_ID: &str = "root";

/// `[`, one or more characters other than `]`, `]`. The first `]` closes.
static TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]").expect("token pattern is valid"));

/// Everything up to the last `:`, `-` or `•`, when only whitespace follows it
static LABEL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.*[:\-•])\s*$").expect("label pattern is valid"));

/// Where a token starts: the run's path and the byte offset of `[`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderPosition {
    pub path: NodePath,
    pub offset: usize,
}

/// One `[TOKEN]` occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    /// Token interior, without brackets
    pub key: String,
    pub id: String,
    pub heading_id: String,
    pub sub_heading_id: String,
    pub label: String,
    pub position: PlaceholderPosition,
}

impl Placeholder {
    /// The literal bracketed text as it appears in the run
    pub fn token(&self) -> String {
        format!("[{}]", self.key)
    }
}

/// Rank-1 heading (or the synthetic root) with the placeholders it owns directly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heading {
    pub id: String,
    pub level: u8,
    /// Placeholder ids
    pub placeholders: Vec<String>,
    /// `None` for the synthetic root
    pub position: Option<NodePath>,
    pub text: String,
}

impl Heading {
    fn root() -> Self {
        Self {
            id: ROOT_ID.to_string(),
            level: 1,
            placeholders: Vec::new(),
            position: None,
            text: String::new(),
        }
    }
}

/// Rank-2/3 heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubHeading {
    pub id: String,
    pub parent_id: String,
    /// Placeholder ids
    pub placeholders: Vec<String>,
    pub position: NodePath,
    pub text: String,
}

/// Everything one scan pass produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub root: Heading,
    pub headings: Vec<Heading>,
    pub sub_headings: Vec<SubHeading>,
    pub placeholders: Vec<Placeholder>,
}

/// A heading that has something to fill, with its qualifying sub-headings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section<'a> {
    pub heading: &'a Heading,
    pub sub_headings: Vec<&'a SubHeading>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

impl Default for ScanResult {
    fn default() -> Self {
        Self {
            root: Heading::root(),
            headings: Vec::new(),
            sub_headings: Vec::new(),
            placeholders: Vec::new(),
        }
    }
}

impl ScanResult {
    pub fn placeholder(&self, id: &str) -> Option<&Placeholder> {
        self.placeholders.iter().find(|placeholder| placeholder.id == id)
    }

    /// Root first (when it qualifies), then headings in document order, keeping
    /// those with placeholders of their own or a sub-heading that has some
    pub fn sections_with_placeholders(&self) -> Vec<Section<'_>> {
        std::iter::once(&self.root)
            .chain(self.headings.iter())
            .filter_map(|heading| {
                let sub_headings: Vec<&SubHeading> = self
                    .sub_headings
                    .iter()
                    .filter(|sub| sub.parent_id == heading.id && !sub.placeholders.is_empty())
                    .collect();

                if heading.placeholders.is_empty() && sub_headings.is_empty() {
                    None
                } else {
                    Some(Section {
                        heading,
                        sub_headings,
                    })
                }
            })
            .collect()
    }

    /// Step through sub-headings that contain placeholders, clamped at both
    /// ends. An absent or unknown `current` lands on the first one.
    pub fn navigate(&self, current: Option<&str>, direction: Direction) -> Option<&str> {
        let candidates: Vec<&SubHeading> = self
            .sub_headings
            .iter()
            .filter(|sub| !sub.placeholders.is_empty())
            .collect();
        let first = candidates.first()?;

        let Some(index) = current.and_then(|id| candidates.iter().position(|sub| sub.id == id))
        else {
            return Some(first.id.as_str());
        };

        let target = match direction {
            Direction::Next => (index + 1).min(candidates.len() - 1),
            Direction::Prev => index.saturating_sub(1),
        };
        Some(candidates[target].id.as_str())
    }
}

/// Scan a document for placeholders
pub fn scan(root: &[DocumentNode]) -> ScanResult {
    let mut scanner = Scanner::new();
    walk_document(&mut scanner, root);

    tracing::debug!(
        "Scanned {} placeholders across {} headings and {} sub-headings",
        scanner.result.placeholders.len(),
        scanner.result.headings.len(),
        scanner.result.sub_headings.len()
    );
    scanner.result
}

/// Human label for a token from the run text preceding it
pub fn derive_label(preceding: &str) -> String {
    let line = preceding.rsplit('\n').next().unwrap_or_default();

    if let Some(captures) = LABEL_REGEX.captures(line) {
        let label = captures[1].trim();
        if !label.is_empty() {
            return label.to_string();
        }
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    words[words.len().saturating_sub(3)..].join(" ")
}

struct Scanner {
    result: ScanResult,
    // Indices into `result.headings` / `result.sub_headings`
    current_heading: Option<usize>,
    current_sub_heading: Option<usize>,
    heading_ids: IDGenerator,
    sub_heading_ids: IDGenerator,
}

impl Scanner {
    fn new() -> Self {
        Self {
            result: ScanResult::default(),
            current_heading: None,
            current_sub_heading: None,
            heading_ids: IDGenerator::new("section"),
            sub_heading_ids: IDGenerator::new("subsection"),
        }
    }

    fn current_heading_id(&self) -> String {
        self.current_heading
            .map(|index| self.result.headings[index].id.clone())
            .unwrap_or_else(|| ROOT_ID.to_string())
    }

    fn current_sub_heading_id(&self) -> String {
        self.current_sub_heading
            .map(|index| self.result.sub_headings[index].id.clone())
            .unwrap_or_else(|| ROOT_ID.to_string())
    }

    fn start_heading(&mut self, element: &Element, path: &NodePath) {
        self.result.headings.push(Heading {
            id: self.heading_ids.new_id(),
            level: 1,
            placeholders: Vec::new(),
            position: Some(path.clone()),
            text: heading_text(element),
        });
        self.current_heading = Some(self.result.headings.len() - 1);
        self.current_sub_heading = None;
    }

    fn start_sub_heading(&mut self, element: &Element, path: &NodePath) {
        self.result.sub_headings.push(SubHeading {
            id: self.sub_heading_ids.new_id(),
            parent_id: self.current_heading_id(),
            placeholders: Vec::new(),
            position: path.clone(),
            text: heading_text(element),
        });
        self.current_sub_heading = Some(self.result.sub_headings.len() - 1);
    }

    fn record(&mut self, placeholder: Placeholder) {
        let owner = match (self.current_sub_heading, self.current_heading) {
            (Some(index), _) => &mut self.result.sub_headings[index].placeholders,
            (None, Some(index)) => &mut self.result.headings[index].placeholders,
            (None, None) => &mut self.result.root.placeholders,
        };
        owner.push(placeholder.id.clone());
        self.result.placeholders.push(placeholder);
    }
}

impl Visitor for Scanner {
    fn visit_element(&mut self, element: &Element, path: &NodePath) {
        match heading_level(&element.element_type) {
            Some(1) => self.start_heading(element, path),
            Some(2) | Some(3) => self.start_sub_heading(element, path),
            _ => {}
        }
        walk_element(self, element, path);
    }

    fn visit_text(&mut self, run: &TextRun, path: &NodePath) {
        for captures in TOKEN_REGEX.captures_iter(&run.text) {
            let (Some(token), Some(key)) = (captures.get(0), captures.get(1)) else {
                continue;
            };

            let offset = token.start();
            let mut label = derive_label(&run.text[..offset]);
            if label.is_empty() {
                label = key.as_str().to_string();
            }

            let placeholder = Placeholder {
                key: key.as_str().to_string(),
                id: format!("placeholder-{path}-{offset}"),
                heading_id: self.current_heading_id(),
                sub_heading_id: self.current_sub_heading_id(),
                label,
                position: PlaceholderPosition {
                    path: path.clone(),
                    offset,
                },
            };
            self.record(placeholder);
        }
    }
}

fn heading_text(element: &Element) -> String {
    normalize_whitespace(&element_text(element))
}
