//! # Document Handle
//!
//! The live document tree owned by the hosting editor surface.
//!
//! All writes go through [`Document::apply`] or [`Document::load`], which keep
//! the tree valid and bump `version`. Derived views (outline, placeholder
//! index) are computed from the current tree on demand and are only valid for
//! the version they were computed at.
//!
//! ## Lifecycle
//!
//! ```text
//! JSON → validate → Edit (mutations) → Scan (outline, placeholders) → Snapshot
//!   ↓        ↓             ↓                      ↓                      ↓
//! Value    Tree        Tree + version       ScanResult            Vec<DocumentNode>
//! ```

use crate::outline::{extract_headings, HeadingEntry};
use crate::placeholders::{scan, ScanResult};
use crate::{EditorError, Mutation, MutationError, MutationResult};
use folio_model::{deep_clone, normalize, validate, DocumentNode};
use serde_json::Value;

/// Editable document tree
#[derive(Debug, Clone)]
pub struct Document {
    /// Current version number (increments on each successful write)
    pub version: u64,

    nodes: Vec<DocumentNode>,
}

/// Before/after snapshots of a whole-tree replacement
#[derive(Debug, Clone, PartialEq)]
pub struct TreeTransition {
    pub before: Vec<DocumentNode>,
    pub after: Vec<DocumentNode>,
    pub version: u64,
}

impl Document {
    /// Create document from a typed tree, enforcing the model invariants
    pub fn new(nodes: Vec<DocumentNode>) -> Self {
        Self {
            version: 0,
            nodes: normalize(nodes),
        }
    }

    /// Create document from arbitrary JSON, repairing as needed
    pub fn from_value(value: &Value) -> Self {
        Self {
            version: 0,
            nodes: validate(value),
        }
    }

    /// Parse JSON text. Only syntax errors fail; shape errors are repaired.
    pub fn from_json(source: &str) -> Result<Self, EditorError> {
        let value: Value = serde_json::from_str(source)?;
        Ok(Self::from_value(&value))
    }

    pub fn to_json_pretty(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(&self.nodes)?)
    }

    pub fn nodes(&self) -> &[DocumentNode] {
        &self.nodes
    }

    /// Independent copy of the current tree
    pub fn snapshot(&self) -> Vec<DocumentNode> {
        deep_clone(&self.nodes)
    }

    /// Apply a mutation. Failed mutations leave tree and version untouched.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, MutationError> {
        mutation.apply(&mut self.nodes)?;
        self.version += 1;

        Ok(MutationResult {
            version: self.version,
        })
    }

    /// Swap in a new tree, returning both sides of the transition
    pub fn load(&mut self, next: Vec<DocumentNode>) -> TreeTransition {
        let after = normalize(next);
        let before = std::mem::replace(&mut self.nodes, after.clone());
        self.version += 1;

        TreeTransition {
            before,
            after,
            version: self.version,
        }
    }

    pub fn outline(&self) -> Vec<HeadingEntry> {
        extract_headings(&self.nodes)
    }

    pub fn scan(&self) -> ScanResult {
        scan(&self.nodes)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
