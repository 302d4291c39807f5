//! # Document Mutations
//!
//! Write operations on the live tree.
//!
//! ## FillPlaceholder
//! - Rewrites exactly one text run: the `[KEY]` span is replaced by the value,
//!   every other character and every mark of the run is kept
//! - The occurrence at the scanned offset is preferred; if the run shifted, the
//!   first occurrence of the token in that run is used
//! - A stale reference (path gone, not a run, token absent) leaves the tree
//!   untouched and reports [`MutationError::StalePlaceholder`]; rescan first
//! - Re-applying after success is stale as well, because the token was consumed
//!
//! Whole-tree swaps (version switch, external reload) are not mutations; they
//! go through [`crate::Document::load`], which reports both sides.

use crate::placeholders::Placeholder;
use folio_model::{node_at_mut, DocumentNode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations on the live document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Replace one placeholder token with a value
    FillPlaceholder {
        placeholder: Placeholder,
        value: String,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Placeholder {id} no longer matches [{key}]; rescan before retrying")]
    StalePlaceholder { id: String, key: String },

    #[error("Placeholder not found: {0}")]
    UnknownPlaceholder(String),
}

impl Mutation {
    /// Apply mutation to the tree
    pub fn apply(&self, nodes: &mut [DocumentNode]) -> Result<(), MutationError> {
        match self {
            Mutation::FillPlaceholder { placeholder, value } => {
                apply_value(nodes, placeholder, value)
            }
        }
    }
}

/// Replace the placeholder's token with `value` inside its text run
pub fn apply_value(
    tree: &mut [DocumentNode],
    placeholder: &Placeholder,
    value: &str,
) -> Result<(), MutationError> {
    let stale = || MutationError::StalePlaceholder {
        id: placeholder.id.clone(),
        key: placeholder.key.clone(),
    };

    let run = node_at_mut(tree, &placeholder.position.path)
        .and_then(DocumentNode::as_text_mut)
        .ok_or_else(stale)?;

    let token = placeholder.token();
    let start = locate_token(&run.text, &token, placeholder.position.offset).ok_or_else(stale)?;
    run.text.replace_range(start..start + token.len(), value);

    Ok(())
}

fn locate_token(text: &str, token: &str, offset: usize) -> Option<usize> {
    // `get` also rejects offsets that are not on a char boundary
    let at_offset = text
        .get(offset..)
        .is_some_and(|rest| rest.starts_with(token));

    if at_offset {
        Some(offset)
    } else {
        text.find(token)
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// New document version number
    pub version: u64,
}
