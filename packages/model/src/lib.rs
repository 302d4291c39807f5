//! # Folio Model
//!
//! The typed document tree shared by every Folio package.
//!
//! A document is an ordered sequence of [`DocumentNode`]s. Nodes are either
//! containers ([`Element`], tagged `h1`..`h6`, `p`, or any other block/inline
//! tag) or leaves ([`TextRun`], a string plus formatting marks).
//!
//! Nodes are addressed by [`NodePath`], a list of child indices from the
//! top-level sequence. Paths are transient: any mutation may invalidate them,
//! so they are recomputed by traversal instead of stored.
//!
//! Input from outside the process goes through [`validate`], which repairs any
//! JSON value into a tree satisfying the model invariants.

pub mod ast;
pub mod id_generator;
pub mod validate;

pub use ast::{
    heading_level, is_comment_extension, node_at, node_at_mut, DocumentNode, Element, Mark,
    NodePath, TextRun, PARAGRAPH,
};
pub use id_generator::IDGenerator;
pub use validate::{deep_clone, normalize, validate, TRANSIENT_FIELDS};
