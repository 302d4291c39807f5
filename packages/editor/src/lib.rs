//! # Folio Editor
//!
//! Document engine behind the Folio template editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: JSON → validated DocumentNode tree   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + derived views  │
//! │  - Outline of top-level headings            │
//! │  - Placeholder scan, sections, navigation   │
//! │  - Fill placeholders in place               │
//! │  - Version history snapshots                │
//! │  - Debounced rescan after edits             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ host: editing surface, persistence, UI      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Tree is source of truth**: outline and placeholder index are derived
//!    views, recomputed rather than patched
//! 2. **Repair at the boundary**: malformed input is fixed on load, never
//!    rejected
//! 3. **Paths are transient**: scan results are only valid for the version
//!    they were computed at
//! 4. **One current version**: every history operation preserves it
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::{Document, EditSession, EditorConfig};
//!
//! let config = EditorConfig::load(project_dir)?;
//! let doc = Document::from_json(&source)?;
//! let mut session = EditSession::new(doc, &config);
//!
//! // Index placeholders and fill one
//! let index = session.rescan_now();
//! let first = &index.placeholders.placeholders[0];
//! session.fill_placeholder(&first.id, "Acme Inc.")?;
//!
//! // Keep a snapshot
//! session.save_version();
//! ```

mod config;
mod debounce;
mod document;
mod errors;
mod mutations;
mod outline;
mod placeholders;
mod session;
mod versions;

pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use debounce::Debouncer;
pub use document::{Document, TreeTransition};
pub use errors::EditorError;
pub use mutations::{apply_value, Mutation, MutationError, MutationResult};
pub use outline::{extract_headings, HeadingEntry};
pub use placeholders::{
    derive_label, scan, Direction, Heading, Placeholder, PlaceholderPosition, ScanResult, Section,
    SubHeading, ROOT_ID,
};
pub use session::{DocumentIndex, EditSession};
pub use versions::{Version, VersionHistory};

// Re-export model types for convenience
pub use folio_model::{DocumentNode, NodePath};
