//! # Edit Session
//!
//! The seam the hosting editor surface talks to. Owns the live document, its
//! version history, the rescan timer and the latest derived index.
//!
//! ```text
//! content_changed ──► Document::load ──► Debouncer ──(quiet)──► DocumentIndex
//!                                                                    │
//! fill_placeholder ◄───────────────── placeholder lookup ◄───────────┘
//! ```
//!
//! The index records the document version it was computed at. A fill against
//! an index from an older version is refused; the caller waits for the next
//! rescan (or forces one) and retries.

use crate::outline::HeadingEntry;
use crate::placeholders::ScanResult;
use crate::{
    Debouncer, Document, EditorConfig, EditorError, Mutation, MutationError, MutationResult,
    TreeTransition, Version, VersionHistory,
};
use folio_model::DocumentNode;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Outline and placeholder index derived from one document version
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentIndex {
    pub outline: Vec<HeadingEntry>,
    pub placeholders: ScanResult,
    pub version: u64,
}

impl DocumentIndex {
    pub fn compute(document: &Document) -> Self {
        Self {
            outline: document.outline(),
            placeholders: document.scan(),
            version: document.version,
        }
    }
}

type SharedIndex = Arc<Mutex<Option<DocumentIndex>>>;

fn lock(index: &SharedIndex) -> MutexGuard<'_, Option<DocumentIndex>> {
    index.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Publish `computed` unless a newer index is already stored. An aborted timer
/// task may still be mid-callback when a fresher scan lands.
fn store_index(index: &SharedIndex, computed: DocumentIndex) -> bool {
    let mut slot = lock(index);
    if slot
        .as_ref()
        .is_some_and(|existing| existing.version > computed.version)
    {
        tracing::debug!("Dropping rescan of version {}", computed.version);
        return false;
    }
    *slot = Some(computed);
    true
}

pub struct EditSession {
    document: Document,
    history: VersionHistory,
    index: SharedIndex,
    rescan: Debouncer,
}

impl EditSession {
    pub fn new(document: Document, config: &EditorConfig) -> Self {
        Self::with_history(document, VersionHistory::new(config), config)
    }

    /// Resume editing with a previously persisted history
    pub fn with_history(document: Document, history: VersionHistory, config: &EditorConfig) -> Self {
        Self {
            document,
            history,
            index: Arc::new(Mutex::new(None)),
            rescan: Debouncer::new(config.debounce()),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &VersionHistory {
        &self.history
    }

    /// The latest computed index, if one exists
    pub fn index(&self) -> Option<DocumentIndex> {
        lock(&self.index).clone()
    }

    /// Whether the index reflects the live document
    pub fn is_index_fresh(&self) -> bool {
        lock(&self.index)
            .as_ref()
            .is_some_and(|index| index.version == self.document.version)
    }

    pub fn is_rescan_pending(&self) -> bool {
        self.rescan.is_pending()
    }

    /// The editor surface replaced the tree (typing, paste, undo...)
    pub fn content_changed(&mut self, nodes: Vec<DocumentNode>) -> TreeTransition {
        let transition = self.document.load(nodes);
        self.schedule_rescan();
        transition
    }

    /// Recompute the index once the document has been quiet for the
    /// configured window
    pub fn schedule_rescan(&mut self) {
        let snapshot = Document::clone(&self.document);
        let index = Arc::clone(&self.index);

        self.rescan.schedule(move || {
            let computed = DocumentIndex::compute(&snapshot);
            tracing::debug!(
                "Rescanned version {}: {} headings, {} placeholders",
                computed.version,
                computed.outline.len(),
                computed.placeholders.placeholders.len()
            );
            store_index(&index, computed);
        });
    }

    /// Skip the quiescence window and recompute now
    pub fn rescan_now(&mut self) -> DocumentIndex {
        self.rescan.cancel();
        let computed = DocumentIndex::compute(&self.document);
        store_index(&self.index, computed.clone());
        computed
    }

    /// Fill the placeholder `id` from the current index with `value`
    pub fn fill_placeholder(&mut self, id: &str, value: &str) -> Result<MutationResult, EditorError> {
        let placeholder = {
            let index = lock(&self.index);
            let index = index
                .as_ref()
                .ok_or_else(|| MutationError::UnknownPlaceholder(id.to_string()))?;
            let placeholder = index
                .placeholders
                .placeholder(id)
                .cloned()
                .ok_or_else(|| MutationError::UnknownPlaceholder(id.to_string()))?;

            if index.version != self.document.version {
                tracing::warn!(
                    "Placeholder {} comes from version {}, document is at {}",
                    id,
                    index.version,
                    self.document.version
                );
                return Err(MutationError::StalePlaceholder {
                    id: placeholder.id,
                    key: placeholder.key,
                }
                .into());
            }
            placeholder
        };

        let result = self
            .document
            .apply(Mutation::FillPlaceholder {
                placeholder,
                value: value.to_string(),
            })
            .map_err(|err| {
                tracing::warn!("{}", err);
                err
            })?;

        self.schedule_rescan();
        Ok(result)
    }

    /// Checkpoint the live tree and start a new numbered version
    pub fn save_version(&mut self) -> &Version {
        self.history.save(self.document.nodes())
    }

    /// Switch to version `id`. Returns whether the live tree was replaced.
    pub fn select_version(&mut self, id: &str) -> Result<bool, EditorError> {
        if self.history.get(id).is_none() {
            return Err(EditorError::UnknownVersion(id.to_string()));
        }

        match self.history.select(id, self.document.nodes()) {
            Some(content) => {
                self.content_changed(content);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete version `id`. Returns whether the live tree was replaced.
    pub fn delete_version(&mut self, id: &str) -> Result<bool, EditorError> {
        if self.history.get(id).is_none() {
            return Err(EditorError::UnknownVersion(id.to_string()));
        }

        match self.history.delete(id) {
            Some(content) => {
                self.content_changed(content);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn rename_version(&mut self, id: &str, name: &str) -> Result<bool, EditorError> {
        if self.history.get(id).is_none() {
            return Err(EditorError::UnknownVersion(id.to_string()));
        }
        Ok(self.history.rename(id, name))
    }

    /// Tear down: stop the timer and hand back the document and history
    pub fn close(self) -> (Document, VersionHistory) {
        let Self {
            document,
            history,
            mut rescan,
            ..
        } = self;
        rescan.cancel();
        (document, history)
    }
}
