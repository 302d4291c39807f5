//! # Version History
//!
//! Ordered collection of whole-document snapshots with exactly one current
//! entry.
//!
//! ## Design
//!
//! - Snapshot content is shared and immutable; it is replaced wholesale, never
//!   edited in place
//! - Leaving the current version (save or select) checkpoints the live tree
//!   into it first, so in-progress edits are kept
//! - Deleting the current version hands "current" to the first remaining entry
//! - Deleting the last version synthesizes a fresh default one
//! - Every operation leaves exactly one current entry
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = VersionHistory::new(&EditorConfig::default());
//!
//! // Checkpoint the live tree and start "Version 1"
//! history.save(doc.nodes());
//!
//! // Switch back, keeping edits made since
//! if let Some(content) = history.select(&default_id, doc.nodes()) {
//!     doc.load(content);
//! }
//! ```

use crate::EditorConfig;
use chrono::{DateTime, Utc};
use folio_common::is_blank;
use folio_model::{deep_clone, normalize, DocumentNode, IDGenerator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A named snapshot of the whole tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    id: String,
    content: Arc<Vec<DocumentNode>>,
    date: DateTime<Utc>,
    is_current: bool,
    name: String,
}

impl Version {
    /// Build an entry, e.g. when restoring a persisted history
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        content: Vec<DocumentNode>,
        date: DateTime<Utc>,
        is_current: bool,
    ) -> Self {
        Self {
            id: id.into(),
            content: Arc::new(content),
            date,
            is_current,
            name: name.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn is_current(&self) -> bool {
        self.is_current
    }

    pub fn content(&self) -> &[DocumentNode] {
        &self.content
    }
}

/// Version collection for one document
#[derive(Debug, Clone)]
pub struct VersionHistory {
    versions: Vec<Version>,
    ids: IDGenerator,
    default_name: String,
    name_prefix: String,
    default_document: Vec<DocumentNode>,
}

impl VersionHistory {
    /// Start a history holding one current default version
    pub fn new(config: &EditorConfig) -> Self {
        let mut history = Self::empty(config);
        let version = history.synthesize_default();
        history.versions.push(version);
        history
    }

    /// Reload a persisted collection. The current flag is repaired here, at
    /// the boundary: the first flagged entry wins, or the first entry when none
    /// is flagged. An empty collection gets a default version.
    pub fn restore(config: &EditorConfig, versions: Vec<Version>) -> Self {
        let mut history = Self::empty(config);

        let last_sequence = versions
            .iter()
            .filter_map(|version| history.ids.sequence_of(&version.id))
            .max()
            .unwrap_or(0);
        history.ids = IDGenerator::starting_after(history.ids.seed().to_string(), last_sequence);

        let current = versions
            .iter()
            .position(Version::is_current)
            .unwrap_or(0);
        history.versions = versions
            .into_iter()
            .enumerate()
            .map(|(index, mut version)| {
                version.is_current = index == current;
                version.content = Arc::new(normalize(deep_clone(&version.content)));
                version
            })
            .collect();

        if history.versions.is_empty() {
            let version = history.synthesize_default();
            history.versions.push(version);
        }

        history
    }

    fn empty(config: &EditorConfig) -> Self {
        Self {
            versions: Vec::new(),
            ids: IDGenerator::new("version"),
            default_name: config.default_version_name.clone(),
            name_prefix: config.version_name_prefix.clone(),
            default_document: normalize(config.default_document.clone()),
        }
    }

    fn synthesize_default(&mut self) -> Version {
        Version::new(
            self.ids.new_id(),
            self.default_name.clone(),
            deep_clone(&self.default_document),
            Utc::now(),
            true,
        )
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Version> {
        self.versions.iter()
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn get(&self, id: &str) -> Option<&Version> {
        self.versions.iter().find(|version| version.id == id)
    }

    pub fn current(&self) -> Option<&Version> {
        self.versions.iter().find(|version| version.is_current)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.versions.iter().position(|version| version.id == id)
    }

    /// Checkpoint `live` into the current version and demote it
    fn checkpoint_current(&mut self, live: Arc<Vec<DocumentNode>>) {
        for version in self.versions.iter_mut().filter(|version| version.is_current) {
            version.content = Arc::clone(&live);
            version.is_current = false;
        }
    }

    fn next_version_name(&self) -> String {
        let existing = self
            .versions
            .iter()
            .filter(|version| self.is_numbered_name(&version.name))
            .count();
        format!("{} {}", self.name_prefix, existing + 1)
    }

    fn is_numbered_name(&self, name: &str) -> bool {
        name.strip_prefix(self.name_prefix.as_str())
            .and_then(|rest| rest.strip_prefix(' '))
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
    }

    /// Content to hand the editor when switching to `version`
    fn loadable_content(&self, version: &Version) -> Vec<DocumentNode> {
        if version.name == self.default_name && is_blank(&version.content) {
            deep_clone(&self.default_document)
        } else {
            deep_clone(&version.content)
        }
    }

    /// Snapshot the live tree as a new current version
    pub fn save(&mut self, current: &[DocumentNode]) -> &Version {
        let snapshot = Arc::new(normalize(deep_clone(current)));
        self.checkpoint_current(Arc::clone(&snapshot));

        let version = Version {
            id: self.ids.new_id(),
            content: snapshot,
            date: Utc::now(),
            is_current: true,
            name: self.next_version_name(),
        };
        tracing::info!("Saved version {} ({})", version.name, version.id);

        self.versions.push(version);
        &self.versions[self.versions.len() - 1]
    }

    /// Make `id` current. Returns the content to load, or `None` when the
    /// target is unknown or already current.
    pub fn select(&mut self, id: &str, live: &[DocumentNode]) -> Option<Vec<DocumentNode>> {
        let target = self.position(id)?;
        if self.versions[target].is_current {
            return None;
        }

        self.checkpoint_current(Arc::new(normalize(deep_clone(live))));
        self.versions[target].is_current = true;
        tracing::info!("Switched to version {}", id);

        Some(self.loadable_content(&self.versions[target]))
    }

    /// Remove `id`. Returns content to load when "current" moved as a result.
    pub fn delete(&mut self, id: &str) -> Option<Vec<DocumentNode>> {
        let index = self.position(id)?;
        let removed = self.versions.remove(index);
        tracing::info!("Deleted version {} ({})", removed.name, removed.id);

        if self.versions.is_empty() {
            let version = self.synthesize_default();
            let content = self.loadable_content(&version);
            self.versions.push(version);
            return Some(content);
        }

        if removed.is_current {
            self.versions[0].is_current = true;
            return Some(self.loadable_content(&self.versions[0]));
        }

        None
    }

    /// Rename `id`. Blank names are ignored. Returns whether anything changed.
    pub fn rename(&mut self, id: &str, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        match self.versions.iter_mut().find(|version| version.id == id) {
            Some(version) => {
                version.name = name.to_string();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> VersionHistory {
        VersionHistory::new(&EditorConfig::default())
    }

    fn current_count(history: &VersionHistory) -> usize {
        history.iter().filter(|version| version.is_current()).count()
    }

    fn names(history: &VersionHistory) -> Vec<&str> {
        history.iter().map(Version::name).collect()
    }

    #[test]
    fn test_new_history_has_current_default() {
        let history = history();
        assert_eq!(history.len(), 1);
        let current = history.current().unwrap();
        assert_eq!(current.name(), "Default version");
        assert_eq!(current.id(), "version-1");
        assert_eq!(current.content(), &[DocumentNode::empty_paragraph()]);
    }

    #[test]
    fn test_save_checkpoints_and_appends() {
        let mut history = history();
        let live = vec![DocumentNode::paragraph("draft")];

        let saved = history.save(&live).clone();
        assert_eq!(saved.name(), "Version 1");
        assert!(saved.is_current());
        assert_eq!(saved.content(), live.as_slice());

        let default = &history.versions()[0];
        assert!(!default.is_current());
        assert_eq!(default.content(), live.as_slice());

        history.save(&live);
        assert_eq!(names(&history), vec!["Default version", "Version 1", "Version 2"]);
        assert_eq!(current_count(&history), 1);
    }

    #[test]
    fn test_save_counts_matching_names() {
        let mut history = history();
        history.save(&[DocumentNode::paragraph("a")]);
        let second = history.save(&[DocumentNode::paragraph("b")]).id().to_string();
        history.rename(&second, "Final");
        history.save(&[DocumentNode::paragraph("c")]);

        assert_eq!(names(&history), vec!["Default version", "Version 1", "Final", "Version 2"]);
    }

    #[test]
    fn test_save_validates_snapshot() {
        let mut history = history();
        let saved = history.save(&[DocumentNode::text("loose")]);
        assert_eq!(saved.content(), &[DocumentNode::paragraph("loose")]);
    }

    #[test]
    fn test_select_checkpoints_live_edits() {
        let mut history = history();
        let default_id = history.current().unwrap().id().to_string();
        history.save(&[DocumentNode::paragraph("v1")]);

        let loaded = history
            .select(&default_id, &[DocumentNode::paragraph("v1 edited")])
            .unwrap();
        assert_eq!(loaded, vec![DocumentNode::paragraph("v1")]);
        assert_eq!(history.current().unwrap().id(), default_id);
        assert_eq!(
            history.versions()[1].content(),
            &[DocumentNode::paragraph("v1 edited")]
        );
    }

    #[test]
    fn test_select_current_or_unknown_is_no_op() {
        let mut history = history();
        let current_id = history.current().unwrap().id().to_string();
        let before = history.versions().to_vec();

        assert!(history.select(&current_id, &[DocumentNode::paragraph("x")]).is_none());
        assert!(history.select("version-99", &[DocumentNode::paragraph("x")]).is_none());
        assert_eq!(history.versions(), before.as_slice());
    }

    #[test]
    fn test_select_blank_default_loads_template() {
        let template = vec![DocumentNode::heading(1, "Template")];
        let config = EditorConfig {
            default_document: template.clone(),
            ..EditorConfig::default()
        };
        let mut history = VersionHistory::restore(
            &config,
            vec![
                Version::new("version-1", "Default version", Vec::new(), Utc::now(), false),
                Version::new("version-2", "Version 1", vec![DocumentNode::paragraph("x")], Utc::now(), true),
            ],
        );

        let loaded = history.select("version-1", &[DocumentNode::paragraph("x")]).unwrap();
        assert_eq!(loaded, template);
    }

    #[test]
    fn test_delete_current_promotes_first() {
        let mut history = VersionHistory::restore(
            &EditorConfig::default(),
            vec![
                Version::new("v1", "one", vec![DocumentNode::paragraph("1")], Utc::now(), false),
                Version::new("v2", "two", vec![DocumentNode::paragraph("2")], Utc::now(), true),
                Version::new("v3", "three", vec![DocumentNode::paragraph("3")], Utc::now(), false),
            ],
        );

        let loaded = history.delete("v2").unwrap();
        assert_eq!(loaded, vec![DocumentNode::paragraph("1")]);
        assert_eq!(history.current().unwrap().id(), "v1");
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_delete_other_keeps_current() {
        let mut history = history();
        let saved = history.save(&[DocumentNode::paragraph("a")]).id().to_string();
        let default_id = history.versions()[0].id().to_string();

        assert!(history.delete(&default_id).is_none());
        assert_eq!(history.current().unwrap().id(), saved);
        assert!(history.delete("missing").is_none());
    }

    #[test]
    fn test_delete_last_synthesizes_default() {
        let mut history = history();
        let only = history.current().unwrap().id().to_string();

        let loaded = history.delete(&only).unwrap();
        assert_eq!(loaded, vec![DocumentNode::empty_paragraph()]);
        assert_eq!(history.len(), 1);
        let fresh = history.current().unwrap();
        assert_ne!(fresh.id(), only);
        assert_eq!(fresh.name(), "Default version");
    }

    #[test]
    fn test_rename() {
        let mut history = history();
        let id = history.current().unwrap().id().to_string();

        assert!(!history.rename(&id, "   "));
        assert_eq!(history.current().unwrap().name(), "Default version");

        assert!(history.rename(&id, "  Signed copy "));
        assert_eq!(history.current().unwrap().name(), "Signed copy");

        assert!(!history.rename("missing", "x"));
    }

    #[test]
    fn test_restore_repairs_current_flag_and_ids() {
        let config = EditorConfig::default();
        let none_current = VersionHistory::restore(
            &config,
            vec![
                Version::new("version-4", "a", Vec::new(), Utc::now(), false),
                Version::new("version-9", "b", Vec::new(), Utc::now(), false),
            ],
        );
        assert_eq!(none_current.current().unwrap().id(), "version-4");
        assert_eq!(
            none_current.get("version-4").unwrap().content(),
            &[DocumentNode::empty_paragraph()]
        );

        let mut many_current = VersionHistory::restore(
            &config,
            vec![
                Version::new("version-1", "a", Vec::new(), Utc::now(), false),
                Version::new("version-2", "b", Vec::new(), Utc::now(), true),
                Version::new("version-3", "c", Vec::new(), Utc::now(), true),
            ],
        );
        assert_eq!(many_current.current().unwrap().id(), "version-2");
        assert_eq!(current_count(&many_current), 1);

        let saved = many_current.save(&[DocumentNode::paragraph("x")]);
        assert_eq!(saved.id(), "version-4");

        let empty = VersionHistory::restore(&config, Vec::new());
        assert_eq!(empty.len(), 1);
        assert!(empty.current().is_some());
    }

    #[test]
    fn test_version_serialization() {
        let history = history();
        let json = serde_json::to_value(history.versions()).unwrap();
        assert_eq!(json[0]["isCurrent"], serde_json::json!(true));
        assert_eq!(json[0]["name"], serde_json::json!("Default version"));

        let versions: Vec<Version> = serde_json::from_value(json).unwrap();
        assert_eq!(versions.as_slice(), history.versions());
    }
}
