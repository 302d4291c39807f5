use crate::EditorError;
use folio_model::DocumentNode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Quiescence window before a content change triggers a rescan
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Name of the synthesized version every history starts with
    #[serde(default = "default_version_name")]
    pub default_version_name: String,

    /// Saved versions are named `<prefix> <n>`
    #[serde(default = "default_version_name_prefix")]
    pub version_name_prefix: String,

    /// Template loaded when the default version is opened while still blank
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_document: Vec<DocumentNode>,
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_version_name() -> String {
    "Default version".to_string()
}

fn default_version_name_prefix() -> String {
    "Version".to_string()
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults when absent
    pub fn load(dir: &Path) -> Result<Self, EditorError> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: EditorConfig = serde_json::from_str(&content)?;
            tracing::debug!("Loaded editor config from {}", config_path.display());
            Ok(config)
        } else {
            Ok(EditorConfig::default())
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            default_version_name: default_version_name(),
            version_name_prefix: default_version_name_prefix(),
            default_document: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "debounceMs": 250,
            "defaultVersionName": "Draft",
            "versionNamePrefix": "Revision"
        }"#;

        let config: EditorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.default_version_name, "Draft");
        assert_eq!(config.version_name_prefix, "Revision");
        assert_eq!(config.debounce(), Duration::from_millis(250));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{ "debounceMs": 100 }"#).unwrap();
        assert_eq!(config.debounce_ms, 100);
        assert_eq!(config.default_version_name, "Default version");
        assert_eq!(config.version_name_prefix, "Version");
    }

    #[test]
    fn test_parse_default_document() {
        let json = r#"{ "defaultDocument": [{ "type": "h1", "children": [] }, { "type": "p", "children": [{ "text": "Terms" }] }] }"#;
        let config: EditorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            config.default_document,
            [DocumentNode::heading(1, ""), DocumentNode::paragraph("Terms")]
        );

        let written = serde_json::to_value(EditorConfig::default()).unwrap();
        assert!(written.get("defaultDocument").is_none());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(EditorConfig::load(dir.path()).unwrap(), EditorConfig::default());

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), r#"{ "debounceMs": 50 }"#).unwrap();
        assert_eq!(EditorConfig::load(dir.path()).unwrap().debounce_ms, 50);

        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "not json").unwrap();
        assert!(matches!(EditorConfig::load(dir.path()), Err(EditorError::Json(_))));
    }
}
