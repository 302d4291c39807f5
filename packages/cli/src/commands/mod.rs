pub mod fill;
pub mod init;
pub mod outline;
pub mod placeholders;
pub mod validate;

pub use fill::{fill, FillArgs};
pub use init::{init, InitArgs};
pub use outline::{outline, OutlineArgs};
pub use placeholders::{placeholders, PlaceholdersArgs};
pub use validate::{validate, ValidateArgs};

use anyhow::{anyhow, Context, Result};
use folio_editor::Document;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve `input` against the working directory
pub(crate) fn resolve(cwd: &str, input: &Path) -> PathBuf {
    PathBuf::from(cwd).join(input)
}

pub(crate) fn read_document(path: &Path) -> Result<Document> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Document::from_json(&source).with_context(|| format!("Invalid JSON in {}", path.display()))
}

pub(crate) fn check_format(format: &str) -> Result<()> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(anyhow!("Unknown format: {}. Use: text or json", other)),
    }
}
