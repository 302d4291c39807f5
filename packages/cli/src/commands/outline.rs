use super::{check_format, read_document, resolve};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_editor::HeadingEntry;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct OutlineArgs {
    /// Input JSON document
    pub input: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn outline(args: OutlineArgs, cwd: &str) -> Result<()> {
    check_format(&args.format)?;
    let document = read_document(&resolve(cwd, &args.input))?;
    let entries = document.outline();

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{}", "No headings found".yellow());
        return Ok(());
    }

    for line in render_outline(&entries) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per entry, indented by heading level
fn render_outline(entries: &[HeadingEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
            format!("{}{} {}", indent, entry.title, format!("({})", entry.path).dimmed())
        })
        .collect()
}
