use super::{check_format, read_document, resolve};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_editor::{Placeholder, ScanResult};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct PlaceholdersArgs {
    /// Input JSON document
    pub input: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn placeholders(args: PlaceholdersArgs, cwd: &str) -> Result<()> {
    check_format(&args.format)?;
    let document = read_document(&resolve(cwd, &args.input))?;
    let result = document.scan();

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if result.placeholders.is_empty() {
        println!("{} No placeholders to fill", "✓".green());
        return Ok(());
    }

    for line in render_sections(&result) {
        println!("{}", line);
    }
    println!();
    println!("   Total placeholders: {}", result.placeholders.len());
    Ok(())
}

fn render_placeholder(placeholder: &Placeholder, indent: &str) -> String {
    format!(
        "{}[{}] {} {}",
        indent,
        placeholder.key,
        placeholder.label,
        placeholder.id.dimmed()
    )
}

/// Sections that own placeholders, each followed by its own placeholders and
/// then its sub-headings
fn render_sections(result: &ScanResult) -> Vec<String> {
    let mut lines = Vec::new();
    let render_ids = |lines: &mut Vec<String>, ids: &[String], indent: &str| {
        for placeholder in ids.iter().filter_map(|id| result.placeholder(id)) {
            lines.push(render_placeholder(placeholder, indent));
        }
    };

    for section in result.sections_with_placeholders() {
        let title = if section.heading.text.is_empty() {
            "(untitled)".to_string()
        } else {
            section.heading.text.clone()
        };
        lines.push(title.bold().to_string());
        render_ids(&mut lines, &section.heading.placeholders, "  ");

        for sub_heading in section.sub_headings {
            lines.push(format!("  {}", sub_heading.text.bold()));
            render_ids(&mut lines, &sub_heading.placeholders, "    ");
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_editor::{scan, DocumentNode};

    #[test]
    fn test_render_sections() {
        colored::control::set_override(false);
        let result = scan(&[
            DocumentNode::paragraph("Date: [DATE]"),
            DocumentNode::heading(1, "Parties"),
            DocumentNode::heading(2, "Founder"),
            DocumentNode::paragraph("Name: [NAME]"),
        ]);

        assert_eq!(
            render_sections(&result),
            [
                "(untitled)",
                "  [DATE] Date: placeholder-0-0-6",
                "Parties",
                "  Founder",
                "    [NAME] Name: placeholder-3-0-6",
            ]
        );
    }

    #[test]
    fn test_placeholders_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("doc.json"),
            r#"[{ "type": "p", "children": [{ "text": "[A]" }] }]"#,
        )
        .unwrap();

        let args = PlaceholdersArgs {
            input: PathBuf::from("doc.json"),
            format: "json".to_string(),
        };
        placeholders(args, &dir.path().display().to_string()).unwrap();
    }
}
