use super::resolve;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use folio_model::validate as repair;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Input JSON document
    pub input: PathBuf,

    /// Write the repaired tree back to the input file
    #[arg(short, long)]
    pub write: bool,
}

/// Outcome of checking one document
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub repaired: Value,
    pub changed: bool,
}

pub fn validate(args: ValidateArgs, cwd: &str) -> Result<()> {
    let path = resolve(cwd, &args.input);
    let source =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&source)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    let report = check(&value)?;
    if !report.changed {
        println!("{} {} is well-formed", "✓".green(), path.display());
        return Ok(());
    }

    println!("{} {} needed repairs", "⚠️".yellow(), path.display());
    if args.write {
        fs::write(&path, serde_json::to_string_pretty(&report.repaired)?)?;
        println!("  {} Wrote repaired document", "✓".green());
    } else {
        println!("Use --write to save the repaired document");
    }
    Ok(())
}

/// Repair `value` and compare against the input
pub fn check(value: &Value) -> Result<Report> {
    let repaired = serde_json::to_value(repair(value))?;
    let changed = &repaired != value;
    if changed {
        tracing::warn!("Document required repairs");
    }
    Ok(Report { repaired, changed })
}
