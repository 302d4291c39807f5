use super::{read_document, resolve};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use folio_editor::{Document, Mutation, Placeholder};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct FillArgs {
    /// Input JSON document
    pub input: PathBuf,

    /// Placeholder key, without brackets
    #[arg(short, long, conflicts_with = "placeholder", required_unless_present = "placeholder")]
    pub key: Option<String>,

    /// Placeholder id from `folio placeholders`
    #[arg(short, long)]
    pub placeholder: Option<String>,

    /// Replacement text
    #[arg(long)]
    pub value: String,

    /// Fill every occurrence of the key instead of the first
    #[arg(short, long, requires = "key")]
    pub all: bool,

    /// Write the result here instead of stdout
    #[arg(short, long, conflicts_with = "in_place")]
    pub output: Option<PathBuf>,

    /// Overwrite the input file
    #[arg(long)]
    pub in_place: bool,
}

/// Which placeholders to fill
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Id(String),
    Key { key: String, all: bool },
}

pub fn fill(args: FillArgs, cwd: &str) -> Result<()> {
    let input = resolve(cwd, &args.input);
    let mut document = read_document(&input)?;

    let target = match (args.key, args.placeholder) {
        (Some(key), _) => Target::Key { key, all: args.all },
        (None, Some(id)) => Target::Id(id),
        (None, None) => return Err(anyhow!("Pass --key or --placeholder")),
    };

    let filled = fill_document(&mut document, &target, &args.value)?;
    let json = document.to_json_pretty()?;

    let destination = match (args.output, args.in_place) {
        (Some(output), _) => Some(resolve(cwd, &output)),
        (None, true) => Some(input),
        (None, false) => None,
    };

    match destination {
        Some(path) => {
            fs::write(&path, json)?;
            eprintln!(
                "  {} Filled {} placeholder(s) → {}",
                "✓".green(),
                filled,
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Fill the targeted placeholders, returning how many were replaced
pub fn fill_document(document: &mut Document, target: &Target, value: &str) -> Result<usize> {
    let result = document.scan();

    let mut selected: Vec<Placeholder> = match target {
        Target::Id(id) => result.placeholder(id).cloned().into_iter().collect(),
        Target::Key { key, all } => {
            let matching = result.placeholders.iter().filter(|p| &p.key == key).cloned();
            if *all {
                matching.collect()
            } else {
                matching.take(1).collect()
            }
        }
    };

    if selected.is_empty() {
        return Err(match target {
            Target::Id(id) => anyhow!("No placeholder with id {}", id),
            Target::Key { key, .. } => anyhow!("No placeholder [{}] in document", key),
        });
    }

    // Later occurrences first, so offsets of earlier ones in the same run hold
    selected.reverse();
    let count = selected.len();
    for placeholder in selected {
        tracing::debug!("Filling {} with {:?}", placeholder.id, value);
        document.apply(Mutation::FillPlaceholder {
            placeholder,
            value: value.to_string(),
        })?;
    }

    Ok(count)
}
