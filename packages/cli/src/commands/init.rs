use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_editor::{EditorConfig, DEFAULT_CONFIG_NAME};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Rescan delay in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    let mut config = EditorConfig::default();
    if let Some(debounce_ms) = args.debounce_ms {
        config.debounce_ms = debounce_ms;
    }

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    Ok(())
}
