mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    fill, init, outline, placeholders, validate, FillArgs, InitArgs, OutlineArgs,
    PlaceholdersArgs, ValidateArgs,
};
use tracing_subscriber::{fmt, EnvFilter};

/// Folio CLI - inspect and fill template documents
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default folio.config.json
    Init(InitArgs),

    /// Print the heading outline of a document
    Outline(OutlineArgs),

    /// List placeholders grouped by section
    Placeholders(PlaceholdersArgs),

    /// Fill a placeholder with a value
    Fill(FillArgs),

    /// Check a document and optionally write the repaired tree
    Validate(ValidateArgs),
}

fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Outline(args) => outline(args, &cwd),
        Command::Placeholders(args) => placeholders(args, &cwd),
        Command::Fill(args) => fill(args, &cwd),
        Command::Validate(args) => validate(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
