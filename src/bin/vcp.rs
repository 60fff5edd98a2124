//! # vcp CLI - rotating snapshots for single files
//!
//! Command-line front end for the vcp versioning library.
//!
//! ## Usage
//! ```bash
//! # Save the current content of a file as a new version
//! vcp save notes.txt
//!
//! # List saved versions
//! vcp list notes.txt
//!
//! # Print a saved version to stdout
//! vcp view Version1_notes.txt
//! ```

use clap::{Parser, Subcommand};
use colored::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use vcp::{Result, SaveOutcome, VersionStoreBuilder, DEFAULT_ROOT};

/// vcp - save, list, and view rotating snapshots of individual files
#[derive(Parser)]
#[command(name = "vcp")]
#[command(version)]
#[command(about = "Fixed-capacity file versioning - keep up to 3 rotating snapshots per file")]
#[command(long_about = None)]
struct Cli {
    /// Root directory holding all version directories
    #[arg(short, long, global = true, default_value = DEFAULT_ROOT)]
    root: PathBuf,

    /// Answer yes to overwrite prompts without asking
    #[arg(short, long, global = true)]
    yes: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save the current content of a file as a new version
    Save {
        /// File to snapshot
        filename: PathBuf,
    },

    /// List saved versions of a file
    #[command(alias = "ls")]
    List {
        /// Tracked filename
        filename: String,
    },

    /// Print a saved version to stdout
    #[command(alias = "cat")]
    View {
        /// Slot name of the form Version<1-3>_<filename>
        slot_name: String,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    // Disable colors if needed
    if std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    }

    // Run command
    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e.user_message());
        std::process::exit(1);
    }
}

/// Main command runner
fn run(cli: Cli) -> Result<()> {
    let mut builder = VersionStoreBuilder::new().root(cli.root);
    if cli.yes {
        builder = builder.confirmation(|| true);
    }
    let mut store = builder.build();

    match cli.command {
        Commands::Save { filename } => cmd_save(&mut store, &filename),
        Commands::List { filename } => cmd_list(&store, &filename),
        Commands::View { slot_name } => cmd_view(&store, &slot_name),
    }
}

/// Save a new version of a file
fn cmd_save(store: &mut vcp::VersionStore, filename: &Path) -> Result<()> {
    match store.save(filename)? {
        SaveOutcome::Saved { slot } => {
            println!(
                "{} Current version of {} saved in slot {}",
                "✓".green().bold(),
                filename.display().to_string().cyan(),
                slot.to_string().yellow()
            );
        }
        SaveOutcome::Rotated => {
            println!(
                "{} Newest version of {} saved (oldest overwritten)",
                "✓".green().bold(),
                filename.display().to_string().cyan()
            );
        }
        SaveOutcome::Declined => {
            println!("Nothing saved.");
        }
    }
    Ok(())
}

/// List saved versions of a file
fn cmd_list(store: &vcp::VersionStore, filename: &str) -> Result<()> {
    let entries = match store.list(filename) {
        Ok(entries) => entries,
        Err(e) if e.is_no_versions() => {
            println!("No saved versions of {}", filename.cyan());
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    println!("Versions of {}:", filename.cyan());
    if entries.is_empty() {
        println!("  (none)");
    }
    for entry in entries {
        println!("  {}", entry.name);
    }
    Ok(())
}

/// Stream a saved version to stdout
fn cmd_view(store: &vcp::VersionStore, slot_name: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    store.view(slot_name, &mut handle)?;
    handle.flush()?;
    Ok(())
}
