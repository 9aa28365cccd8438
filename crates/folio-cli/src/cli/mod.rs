use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `folio` binary.
#[derive(Debug, Parser)]
#[command(
    name = "folio",
    version,
    about = "Folio - keeps portfolio profile counts in sync"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw, text
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// HTML page holding the stat elements (defaults to an in-memory page)
    #[arg(short, long, global = true)]
    pub page: Option<PathBuf>,

    /// Never write changes back to the page
    #[arg(long, global = true)]
    pub dry_run: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            page: self.page.clone(),
            dry_run: self.dry_run,
        }
    }
}

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run one sync cycle now.
    Sync,
    /// Keep syncing on the configured schedule until interrupted.
    Watch,
    /// Compare displayed counts with the configured baseline.
    Validate,
    /// Check that displayed counts are plain decimals matching the baseline.
    CheckFormat,
    /// List fields where the page differs from the baseline.
    CheckUpdates,
    /// Write the configured baseline onto the page.
    ApplyBaseline,
    /// Run extraction over a saved profile document.
    Extract {
        /// Saved profile HTML
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Print the effective configuration.
    Config,
}
