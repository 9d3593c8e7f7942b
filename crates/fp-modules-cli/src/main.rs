//! fp-modules CLI - regenerates the functional-variant modules of a library.
//!
//! The last positional argument names the versioned source directory; its
//! `fp/` folder and `fp.js` entry are rebuilt from scratch on every run.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fp_modules::{build, Config, Mapping};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

/// Generate the functional-variant modules of a source directory.
#[derive(Parser, Debug)]
#[command(
    name = "fp-modules",
    author,
    version,
    about = "Generate functional-variant modules from per-function module files",
    long_about = None
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Source directory to convert; when several are given the last one is used.
    #[arg(required = true, num_args = 1..)]
    paths: Vec<PathBuf>,
}

impl Cli {
    fn target(&self) -> Option<&PathBuf> {
        self.paths.last()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN // Successful runs stay silent
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let target = cli
        .target()
        .context("A target source directory is required")?;

    let config = Config::load().context("Failed to load configuration")?;
    let mapping = Mapping::builtin().context("Failed to load mapping tables")?;

    build(target, &config, &mapping)
        .with_context(|| format!("Failed to generate modules for {}", target.display()))?;

    Ok(())
}
