
use anyhow::bail;
use clap::{Parser, Subcommand};
use lazy_static::lazy_static;
use std::path::Path;

use crate::cli::accuracy::AccuracySettings;
use crate::cli::blocks::BlocksSettings;

lazy_static! {
    /// Stores the full version string we plan to use, which is generated in build.rs
    /// # Examples
    /// * `0.2.1-6bb9635-dirty` - while on a dirty branch
    /// * `0.2.1-6bb9635` - with a fresh commit
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));
}

#[derive(Parser)]
#[clap(author,
    version = &**FULL_VERSION,
    about)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// Phasecheck, a tool for measuring small variant calling and phasing accuracy.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Measures a phased callset relative to a ground truth set
    Accuracy(Box<AccuracySettings>),
    /// Converts phase block spans into plot-ready interval lists
    Blocks(Box<BlocksSettings>)
}

pub fn get_cli() -> Cli {
    Cli::parse()
}

/// Checks if a file exists and will otherwise exit
/// # Arguments
/// * `filename` - the file path to check for
/// * `label` - the label to use for error messages
pub fn check_required_filename(filename: &Path, label: &str) -> anyhow::Result<()> {
    if !filename.exists() {
        bail!("{} does not exist: \"{}\"", label, filename.display());
    }

    // file exists
    Ok(())
}
