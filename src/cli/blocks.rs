
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::{check_required_filename, FULL_VERSION};

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about)]
pub struct BlocksSettings {
    #[clap(default_value = "")]
    #[clap(hide = true)]
    phasecheck_version: String,

    /// Phase block file from the phasing tool (HapCUT2-style, optionally gzipped)
    #[clap(required = true)]
    #[clap(short = 'b')]
    #[clap(long = "hap-blocks")]
    #[clap(value_name = "FILE")]
    #[clap(help_heading = Some("Input/Output"))]
    pub hap_filename: PathBuf,

    /// Chromosome length table (TSV)
    #[clap(required = true)]
    #[clap(short = 'l')]
    #[clap(long = "chrom-lengths")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub chrom_lengths_filename: PathBuf,

    /// Output file with per-chromosome interval lists
    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(value_name = "FILE")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_filename: PathBuf,

    /// Maximum chromosome name length to keep; longer names (alts, scaffolds) are dropped
    #[clap(long = "max-chrom-name-len")]
    #[clap(value_name = "LEN")]
    #[clap(help_heading = Some("Filtering"))]
    #[clap(default_value = "5")]
    pub max_chrom_name_len: usize,

    /// Disables the chromosome-length sentinel interval at the end of each list
    #[clap(long = "no-length-sentinel")]
    #[clap(help_heading = Some("Filtering"))]
    pub no_length_sentinel: bool,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8
}

pub fn check_blocks_settings(mut settings: BlocksSettings) -> anyhow::Result<BlocksSettings> {
    // hard code the version in
    settings.phasecheck_version = FULL_VERSION.clone();
    info!("Phasecheck version: {:?}", &settings.phasecheck_version);
    info!("Sub-command: blocks");
    info!("Inputs:");

    // check for all the required input files
    check_required_filename(&settings.hap_filename, "Phase blocks")?;
    check_required_filename(&settings.chrom_lengths_filename, "Chromosome lengths")?;

    // dump stuff to the logger
    info!("\tPhase blocks: {:?}", &settings.hap_filename);
    info!("\tChromosome lengths: {:?}", &settings.chrom_lengths_filename);

    info!("Outputs:");
    info!("\tInterval lists: {:?}", &settings.output_filename);

    info!("Filtering:");
    info!("\tMaximum chromosome name length: {}", settings.max_chrom_name_len);
    info!("\tLength sentinel: {}", if settings.no_length_sentinel { "DISABLED" } else { "ENABLED" });

    Ok(settings)
}
