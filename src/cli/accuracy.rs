
use clap::Args;
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::core::{check_required_filename, FULL_VERSION};

#[derive(Args, Clone, Default, Serialize)]
#[clap(author, about)]
pub struct AccuracySettings {
    #[clap(default_value = "")]
    #[clap(hide = true)]
    phasecheck_version: String,

    /// Ground truth variant table (TSV/VCF-like, optionally gzipped)
    #[clap(required = true)]
    #[clap(short = 't')]
    #[clap(long = "truth")]
    #[clap(value_name = "FILE")]
    #[clap(help_heading = Some("Input/Output"))]
    pub truth_filename: PathBuf,

    /// Phased variant table under evaluation (TSV/VCF-like, optionally gzipped)
    #[clap(required = true)]
    #[clap(short = 'p')]
    #[clap(long = "phased-variants")]
    #[clap(value_name = "FILE")]
    #[clap(help_heading = Some("Input/Output"))]
    pub phased_filename: PathBuf,

    /// Optional per-chromosome summary table (tsv/csv)
    #[clap(short = 'o')]
    #[clap(long = "output-summary")]
    #[clap(value_name = "TSV")]
    #[clap(help_heading = Some("Input/Output"))]
    pub output_summary_filename: Option<PathBuf>,

    /// Optional debug dump of the parsed settings
    #[clap(hide = true)]
    #[clap(long = "output-settings")]
    #[clap(value_name = "JSON")]
    pub output_settings_filename: Option<PathBuf>,

    /// Number of threads to use for the per-chromosome reconciliation
    #[clap(long = "threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    pub threads: usize,

    /// Enable verbose output.
    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = clap::ArgAction::Count)]
    pub verbosity: u8
}

pub fn check_accuracy_settings(mut settings: AccuracySettings) -> anyhow::Result<AccuracySettings> {
    // hard code the version in
    settings.phasecheck_version = FULL_VERSION.clone();
    info!("Phasecheck version: {:?}", &settings.phasecheck_version);
    info!("Sub-command: accuracy");
    info!("Inputs:");

    // check for all the required input files
    check_required_filename(&settings.truth_filename, "Truth variants")?;
    check_required_filename(&settings.phased_filename, "Phased variants")?;

    // dump stuff to the logger
    info!("\tTruth variants: {:?}", &settings.truth_filename);
    info!("\tPhased variants: {:?}", &settings.phased_filename);

    // outputs
    info!("Outputs:");
    if let Some(filename) = settings.output_summary_filename.as_deref() {
        info!("\tSummary table: {filename:?}");
    } else {
        info!("\tSummary table: None");
    }

    if settings.threads == 0 {
        settings.threads = 1;
    }
    info!("Processing threads: {}", settings.threads);

    Ok(settings)
}
