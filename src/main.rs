
use log::{error, info, LevelFilter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;

use phasecheck::block_solver::{merge_block_intervals, BlockFilterConfigBuilder};
use phasecheck::cli::accuracy::{check_accuracy_settings, AccuracySettings};
use phasecheck::cli::blocks::{check_blocks_settings, BlocksSettings};
use phasecheck::cli::core::{get_cli, Commands};
use phasecheck::data_types::genome_stats::GenomeStats;
use phasecheck::parsing::phase_blocks::{load_block_span_file, load_chromosome_lengths};
use phasecheck::parsing::variant_table::load_variant_file;
use phasecheck::reconcile::reconcile_variants;
use phasecheck::util::json_io::save_json;
use phasecheck::writers::accuracy_report::write_accuracy_report;
use phasecheck::writers::block_intervals::write_block_intervals;
use phasecheck::writers::summary::write_summary_table;

/// Sets up env_logger from the repeatable -v flag
fn setup_logging(verbosity: u8) {
    let filter_level: LevelFilter = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };
    env_logger::builder()
        .format_timestamp_millis()
        .filter_level(filter_level)
        .init();
}

fn run_accuracy(settings: AccuracySettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    setup_logging(settings.verbosity);

    let settings = match check_accuracy_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    // save the CLI options if requested
    if let Some(settings_fn) = settings.output_settings_filename.as_deref() {
        info!("Saving CLI options to {settings_fn:?}...");
        if let Err(e) = save_json(&settings, settings_fn) {
            error!("Error while saving CLI options: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    // set up the number of threads for rayon
    match rayon::ThreadPoolBuilder::new().num_threads(settings.threads).build_global() {
        Ok(()) => {},
        Err(e) => {
            error!("Error while building thread pool: {e}");
            std::process::exit(exitcode::OSERR);
        }
    };

    // load both variant sets into memory
    info!("Loading truth variants...");
    let truth_variants = match load_variant_file(&settings.truth_filename) {
        Ok(tv) => tv,
        Err(e) => {
            error!("Error while loading truth variants: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };
    info!("Found {} variants in the ground truth", truth_variants.len());

    info!("Loading phased variants...");
    let called_variants = match load_variant_file(&settings.phased_filename) {
        Ok(cv) => cv,
        Err(e) => {
            error!("Error while loading phased variants: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };
    info!("Found {} variants in the callset", called_variants.len());

    // the main event: sort, merge-scan, and accumulate per chromosome
    info!("Reconciling callset against truth...");
    let chrom_stats = reconcile_variants(truth_variants, called_variants);
    info!("Reconciled {} chromosomes.", chrom_stats.len());

    // fold everything into the genome-wide rollup
    let genome = GenomeStats::from_chromosome_stats(&chrom_stats);
    info!("Truth total: {}; missed: {}; false positives: {}; wrong ref/alt: {}",
        genome.total_truth(), genome.missed(), genome.false_positives(), genome.wrong_ref_alt());
    match genome.switch_error().rate() {
        Some(rate) => info!("Genome-wide switch error rate: {rate}"),
        None => info!("Genome-wide switch error rate: undefined")
    }

    // the full report goes to stdout
    let stdout = std::io::stdout();
    let mut report_handle = BufWriter::new(stdout.lock());
    if let Err(e) = write_accuracy_report(&mut report_handle, &chrom_stats, &genome)
        .and_then(|_| report_handle.flush()) {
        error!("Error while writing accuracy report: {e}");
        std::process::exit(exitcode::IOERR);
    }

    // optional machine-readable summary
    if let Some(summary_fn) = settings.output_summary_filename.as_deref() {
        info!("Saving output summary to {summary_fn:?}...");
        if let Err(e) = write_summary_table(summary_fn, &chrom_stats, &genome) {
            error!("Error while saving summary file: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    }

    info!("Accuracy evaluation completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn run_blocks(settings: BlocksSettings) {
    // start the timer
    let start_time = Instant::now();

    // set up logging before we check the other settings
    setup_logging(settings.verbosity);

    let settings = match check_blocks_settings(settings) {
        Ok(s) => s,
        Err(e) => {
            error!("Error while verifying settings: {e:#}");
            std::process::exit(exitcode::CONFIG);
        }
    };

    // load the chromosome lengths
    info!("Loading chromosome lengths...");
    let chrom_lengths = match load_chromosome_lengths(&settings.chrom_lengths_filename) {
        Ok(cl) => cl,
        Err(e) => {
            error!("Error while loading chromosome lengths: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };
    info!("Found {} chromosome lengths", chrom_lengths.len());

    // load the phase block spans
    info!("Loading phase blocks...");
    let block_spans = match load_block_span_file(&settings.hap_filename) {
        Ok(bs) => bs,
        Err(e) => {
            error!("Error while loading phase blocks: {e:#}");
            std::process::exit(exitcode::IOERR);
        }
    };
    info!("Found {} phase blocks", block_spans.len());

    // build our filtering configuration
    let block_config = match BlockFilterConfigBuilder::default()
        .max_chrom_name_len(settings.max_chrom_name_len)
        .append_length_sentinel(!settings.no_length_sentinel)
        .build() {
        Ok(bc) => bc,
        Err(e) => {
            error!("Error while building block filter config: {e:?}");
            std::process::exit(exitcode::SOFTWARE);
        }
    };

    // reduce to plot-ready intervals and save them
    let intervals = merge_block_intervals(&block_spans, &chrom_lengths, block_config);
    info!("Saving interval lists to {:?}...", settings.output_filename);
    let write_result = File::create(&settings.output_filename)
        .map(BufWriter::new)
        .and_then(|mut writer| {
            write_block_intervals(&mut writer, &intervals)?;
            writer.flush()
        });
    if let Err(e) = write_result {
        error!("Error while saving interval lists: {e}");
        std::process::exit(exitcode::IOERR);
    }

    info!("Block conversion completed in {} seconds.", start_time.elapsed().as_secs_f64());
}

fn main() {
    let cli = get_cli();
    match cli.command {
        Commands::Accuracy(settings) => {
            run_accuracy(*settings);
        },
        Commands::Blocks(settings) => {
            run_blocks(*settings);
        }
    }

    info!("Process finished successfully.");
}
