
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use crate::data_types::chromosome_stats::{ChromosomeStats, SwitchError};
use crate::data_types::genome_stats::GenomeStats;

/// Label for the genome-wide rollup row
const ALL_LABEL: &str = "ALL";

/// Contains all the data written to each row of the summary file
#[derive(Serialize)]
struct SummaryRow {
    /// Chromosome name, or "ALL" for the genome-wide row
    chromosome: String,
    /// Total truth variants observed
    truth_total: u64,
    /// Truth variants with no called counterpart
    missed: u64,
    /// Matches with disagreeing REF/ALT
    wrong_ref_alt: u64,
    /// Matches with disagreeing genotype
    wrong_phasing: u64,
    /// Called variants with no truth counterpart
    false_positives: u64,
    /// Switch error numerator
    switch_errors: u64,
    /// Switch error denominator (adjacent phased pairs)
    switch_pairs: u64,
    /// Switch error rate; empty cell when undefined
    switch_error_rate: Option<f64>
}

impl SummaryRow {
    /// Creates a row from a label and the per-chromosome style counts
    fn new(
        chromosome: String, truth_total: u64, missed: u64, wrong_ref_alt: u64,
        wrong_phasing: u64, false_positives: u64, switch_error: SwitchError
    ) -> Self {
        Self {
            chromosome,
            truth_total, missed, wrong_ref_alt, wrong_phasing, false_positives,
            switch_errors: switch_error.switches,
            switch_pairs: switch_error.pairs,
            switch_error_rate: switch_error.rate()
        }
    }
}

/// Writes the per-chromosome summary table plus a final genome-wide "ALL" row.
/// The delimiter is tab unless the filename ends with ".csv".
/// # Arguments
/// * `filename` - the filename for the output (tsv/csv)
/// * `chrom_stats` - the per-chromosome stats, written in map (string) order
/// * `genome` - the genome-wide rollup
pub fn write_summary_table(
    filename: &Path, chrom_stats: &BTreeMap<String, ChromosomeStats>, genome: &GenomeStats
) -> csv::Result<()> {
    let is_csv: bool = filename.extension().unwrap_or_default() == "csv";
    let delimiter: u8 = if is_csv { b',' } else { b'\t' };
    let mut csv_writer: csv::Writer<File> = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(filename)?;

    for (chrom, stats) in chrom_stats.iter() {
        let row = SummaryRow::new(
            chrom.clone(), stats.total_truth(), stats.missed(), stats.wrong_ref_alt(),
            stats.wrong_phasing(), stats.false_positives(), stats.switch_error()
        );
        csv_writer.serialize(&row)?;
    }

    let all_row = SummaryRow::new(
        ALL_LABEL.to_string(), genome.total_truth(), genome.missed(), genome.wrong_ref_alt(),
        genome.wrong_phasing(), genome.false_positives(), genome.switch_error()
    );
    csv_writer.serialize(&all_row)?;

    csv_writer.flush()?;
    Ok(())
}
