
use std::collections::BTreeMap;
use std::io::Write;
use strum::IntoEnumIterator;

use crate::data_types::chromosome_stats::{ChromosomeStats, SwitchError};
use crate::data_types::genome_stats::{GenomeStats, PhasingBreakdown};
use crate::data_types::genotype::{GenotypeCall, NUM_GENOTYPE_CALLS};

/// Formats a switch error for display; an undefined rate is spelled out, never a NaN
fn format_switch_error(switch_error: SwitchError) -> String {
    match switch_error.rate() {
        Some(rate) => format!("{} out of {} = {}", switch_error.switches, switch_error.pairs, rate),
        None => format!("{} out of {} = undefined (fewer than 2 phased het matches)", switch_error.switches, switch_error.pairs)
    }
}

/// Writes the confusion matrix rows, one line per truth genotype
fn write_confusion_matrix(out: &mut impl Write, confusion: &[[u64; NUM_GENOTYPE_CALLS]; NUM_GENOTYPE_CALLS]) -> std::io::Result<()> {
    let labels: Vec<&str> = GenotypeCall::iter().map(|gc| gc.column_label()).collect();
    writeln!(out, "Genotype confusion matrix ({} - row is truth and column is call)", labels.join(", "))?;
    for row in confusion.iter() {
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        writeln!(out, "{}", cells.join(" "))?;
    }
    Ok(())
}

/// Writes the accuracy section for a single chromosome
/// # Arguments
/// * `out` - destination for the report text
/// * `chrom` - the chromosome name
/// * `stats` - accumulated stats for that chromosome
pub fn write_chromosome_section(out: &mut impl Write, chrom: &str, stats: &ChromosomeStats) -> std::io::Result<()> {
    writeln!(out, "Results for {chrom}")?;
    writeln!(out, "Total of {} variants in the ground truth", stats.total_truth())?;
    writeln!(out, "Failed to call {} variants in the ground truth", stats.missed())?;
    writeln!(out, "Wrong ref and/or alt for {} variants", stats.wrong_ref_alt())?;
    writeln!(out, "Wrong genotype for {} variants", stats.wrong_phasing())?;
    writeln!(out, "Called {} false positives", stats.false_positives())?;
    write_confusion_matrix(out, stats.confusion())?;
    writeln!(out, "Switch error rate: {}", format_switch_error(stats.switch_error()))?;
    writeln!(out)
}

/// Writes one phasing breakdown block with a group label
fn write_breakdown(out: &mut impl Write, label: &str, breakdown: &PhasingBreakdown) -> std::io::Result<()> {
    writeln!(out, "  {label} variants in ground truth: {}", breakdown.truth_total)?;
    writeln!(out, "    Called homozygous: {}", breakdown.called_homozygous)?;
    writeln!(out, "    Called as phased heterozygous: {}", breakdown.called_phased_het)?;
    writeln!(out, "    Called as unphased heterozygous: {}", breakdown.called_unphased_het)?;
    writeln!(out, "    Called as 0|0: {}", breakdown.called_homozygous_ref)?;
    writeln!(out, "    Not called: {}", breakdown.not_called)
}

/// Writes the genome-wide section of the report
/// # Arguments
/// * `out` - destination for the report text
/// * `genome` - the genome-wide rollup
pub fn write_genome_section(out: &mut impl Write, genome: &GenomeStats) -> std::io::Result<()> {
    writeln!(out, "Detection accuracy:")?;
    writeln!(out, "  Total count in ground truth: {}", genome.total_truth())?;
    writeln!(out, "  Number of false positives: {}", genome.false_positives())?;
    writeln!(out, "  Number of false negatives: {}", genome.missed())?;
    writeln!(out, "  Number of matches with wrong ref/alt: {}", genome.wrong_ref_alt())?;
    writeln!(out, "  Number of matches with wrong genotype: {}", genome.wrong_phasing())?;
    writeln!(out)?;
    writeln!(out, "Phasing accuracy:")?;
    write_breakdown(out, "Homozygous", &genome.homozygous_breakdown())?;
    writeln!(out)?;
    write_breakdown(out, "Heterozygous", &genome.heterozygous_breakdown())?;
    writeln!(out)?;
    writeln!(out, "  Switch error rate: {}", format_switch_error(genome.switch_error()))
}

/// Writes the full report: per-chromosome sections in plain string order, then the genome-wide
/// rollup. The BTreeMap iteration order is the report order, deliberately lexicographic.
pub fn write_accuracy_report(
    out: &mut impl Write, chrom_stats: &BTreeMap<String, ChromosomeStats>, genome: &GenomeStats
) -> std::io::Result<()> {
    for (chrom, stats) in chrom_stats.iter() {
        write_chromosome_section(out, chrom, stats)?;
    }
    write_genome_section(out, genome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_text(chrom_stats: &BTreeMap<String, ChromosomeStats>) -> String {
        let genome = GenomeStats::from_chromosome_stats(chrom_stats);
        let mut buffer = vec![];
        write_accuracy_report(&mut buffer, chrom_stats, &genome).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_empty_report_is_undefined() {
        let text = report_text(&BTreeMap::new());
        assert!(text.contains("Total count in ground truth: 0"));
        assert!(text.contains("Switch error rate: 0 out of 0 = undefined"));
        assert!(!text.contains("NaN"));
    }

    #[test]
    fn test_chromosome_sections_in_string_order() {
        let mut chrom_stats: BTreeMap<String, ChromosomeStats> = Default::default();
        for chrom in ["chr2", "chr10", "chr1"] {
            let mut stats = ChromosomeStats::default();
            stats.record_missed(GenotypeCall::HomozygousAlternate);
            chrom_stats.insert(chrom.to_string(), stats);
        }
        let text = report_text(&chrom_stats);
        let chr1_at = text.find("Results for chr1\n").unwrap();
        let chr10_at = text.find("Results for chr10\n").unwrap();
        let chr2_at = text.find("Results for chr2\n").unwrap();
        // plain string ordering: chr1 < chr10 < chr2
        assert!(chr1_at < chr10_at);
        assert!(chr10_at < chr2_at);
    }

    #[test]
    fn test_switch_error_line() {
        let mut stats = ChromosomeStats::default();
        for _ in 0..3 {
            stats.record_genotype_match(GenotypeCall::PhasedAltRef, GenotypeCall::PhasedAltRef);
        }
        stats.record_genotype_match(GenotypeCall::PhasedRefAlt, GenotypeCall::PhasedAltRef);
        let chrom_stats: BTreeMap<String, ChromosomeStats> = [("chr1".to_string(), stats)].into_iter().collect();
        let text = report_text(&chrom_stats);
        // bits 1,1,1,0 => one switch over three pairs
        assert!(text.contains("Switch error rate: 1 out of 3 ="));
    }

    #[test]
    fn test_confusion_matrix_rows() {
        let mut stats = ChromosomeStats::default();
        stats.record_genotype_match(GenotypeCall::HomozygousAlternate, GenotypeCall::HomozygousAlternate);
        let chrom_stats: BTreeMap<String, ChromosomeStats> = [("chr1".to_string(), stats)].into_iter().collect();
        let text = report_text(&chrom_stats);
        assert!(text.contains("ungenotyped, 0|0, 0|1, 1|0, 1|1"));
        // the hom-alt row ends with a 1 in the last column
        assert!(text.contains("0 0 0 0 1"));
    }
}
