
use std::collections::BTreeMap;

use crate::data_types::chromosome_stats::{ChromosomeStats, SwitchError};
use crate::data_types::genotype::{GenotypeCall, NUM_GENOTYPE_CALLS};

/// Genome-wide rollup of the per-chromosome accuracy stats.
/// This is a pure reduction; the result is independent of chromosome iteration order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GenomeStats {
    /// Summed switch error numerator/denominator
    switch_error: SwitchError,
    /// Element-wise sum of the per-chromosome confusion matrices
    confusion: [[u64; NUM_GENOTYPE_CALLS]; NUM_GENOTYPE_CALLS],
    /// Element-wise sum of the missed-by-genotype histograms
    missed_by_genotype: [u64; NUM_GENOTYPE_CALLS],
    /// Summed truth counts
    total_truth: u64,
    /// Summed false positives
    false_positives: u64,
    /// Summed missed truth variants
    missed: u64,
    /// Summed allele mismatches
    wrong_ref_alt: u64,
    /// Summed genotype mismatches
    wrong_phasing: u64
}

/// Describes how a set of truth genotypes was ultimately called
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PhasingBreakdown {
    /// Total truth variants in the group, including uncalled ones
    pub truth_total: u64,
    /// Called homozygous alternate
    pub called_homozygous: u64,
    /// Called as a phased heterozygous (either orientation)
    pub called_phased_het: u64,
    /// Called as an unphased heterozygous
    pub called_unphased_het: u64,
    /// Called as homozygous reference
    pub called_homozygous_ref: u64,
    /// Missed entirely or called with the wrong alleles
    pub not_called: u64
}

impl GenomeStats {
    /// Folds all per-chromosome stats into genome-wide totals
    pub fn from_chromosome_stats(chrom_stats: &BTreeMap<String, ChromosomeStats>) -> Self {
        let mut result = Self::default();
        for stats in chrom_stats.values() {
            result.switch_error += stats.switch_error();
            for (total_row, row) in result.confusion.iter_mut().zip(stats.confusion().iter()) {
                for (total_cell, cell) in total_row.iter_mut().zip(row.iter()) {
                    *total_cell += cell;
                }
            }
            for (total_missed, missed) in result.missed_by_genotype.iter_mut().zip(stats.missed_by_genotype().iter()) {
                *total_missed += missed;
            }
            result.total_truth += stats.total_truth();
            result.false_positives += stats.false_positives();
            result.missed += stats.missed();
            result.wrong_ref_alt += stats.wrong_ref_alt();
            result.wrong_phasing += stats.wrong_phasing();
        }
        result
    }

    /// Sums one truth row of the confusion matrix
    fn row_total(&self, truth_genotype: GenotypeCall) -> u64 {
        self.confusion[truth_genotype.matrix_index()].iter().sum()
    }

    /// Convenience lookup into the summed confusion matrix
    fn cell(&self, truth_genotype: GenotypeCall, called_genotype: GenotypeCall) -> u64 {
        self.confusion[truth_genotype.matrix_index()][called_genotype.matrix_index()]
    }

    /// Breakdown for the homozygous-alternate truth variants
    pub fn homozygous_breakdown(&self) -> PhasingBreakdown {
        let truth = GenotypeCall::HomozygousAlternate;
        let not_called = self.missed_by_genotype[truth.matrix_index()];
        PhasingBreakdown {
            truth_total: self.row_total(truth) + not_called,
            called_homozygous: self.cell(truth, GenotypeCall::HomozygousAlternate),
            called_phased_het: self.cell(truth, GenotypeCall::PhasedRefAlt) + self.cell(truth, GenotypeCall::PhasedAltRef),
            called_unphased_het: self.cell(truth, GenotypeCall::UnphasedHet),
            called_homozygous_ref: self.cell(truth, GenotypeCall::HomozygousReference),
            not_called
        }
    }

    /// Breakdown for the phased heterozygous truth variants (both orientations combined)
    pub fn heterozygous_breakdown(&self) -> PhasingBreakdown {
        let truth_rows = [GenotypeCall::PhasedRefAlt, GenotypeCall::PhasedAltRef];
        let mut breakdown = PhasingBreakdown::default();
        for truth in truth_rows {
            breakdown.not_called += self.missed_by_genotype[truth.matrix_index()];
            breakdown.truth_total += self.row_total(truth);
            breakdown.called_homozygous += self.cell(truth, GenotypeCall::HomozygousAlternate);
            breakdown.called_phased_het += self.cell(truth, GenotypeCall::PhasedRefAlt) + self.cell(truth, GenotypeCall::PhasedAltRef);
            breakdown.called_unphased_het += self.cell(truth, GenotypeCall::UnphasedHet);
            breakdown.called_homozygous_ref += self.cell(truth, GenotypeCall::HomozygousReference);
        }
        breakdown.truth_total += breakdown.not_called;
        breakdown
    }

    // getters
    pub fn switch_error(&self) -> SwitchError {
        self.switch_error
    }

    pub fn confusion(&self) -> &[[u64; NUM_GENOTYPE_CALLS]; NUM_GENOTYPE_CALLS] {
        &self.confusion
    }

    pub fn missed_by_genotype(&self) -> &[u64; NUM_GENOTYPE_CALLS] {
        &self.missed_by_genotype
    }

    pub fn total_truth(&self) -> u64 {
        self.total_truth
    }

    pub fn false_positives(&self) -> u64 {
        self.false_positives
    }

    pub fn missed(&self) -> u64 {
        self.missed
    }

    pub fn wrong_ref_alt(&self) -> u64 {
        self.wrong_ref_alt
    }

    pub fn wrong_phasing(&self) -> u64 {
        self.wrong_phasing
    }
}
