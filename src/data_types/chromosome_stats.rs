
use itertools::Itertools;
use std::ops::AddAssign;

use crate::data_types::genotype::{GenotypeCall, NUM_GENOTYPE_CALLS};

/// Switch error tally for one or more chromosomes
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SwitchError {
    /// Number of adjacent phase-bit pairs that disagree
    pub switches: u64,
    /// Total number of adjacent phase-bit pairs
    pub pairs: u64
}

impl AddAssign for SwitchError {
    // Enables += when rolling up chromosomes
    fn add_assign(&mut self, rhs: Self) {
        self.switches += rhs.switches;
        self.pairs += rhs.pairs;
    }
}

impl SwitchError {
    /// The switch error rate, or None when fewer than two qualifying phased matches exist.
    /// Callers must handle the None explicitly; we never report a NaN.
    pub fn rate(&self) -> Option<f64> {
        if self.pairs > 0 {
            Some(self.switches as f64 / self.pairs as f64)
        } else {
            None
        }
    }
}

/// Accuracy tracking for a single chromosome.
/// Built up by the reconciliation scan and read-only afterwards.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ChromosomeStats {
    /// Called variants with no truth counterpart
    false_positives: u64,
    /// Truth variants with no called counterpart
    missed: u64,
    /// Matched positions where REF and/or ALT disagree
    wrong_ref_alt: u64,
    /// Matched positions where the genotype disagrees
    wrong_phasing: u64,
    /// Total truth variants observed (matched + allele-mismatched + missed)
    total_truth: u64,
    /// Confusion matrix for genotype calls; rows are truth and columns are calls
    confusion: [[u64; NUM_GENOTYPE_CALLS]; NUM_GENOTYPE_CALLS],
    /// How many truth calls of each genotype went uncalled or allele-mismatched
    missed_by_genotype: [u64; NUM_GENOTYPE_CALLS],
    /// Append-only phase agreement bits, strictly in position order; true = orientation agrees.
    /// Only matched, allele-agreeing, both-phased-het positions contribute a bit.
    phase_bits: Vec<bool>
}

impl ChromosomeStats {
    /// Records a called variant that has no truth counterpart
    pub fn record_false_positive(&mut self) {
        self.false_positives += 1;
    }

    /// Records a truth variant that has no called counterpart
    pub fn record_missed(&mut self, truth_genotype: GenotypeCall) {
        self.missed += 1;
        self.missed_by_genotype[truth_genotype.matrix_index()] += 1;
        self.total_truth += 1;
    }

    /// Records a position match where the REF and/or ALT alleles disagree.
    /// The truth genotype still counts into the missed histogram (effectively an uncalled truth
    /// genotype), but separately from `missed`.
    pub fn record_allele_mismatch(&mut self, truth_genotype: GenotypeCall) {
        self.wrong_ref_alt += 1;
        self.missed_by_genotype[truth_genotype.matrix_index()] += 1;
        self.total_truth += 1;
    }

    /// Records a position match with agreeing alleles, comparing the genotype calls.
    /// Appends a phase bit when both calls are phased heterozygous: true when the orientations
    /// agree and false when they are flipped.
    pub fn record_genotype_match(&mut self, truth_genotype: GenotypeCall, called_genotype: GenotypeCall) {
        if truth_genotype != called_genotype {
            self.wrong_phasing += 1;
        }
        self.confusion[truth_genotype.matrix_index()][called_genotype.matrix_index()] += 1;

        if truth_genotype.is_phased_het() && called_genotype.is_phased_het() {
            self.phase_bits.push(truth_genotype == called_genotype);
        }

        self.total_truth += 1;
    }

    /// Scans the phase bits once and counts adjacent pairs that flip orientation
    pub fn switch_error(&self) -> SwitchError {
        let switches = self.phase_bits.iter()
            .tuple_windows()
            .filter(|(current, next)| current != next)
            .count() as u64;
        SwitchError {
            switches,
            pairs: self.phase_bits.len().saturating_sub(1) as u64
        }
    }

    // getters
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

    pub fn total_truth(&self) -> u64 {
        self.total_truth
    }

    pub fn confusion(&self) -> &[[u64; NUM_GENOTYPE_CALLS]; NUM_GENOTYPE_CALLS] {
        &self.confusion
    }

    pub fn missed_by_genotype(&self) -> &[u64; NUM_GENOTYPE_CALLS] {
        &self.missed_by_genotype
    }

    pub fn phase_bits(&self) -> &[bool] {
        &self.phase_bits
    }
}
