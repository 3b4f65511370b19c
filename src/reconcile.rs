
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::data_types::chromosome_stats::ChromosomeStats;
use crate::data_types::variants::SmallVariant;
use crate::util::progress_bar::get_progress_style;

/// Reconciles a called variant set against a truth set, producing per-chromosome accuracy stats.
/// Both inputs are sorted here (sorting is a correctness-restoring normalization), then each
/// chromosome is scanned independently; classification only ever depends on position order
/// within a chromosome, so the per-chromosome scans are equivalent to one global merge-scan.
/// # Arguments
/// * `truth_variants` - the ground-truth variant set
/// * `called_variants` - the variant set under evaluation
pub fn reconcile_variants(
    mut truth_variants: Vec<SmallVariant>, mut called_variants: Vec<SmallVariant>
) -> BTreeMap<String, ChromosomeStats> {
    truth_variants.sort_by(SmallVariant::cmp_locus);
    called_variants.sort_by(SmallVariant::cmp_locus);

    // pair up the per-chromosome runs from both inputs; either side of a pair can be absent
    let truth_runs = chromosome_runs(&truth_variants);
    let called_runs = chromosome_runs(&called_variants);
    let mut paired_runs: BTreeMap<&str, (&[SmallVariant], &[SmallVariant])> = Default::default();
    for (chrom, run) in truth_runs {
        paired_runs.entry(chrom).or_insert((&[], &[])).0 = run;
    }
    for (chrom, run) in called_runs {
        paired_runs.entry(chrom).or_insert((&[], &[])).1 = run;
    }

    // chromosomes are independent, scan them in parallel
    let style = get_progress_style();
    let paired_runs: Vec<(&str, (&[SmallVariant], &[SmallVariant]))> = paired_runs.into_iter().collect();
    paired_runs.into_par_iter()
        .map(|(chrom, (truth_run, called_run))| {
            (chrom.to_string(), scan_chromosome(truth_run, called_run))
        })
        .progress_with_style(style)
        .collect()
}

/// Splits a locus-sorted variant slice into its per-chromosome runs, preserving order
fn chromosome_runs(variants: &[SmallVariant]) -> Vec<(&str, &[SmallVariant])> {
    let mut runs: Vec<(&str, &[SmallVariant])> = vec![];
    let mut run_start = 0;
    for (index, variant) in variants.iter().enumerate() {
        if variant.chrom() != variants[run_start].chrom() {
            runs.push((variants[run_start].chrom(), &variants[run_start..index]));
            run_start = index;
        }
    }
    if run_start < variants.len() {
        runs.push((variants[run_start].chrom(), &variants[run_start..]));
    }
    runs
}

/// The two-cursor merge-scan over one chromosome.
/// Every record is classified into exactly one of {false positive, missed, matched}:
/// an unmatched called record is a false positive, an unmatched truth record is missed, and
/// the first equal-position pair is a match that consumes both cursors regardless of alleles.
/// # Arguments
/// * `truth_run` - position-sorted truth variants for this chromosome
/// * `called_run` - position-sorted called variants for this chromosome
fn scan_chromosome(truth_run: &[SmallVariant], called_run: &[SmallVariant]) -> ChromosomeStats {
    let mut stats = ChromosomeStats::default();
    let mut truth_index = 0;
    let mut called_index = 0;
    while truth_index < truth_run.len() || called_index < called_run.len() {
        if truth_index == truth_run.len() {
            // truth is exhausted, everything left in the callset is a false positive
            stats.record_false_positive();
            called_index += 1;
        } else if called_index == called_run.len() {
            // callset is exhausted, everything left in truth was missed
            stats.record_missed(truth_run[truth_index].genotype());
            truth_index += 1;
        } else {
            let truth = &truth_run[truth_index];
            let called = &called_run[called_index];
            match called.cmp_locus(truth) {
                Ordering::Less => {
                    // called variant has no truth counterpart at this position
                    stats.record_false_positive();
                    called_index += 1;
                },
                Ordering::Greater => {
                    // truth variant has no called counterpart at this position
                    stats.record_missed(truth.genotype());
                    truth_index += 1;
                },
                Ordering::Equal => {
                    if called.same_alleles(truth) {
                        stats.record_genotype_match(truth.genotype(), called.genotype());
                    } else {
                        stats.record_allele_mismatch(truth.genotype());
                    }
                    truth_index += 1;
                    called_index += 1;
                }
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data_types::chromosome_stats::SwitchError;
    use crate::data_types::genotype::GenotypeCall;

    /// Shorthand test constructor with a raw GT token
    fn variant(chrom: &str, position: u64, ref_allele: &str, alt_allele: &str, gt_token: &str) -> SmallVariant {
        SmallVariant::new(
            chrom.to_string(), position,
            ref_allele.to_string(), alt_allele.to_string(),
            GenotypeCall::from_gt_token(gt_token)
        )
    }

    #[test]
    fn test_exact_phased_match() {
        // single matching phased het: one confusion cell, no wrong phasing, one phase bit
        let truth = vec![variant("chr1", 100, "A", "G", "1|0")];
        let called = vec![variant("chr1", 100, "A", "G", "1|0")];
        let results = reconcile_variants(truth, called);

        let stats = &results["chr1"];
        assert_eq!(stats.total_truth(), 1);
        assert_eq!(stats.wrong_phasing(), 0);
        assert_eq!(stats.missed(), 0);
        assert_eq!(stats.false_positives(), 0);
        assert_eq!(stats.confusion()[3][3], 1);
        assert_eq!(stats.phase_bits(), &[true]);
    }

    #[test]
    fn test_missed_and_false_positive() {
        // truth-only position is missed, called-only position is a false positive
        let truth = vec![variant("chr1", 100, "A", "G", "1|1")];
        let called = vec![variant("chr1", 200, "C", "T", "0|1")];
        let results = reconcile_variants(truth, called);

        let stats = &results["chr1"];
        assert_eq!(stats.missed(), 1);
        assert_eq!(stats.missed_by_genotype()[GenotypeCall::HomozygousAlternate.matrix_index()], 1);
        assert_eq!(stats.false_positives(), 1);
        assert_eq!(stats.total_truth(), 1);
        assert_eq!(stats.confusion().iter().flatten().sum::<u64>(), 0);
    }

    #[test]
    fn test_phase_flip() {
        let truth = vec![variant("chr1", 100, "A", "G", "0|1")];
        let called = vec![variant("chr1", 100, "A", "G", "1|0")];
        let results = reconcile_variants(truth, called);

        let stats = &results["chr1"];
        assert_eq!(stats.wrong_phasing(), 1);
        assert_eq!(stats.confusion()[2][3], 1);
        assert_eq!(stats.phase_bits(), &[false]);
    }

    #[test]
    fn test_allele_mismatch() {
        // same locus with different alleles is a match that consumes both cursors,
        // recorded as wrong ref/alt rather than a miss + false positive
        let truth = vec![variant("chr1", 100, "A", "G", "0|1")];
        let called = vec![variant("chr1", 100, "A", "T", "0|1")];
        let results = reconcile_variants(truth, called);

        let stats = &results["chr1"];
        assert_eq!(stats.wrong_ref_alt(), 1);
        assert_eq!(stats.missed(), 0);
        assert_eq!(stats.false_positives(), 0);
        assert_eq!(stats.missed_by_genotype()[GenotypeCall::PhasedRefAlt.matrix_index()], 1);
        assert_eq!(stats.total_truth(), 1);
        assert!(stats.phase_bits().is_empty());
    }

    #[test]
    fn test_allele_case_insensitive() {
        let truth = vec![variant("chr1", 100, "a", "g", "1|1")];
        let called = vec![variant("chr1", 100, "A", "G", "1|1")];
        let results = reconcile_variants(truth, called);
        assert_eq!(results["chr1"].wrong_ref_alt(), 0);
        assert_eq!(results["chr1"].confusion()[4][4], 1);
    }

    #[test]
    fn test_consecutive_phased_matches() {
        // two correct 1|0 calls in a row: phase bits "11", zero switches over one pair
        let truth = vec![
            variant("chr1", 100, "A", "G", "1|0"),
            variant("chr1", 200, "C", "T", "1|0")
        ];
        let called = truth.clone();
        let results = reconcile_variants(truth, called);
        assert_eq!(results["chr1"].phase_bits(), &[true, true]);
        assert_eq!(results["chr1"].switch_error(), SwitchError { switches: 0, pairs: 1 });
    }

    #[test]
    fn test_empty_inputs() {
        let results = reconcile_variants(vec![], vec![]);
        assert!(results.is_empty());
    }

    #[test]
    fn test_conservation_laws() {
        let truth = vec![
            variant("chr1", 100, "A", "G", "0|1"),
            variant("chr1", 300, "C", "T", "1|1"),
            variant("chr2", 50, "G", "A", "1/0"),
            variant("chr2", 75, "T", "C", "0|1")
        ];
        let called = vec![
            variant("chr1", 100, "A", "G", "0|1"),
            variant("chr1", 200, "G", "C", "1|0"),
            variant("chr2", 75, "T", "C", "0|1"),
            variant("chr2", 90, "A", "T", "1|1")
        ];
        let num_truth = truth.len() as u64;
        let num_called = called.len() as u64;
        let results = reconcile_variants(truth, called);

        // every record lands in exactly one bucket
        let matched: u64 = results.values()
            .map(|s| s.confusion().iter().flatten().sum::<u64>() + s.wrong_ref_alt())
            .sum();
        let missed: u64 = results.values().map(|s| s.missed()).sum();
        let false_positives: u64 = results.values().map(|s| s.false_positives()).sum();
        assert_eq!(num_truth, matched + missed);
        assert_eq!(num_called, matched + false_positives);

        // truth count is matched + missed, independent of the callset
        let total_truth: u64 = results.values().map(|s| s.total_truth()).sum();
        assert_eq!(total_truth, num_truth);
    }

    #[test]
    fn test_input_order_independence() {
        // pre-sort order of the inputs must not matter, sorting normalizes it
        let truth_sorted = vec![
            variant("chr1", 100, "A", "G", "0|1"),
            variant("chr1", 200, "C", "T", "1|0"),
            variant("chr2", 50, "G", "A", "1|1")
        ];
        let called_sorted = vec![
            variant("chr1", 100, "A", "G", "1|0"),
            variant("chr1", 200, "C", "T", "1|0"),
            variant("chr2", 50, "G", "A", "1|1")
        ];
        let mut truth_shuffled = truth_sorted.clone();
        truth_shuffled.reverse();
        let mut called_shuffled = called_sorted.clone();
        called_shuffled.rotate_left(1);

        let baseline = reconcile_variants(truth_sorted, called_sorted);
        let shuffled = reconcile_variants(truth_shuffled, called_shuffled);
        assert_eq!(baseline, shuffled);
    }

    #[test]
    fn test_chromosomes_stay_separate() {
        // same positions on different chromosomes never match each other
        let truth = vec![variant("chrA", 100, "A", "G", "1|1")];
        let called = vec![variant("chrB", 100, "A", "G", "1|1")];
        let results = reconcile_variants(truth, called);
        assert_eq!(results["chrA"].missed(), 1);
        assert_eq!(results["chrB"].false_positives(), 1);
        assert_eq!(results["chrA"].total_truth(), 1);
        assert_eq!(results["chrB"].total_truth(), 0);
    }

    #[test]
    fn test_switch_error_across_positions() {
        // truth 1|0,1|0,1|0 called 1|0,0|1,1|0 => bits 1,0,1 => 2 switches over 2 pairs
        let truth = vec![
            variant("chr1", 100, "A", "G", "1|0"),
            variant("chr1", 200, "C", "T", "1|0"),
            variant("chr1", 300, "G", "A", "1|0")
        ];
        let called = vec![
            variant("chr1", 100, "A", "G", "1|0"),
            variant("chr1", 200, "C", "T", "0|1"),
            variant("chr1", 300, "G", "A", "1|0")
        ];
        let results = reconcile_variants(truth, called);
        assert_eq!(results["chr1"].phase_bits(), &[true, false, true]);
        assert_eq!(results["chr1"].switch_error(), SwitchError { switches: 2, pairs: 2 });
        assert_eq!(results["chr1"].wrong_phasing(), 1);
    }
}
