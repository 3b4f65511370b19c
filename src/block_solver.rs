
use derive_builder::Builder;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::parsing::phase_blocks::BlockSpan;

/// Configuration for the phase-block interval filtering
#[derive(Builder, Clone, Copy, Debug)]
#[builder(default)]
pub struct BlockFilterConfig {
    /// Chromosomes with names longer than this are dropped (filters alt contigs / scaffolds)
    pub max_chrom_name_len: usize,
    /// If true, a (length, length+1) sentinel interval is appended for known chromosomes
    pub append_length_sentinel: bool
}

impl Default for BlockFilterConfig {
    fn default() -> Self {
        Self {
            max_chrom_name_len: 5,
            append_length_sentinel: true
        }
    }
}

/// Chromosome name with a numeric-aware ordering for plotting output:
/// "chr" + number names come first, ordered by number; everything else follows lexicographically.
/// This is deliberately different from the plain string ordering the accuracy engine uses.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChromName(pub String);

impl ChromName {
    /// The chromosome number when the name is "chr" followed by only digits
    fn numeric_suffix(&self) -> Option<u64> {
        self.0.strip_prefix("chr")
            .and_then(|suffix| suffix.parse().ok())
    }
}

impl Ord for ChromName {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric_suffix(), other.numeric_suffix()) {
            // the string tie-break keeps Ord consistent with Eq for oddities like "chr01" vs "chr1"
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0)
        }
    }
}

impl PartialOrd for ChromName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Bins block spans by chromosome and reduces each bin to a sorted, non-overlapping interval
/// list ready for plotting: a sentinel interval at the chromosome length marks the end of the
/// axis, and any interval fully contained in an earlier one (under start-then-end order) is
/// dropped.
/// # Arguments
/// * `spans` - the phase block spans, in any order
/// * `chrom_lengths` - chromosome name to length lookup
/// * `config` - filtering options
pub fn merge_block_intervals(
    spans: &[BlockSpan], chrom_lengths: &FxHashMap<String, u64>, config: BlockFilterConfig
) -> BTreeMap<ChromName, Vec<(u64, u64)>> {
    let mut by_chrom: BTreeMap<ChromName, Vec<(u64, u64)>> = Default::default();
    for span in spans {
        by_chrom.entry(ChromName(span.chrom.clone()))
            .or_default()
            .push((span.start, span.end));
    }

    let mut results: BTreeMap<ChromName, Vec<(u64, u64)>> = Default::default();
    for (chrom, mut intervals) in by_chrom {
        if chrom.0.len() > config.max_chrom_name_len {
            continue;
        }
        if config.append_length_sentinel {
            if let Some(&length) = chrom_lengths.get(&chrom.0) {
                intervals.push((length, length + 1));
            }
        }

        intervals.sort_unstable();
        results.insert(chrom, filter_contained(intervals));
    }
    results
}

/// Removes intervals that are entirely contained in a previously kept one.
/// Assumes the input is sorted by (start, end); an interval survives only if it extends past
/// the running maximum end.
fn filter_contained(intervals: Vec<(u64, u64)>) -> Vec<(u64, u64)> {
    let mut kept: Vec<(u64, u64)> = vec![];
    let mut max_end: Option<u64> = None;
    for (start, end) in intervals {
        if max_end.is_some_and(|m| end <= m) {
            continue;
        }
        kept.push((start, end));
        max_end = Some(end);
    }
    kept
}
