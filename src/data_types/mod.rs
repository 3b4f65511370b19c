
/// Per-chromosome accuracy accumulator and the switch error tally
pub mod chromosome_stats;
/// Genome-wide rollup of the per-chromosome stats plus derived breakdowns
pub mod genome_stats;
/// Genotype call states and the confusion matrix index mapping
pub mod genotype;
/// Small variant records and their merge-scan ordering
pub mod variants;
