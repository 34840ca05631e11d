
/// Contains one assay run and its call set
pub mod analysis;
/// Contains the pair-classification labels, tallies, and verdicts
pub mod concordance_metrics;
/// Contains the two-allele call value type
pub mod genotype_call;
/// Contains the tracked sample and its status
pub mod sample;
/// Contains the result aggregates surfaced to callers
pub mod sample_detail;
