
/// Pairwise call comparison, tallying, and the threshold checks
pub mod concordance;
/// Contains various shared data types
pub mod data_types;
/// Population scan for concordant identity matches
pub mod match_finder;
/// Cross-source sex concordance check
pub mod sex_check;
/// Computes and stores per-sample verdicts, plus plate-level tallies
pub mod status_engine;
