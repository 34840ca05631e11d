
use derive_builder::Builder;
use log::trace;
use rustc_hash::FxHashMap as HashMap;

use crate::data_types::analysis::Analysis;
use crate::data_types::concordance_metrics::{ConcordanceCounts, ConcordanceLabel, Verdict};
use crate::data_types::genotype_call::GenotypeCall;

/// How calls from two runs are matched up before comparison
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PairingMode {
    /// Pair by list position; runs of differing length truncate at the shorter one
    #[default]
    Positional,
    /// Pair by marker id; markers present on only one side are skipped
    ByMarker
}

/// Thresholds and pairing behavior for the concordance checks
#[derive(Builder, Clone, Copy, Debug)]
#[builder(default)]
pub struct ConcordanceConfig {
    /// Minimum matching pairs for the SNP check to pass
    min_matches: u64,
    /// Maximum mismatching pairs for the SNP check to pass
    max_mismatch: u64,
    /// Maximum unknown pairs for the no-call check to pass
    max_nocalls: u64,
    /// A population candidate qualifies when matches + unknowns exceed this
    min_batch_match: u64,
    /// How calls are paired between the two runs
    pairing_mode: PairingMode
}

impl Default for ConcordanceConfig {
    fn default() -> Self {
        // production thresholds for the full marker panel
        // tests and small panels will want to tighten these through the builder
        Self {
            min_matches: 35,
            max_mismatch: 3,
            max_nocalls: 15,
            min_batch_match: 40,
            pairing_mode: PairingMode::Positional
        }
    }
}

impl ConcordanceConfig {
    // getters
    pub fn min_matches(&self) -> u64 {
        self.min_matches
    }

    pub fn max_mismatch(&self) -> u64 {
        self.max_mismatch
    }

    pub fn max_nocalls(&self) -> u64 {
        self.max_nocalls
    }

    pub fn min_batch_match(&self) -> u64 {
        self.min_batch_match
    }

    pub fn pairing_mode(&self) -> PairingMode {
        self.pairing_mode
    }
}

/// Classifies a pair of calls believed to represent the same marker.
/// This is pure allele comparison; ensuring both calls reference the same marker
/// is the caller's responsibility.
/// # Arguments
/// * `first` - the call from one run
/// * `second` - the call for the same marker from the other run
pub fn compare_calls(first: &GenotypeCall, second: &GenotypeCall) -> ConcordanceLabel {
    if first.is_no_call() || second.is_no_call() {
        ConcordanceLabel::Unknown
    } else if first.alleles() == second.alleles() {
        ConcordanceLabel::Match
    } else {
        ConcordanceLabel::Mismatch
    }
}

/// Result of comparing one run's calls against another's, before sex is considered
#[derive(Clone, Debug)]
pub struct AnalysisConcordance {
    /// Tally over the compared pairs
    pub counts: ConcordanceCounts,
    /// SNP concordance verdict from the match/mismatch thresholds
    pub snps: Verdict,
    /// No-call verdict from the unknown threshold
    pub nocalls: Verdict,
    /// Marker ids of mismatching pairs, in first-run order
    pub failed_snps: Vec<String>,
    /// Set when the two runs did not carry the same set of markers
    pub marker_count_mismatch: bool
}

/// Compares the calls of two runs for the same sample and applies the threshold checks.
/// The first analysis is conventionally the genotype run; failed marker ids are drawn from it.
/// # Arguments
/// * `first` - the run whose marker ids label the output
/// * `second` - the run compared against it
/// * `config` - thresholds and pairing behavior
pub fn compare_analyses(first: &Analysis, second: &Analysis, config: &ConcordanceConfig) -> AnalysisConcordance {
    let mut counts = ConcordanceCounts::default();
    let mut failed_snps: Vec<String> = vec![];
    let marker_count_mismatch: bool;

    match config.pairing_mode {
        PairingMode::Positional => {
            // zip truncates at the shorter run, so flag any length difference up front
            marker_count_mismatch = first.call_count() != second.call_count();

            for (first_call, second_call) in first.calls().values().zip(second.calls().values()) {
                let label = compare_calls(first_call, second_call);
                trace!("{} vs {}: {}", first_call.marker_id(), second_call.marker_id(), label.as_ref());
                counts.record(label);
                if label == ConcordanceLabel::Mismatch {
                    failed_snps.push(first_call.marker_id().to_string());
                }
            }
        },
        PairingMode::ByMarker => {
            let second_lookup: HashMap<&str, &GenotypeCall> = second.calls().values()
                .map(|call| (call.marker_id(), call))
                .collect();

            let mut shared_markers: usize = 0;
            for first_call in first.calls().values() {
                let second_call = match second_lookup.get(first_call.marker_id()) {
                    Some(call) => *call,
                    None => continue
                };

                shared_markers += 1;
                let label = compare_calls(first_call, second_call);
                trace!("{}: {}", first_call.marker_id(), label.as_ref());
                counts.record(label);
                if label == ConcordanceLabel::Mismatch {
                    failed_snps.push(first_call.marker_id().to_string());
                }
            }

            // anything unshared on either side was skipped above
            marker_count_mismatch = shared_markers != first.call_count() || shared_markers != second.call_count();
        }
    };

    let snps = if counts.matches >= config.min_matches && counts.mismatches <= config.max_mismatch {
        Verdict::Pass
    } else {
        Verdict::Fail
    };
    let nocalls = if counts.unknowns <= config.max_nocalls {
        Verdict::Pass
    } else {
        Verdict::Fail
    };

    AnalysisConcordance {
        counts,
        snps,
        nocalls,
        failed_snps,
        marker_count_mismatch
    }
}
