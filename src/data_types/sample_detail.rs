
use serde::Serialize;

use crate::data_types::concordance_metrics::{ConcordanceCounts, Verdict};
use crate::data_types::sample::SampleStatus;

/// Full per-sample check detail surfaced to callers
#[derive(Clone, Debug, Serialize)]
pub struct SampleDetail {
    /// Tally over the compared marker panel
    pub counts: ConcordanceCounts,
    /// Sex concordance verdict across the three sources
    pub sex: Verdict,
    /// SNP concordance verdict
    pub snps: Verdict,
    /// No-call rate verdict
    pub nocalls: Verdict,
    /// Marker ids whose pairs mismatched, in genotype-run order
    pub failed_snps: Vec<String>,
    /// Set when the two runs did not carry the same set of markers
    pub marker_count_mismatch: bool
}

impl SampleDetail {
    /// True only when every individual verdict passed
    pub fn is_pass(&self) -> bool {
        self.sex == Verdict::Pass && self.snps == Verdict::Pass && self.nocalls == Verdict::Pass
    }
}

/// One qualifying candidate from a population match scan
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchResult {
    /// Sample id of the matching candidate
    pub sample_id: String,
    /// Tally over the markers shared with the query
    pub counts: ConcordanceCounts
}

/// Status tallies across one plate batch of samples
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct PlateSummary {
    /// Samples whose derived status is Pass
    pub passed: u64,
    /// Samples whose derived status is Fail
    pub failed: u64,
    /// Samples cancelled by an operator
    pub cancelled: u64,
    /// Samples with no derived status yet
    pub unset: u64
}

impl PlateSummary {
    /// Adds one sample's status to the tally
    pub fn record(&mut self, status: Option<SampleStatus>) {
        match status {
            Some(SampleStatus::Pass) => self.passed += 1,
            Some(SampleStatus::Fail) => self.failed += 1,
            Some(SampleStatus::Cancel) => self.cancelled += 1,
            None => self.unset += 1
        }
    }

    /// Total samples tallied
    pub fn total(&self) -> u64 {
        self.passed + self.failed + self.cancelled + self.unset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pass() {
        let mut detail = SampleDetail {
            counts: ConcordanceCounts::new(40, 0, 2),
            sex: Verdict::Pass,
            snps: Verdict::Pass,
            nocalls: Verdict::Pass,
            failed_snps: vec![],
            marker_count_mismatch: false
        };
        assert!(detail.is_pass());

        // any single failing verdict fails the sample
        detail.nocalls = Verdict::Fail;
        assert!(!detail.is_pass());
    }

    #[test]
    fn test_plate_summary_record() {
        let mut summary = PlateSummary::default();
        summary.record(Some(SampleStatus::Pass));
        summary.record(Some(SampleStatus::Pass));
        summary.record(Some(SampleStatus::Fail));
        summary.record(Some(SampleStatus::Cancel));
        summary.record(None);

        assert_eq!(summary, PlateSummary { passed: 2, failed: 1, cancelled: 1, unset: 1 });
        assert_eq!(summary.total(), 5);
    }

    #[test]
    fn test_detail_serialization() {
        let detail = SampleDetail {
            counts: ConcordanceCounts::new(38, 1, 2),
            sex: Verdict::Pass,
            snps: Verdict::Pass,
            nocalls: Verdict::Fail,
            failed_snps: vec!["rs99".to_string()],
            marker_count_mismatch: false
        };

        // field names are a contract with the reporting layer
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["counts"]["matches"], 38);
        assert_eq!(value["sex"], "Pass");
        assert_eq!(value["nocalls"], "Fail");
        assert_eq!(value["failed_snps"][0], "rs99");
        assert_eq!(value["marker_count_mismatch"], false);
    }
}
