
use serde::Serialize;
use std::ops::AddAssign;

/// Classification of one marker pair between two sources
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, strum_macros::AsRefStr, Serialize)]
pub enum ConcordanceLabel {
    /// Sorted allele pairs agree
    #[strum(serialize = "MATCH")]
    Match=0,
    /// Sorted allele pairs differ
    #[strum(serialize = "MISMATCH")]
    Mismatch,
    /// A failed read on either side makes the pair unclassifiable
    #[strum(serialize = "UNKNOWN")]
    Unknown
}

/// Pass/fail outcome of one concordance check
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::AsRefStr, Serialize)]
pub enum Verdict {
    #[strum(serialize = "PASS")]
    Pass,
    #[strum(serialize = "FAIL")]
    Fail
}

/// Tally of pair classifications over a marker panel
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ConcordanceCounts {
    /// Number of pairs classified as Match
    pub matches: u64,
    /// Number of pairs classified as Mismatch
    pub mismatches: u64,
    /// Number of pairs classified as Unknown
    pub unknowns: u64
}

impl AddAssign for ConcordanceCounts {
    // Enables += with tallies
    fn add_assign(&mut self, rhs: Self) {
        self.matches += rhs.matches;
        self.mismatches += rhs.mismatches;
        self.unknowns += rhs.unknowns;
    }
}

impl ConcordanceCounts {
    /// Constructor
    pub fn new(matches: u64, mismatches: u64, unknowns: u64) -> Self {
        Self {
            matches, mismatches, unknowns
        }
    }

    /// Adds one pair classification to the tally
    pub fn record(&mut self, label: ConcordanceLabel) {
        match label {
            ConcordanceLabel::Match => self.matches += 1,
            ConcordanceLabel::Mismatch => self.mismatches += 1,
            ConcordanceLabel::Unknown => self.unknowns += 1
        }
    }

    /// Total pairs classified
    pub fn total(&self) -> u64 {
        self.matches + self.mismatches + self.unknowns
    }

    /// Calculates the fraction of definite pairs that agree, if any pair was definite
    pub fn concordance_rate(&self) -> Option<f64> {
        let denom = self.matches + self.mismatches;
        if denom > 0 {
            Some(self.matches as f64 / denom as f64)
        } else {
            None
        }
    }

    /// Calculates the fraction of all pairs with a failed read, if anything was compared
    pub fn no_call_rate(&self) -> Option<f64> {
        let denom = self.total();
        if denom > 0 {
            Some(self.unknowns as f64 / denom as f64)
        } else {
            None
        }
    }
}
