
use log::debug;
use rayon::prelude::*;

use crate::concordance::{compare_calls, ConcordanceConfig};
use crate::data_types::analysis::Analysis;
use crate::data_types::concordance_metrics::ConcordanceCounts;
use crate::data_types::sample_detail::MatchResult;

/// Scans a candidate population for runs whose calls concord with a query run.
/// This is the sample-swap / identity check: the population is typically every run of
/// one type in a date range, supplied by the caller with the query sample excluded.
///
/// Each candidate is paired with the query positionally and tallied; a candidate
/// qualifies when its matches plus unknowns strictly exceed the configured minimum,
/// a looser bar than the per-sample concordance check.
/// Candidates with no sample association are skipped; a result could not name them.
/// Candidates are scanned in parallel and the output keeps the input order.
/// # Arguments
/// * `query` - the run under investigation
/// * `candidates` - the population to scan
/// * `config` - threshold configuration
pub fn find_population_matches(query: &Analysis, candidates: &[Analysis], config: &ConcordanceConfig) -> Vec<MatchResult> {
    let results: Vec<MatchResult> = candidates.par_iter()
        .filter_map(|candidate| {
            let sample_id = candidate.sample_id()?;
            let counts = tally_candidate(query, candidate);
            if counts.matches + counts.unknowns > config.min_batch_match() {
                Some(MatchResult {
                    sample_id: sample_id.to_string(),
                    counts
                })
            } else {
                None
            }
        })
        .collect();

    debug!("Population scan: {} of {} candidates qualified", results.len(), candidates.len());
    results
}

/// Pairs one candidate's calls with the query's positionally and tallies the labels
fn tally_candidate(query: &Analysis, candidate: &Analysis) -> ConcordanceCounts {
    let mut counts = ConcordanceCounts::default();
    for (query_call, candidate_call) in query.calls().values().zip(candidate.calls().values()) {
        counts.record(compare_calls(query_call, candidate_call));
    }
    counts
}

/// Orders match results by descending match count, for callers wanting a ranked report
pub fn rank_matches(mut results: Vec<MatchResult>) -> Vec<MatchResult> {
    results.sort_by(|a, b| b.counts.matches.cmp(&a.counts.matches));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concordance::ConcordanceConfigBuilder;
    use crate::data_types::analysis::{AnalysisType, Sex};
    use crate::data_types::genotype_call::GenotypeCall;

    /// Builds a sequence run whose first `matches` markers agree with the query panel,
    /// then `unknowns` no-call markers, with mismatches filling the rest of the panel.
    fn build_candidate(sample_id: &str, panel_size: usize, matches: usize, unknowns: usize) -> Analysis {
        let mut analysis = Analysis::new(AnalysisType::Sequence, Sex::Male, "vcf_export".to_string());
        analysis.assign_sample(sample_id.to_string());
        for index in 0..panel_size {
            let marker = format!("rs{index}");
            let call = if index < matches {
                GenotypeCall::new(marker, b'A', b'G').unwrap()
            } else if index < matches + unknowns {
                GenotypeCall::new(marker, b'0', b'0').unwrap()
            } else {
                GenotypeCall::new(marker, b'T', b'T').unwrap()
            };
            analysis.add_call(call).unwrap();
        }
        analysis
    }

    /// Query panel of A/G calls across `panel_size` markers
    fn build_query(panel_size: usize) -> Analysis {
        let mut query = Analysis::new(AnalysisType::Sequence, Sex::Male, "vcf_export".to_string());
        query.assign_sample("Q1".to_string());
        for index in 0..panel_size {
            query.add_call(GenotypeCall::new(format!("rs{index}"), b'A', b'G').unwrap()).unwrap();
        }
        query
    }

    #[test]
    fn test_match_threshold_boundary() {
        let config = ConcordanceConfig::default();
        let query = build_query(44);

        // 38 matches + 3 unknowns = 41 qualifies; 37 + 3 = 40 does not
        let candidates = vec![
            build_candidate("C1", 44, 38, 3),
            build_candidate("C2", 44, 37, 3)
        ];
        let results = find_population_matches(&query, &candidates, &config);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].sample_id, "C1");
        assert_eq!(results[0].counts, ConcordanceCounts::new(38, 3, 3));
    }

    #[test]
    fn test_unassigned_candidates_are_skipped() {
        let config = ConcordanceConfigBuilder::default()
            .min_batch_match(1)
            .build().unwrap();
        let query = build_query(4);

        // a perfect match, but with no sample association to report
        let mut unassigned = Analysis::new(AnalysisType::Sequence, Sex::Male, "vcf_export".to_string());
        for index in 0..4 {
            unassigned.add_call(GenotypeCall::new(format!("rs{index}"), b'A', b'G').unwrap()).unwrap();
        }

        let results = find_population_matches(&query, &[unassigned], &config);
        assert!(results.is_empty());
    }

    #[test]
    fn test_empty_population() {
        let config = ConcordanceConfig::default();
        let query = build_query(44);
        assert!(find_population_matches(&query, &[], &config).is_empty());
    }

    #[test]
    fn test_rank_matches() {
        let results = vec![
            MatchResult { sample_id: "C1".to_string(), counts: ConcordanceCounts::new(41, 2, 1) },
            MatchResult { sample_id: "C2".to_string(), counts: ConcordanceCounts::new(44, 0, 0) },
            MatchResult { sample_id: "C3".to_string(), counts: ConcordanceCounts::new(42, 1, 1) }
        ];

        let ranked = rank_matches(results);
        let order: Vec<&str> = ranked.iter().map(|r| r.sample_id.as_str()).collect();
        assert_eq!(order, vec!["C2", "C3", "C1"]);
    }
}
