
use log::debug;

use crate::concordance::{compare_analyses, ConcordanceConfig};
use crate::data_types::sample::{Sample, SampleStatus};
use crate::data_types::sample_detail::{PlateSummary, SampleDetail};
use crate::sex_check::check_sex_concordance;

/// Computes the full check detail for a sample, without mutating it.
/// Returns None when the sample does not yet have one run from each pipeline.
/// # Arguments
/// * `sample` - the sample to check
/// * `config` - thresholds and pairing behavior
pub fn sample_detail(sample: &Sample, config: &ConcordanceConfig) -> Option<SampleDetail> {
    let (genotype, sequence) = sample.analysis_pair()?;
    let concordance = compare_analyses(genotype, sequence, config);
    let sex = check_sex_concordance(sample.sex(), genotype.sex(), sequence.sex());

    Some(SampleDetail {
        counts: concordance.counts,
        sex,
        snps: concordance.snps,
        nocalls: concordance.nocalls,
        failed_snps: concordance.failed_snps,
        marker_count_mismatch: concordance.marker_count_mismatch
    })
}

/// Recomputes and stores the sample's derived status.
/// With an incomplete analysis pair the status is cleared back to unset; otherwise it
/// becomes Pass when all three verdicts pass and Fail when any fails. Cancel is an
/// operator action and is never assigned here. Returns the detail when one was computed.
/// # Arguments
/// * `sample` - the sample to recompute; its stored status is overwritten
/// * `config` - thresholds and pairing behavior
pub fn recompute_status(sample: &mut Sample, config: &ConcordanceConfig) -> Option<SampleDetail> {
    match sample_detail(sample, config) {
        Some(detail) => {
            let status = if detail.is_pass() {
                SampleStatus::Pass
            } else {
                SampleStatus::Fail
            };
            debug!(
                "Sample {}: snps={}, nocalls={}, sex={} -> {status}",
                sample.sample_id(), detail.snps.as_ref(), detail.nocalls.as_ref(), detail.sex.as_ref()
            );
            sample.set_status(status);
            Some(detail)
        },
        None => {
            debug!("Sample {}: analysis pair incomplete, status cleared", sample.sample_id());
            sample.clear_status();
            None
        }
    }
}

/// Tallies the derived statuses across one plate batch of samples.
/// # Arguments
/// * `samples` - the batch to tally, typically every sample on one plate
pub fn summarize_plate<'a>(samples: impl IntoIterator<Item = &'a Sample>) -> PlateSummary {
    let mut summary = PlateSummary::default();
    for sample in samples {
        summary.record(sample.status());
    }
    summary
}
