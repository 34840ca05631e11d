
use crate::data_types::analysis::Sex;
use crate::data_types::concordance_metrics::Verdict;

/// Cross-checks the three sex assignments available for one sample: the self-reported
/// sex from submission metadata and the predictions from each pipeline.
///
/// The check fails when the reported sex is unknown, when the genotype-run prediction
/// is unknown, or when any two of the three assignments disagree on a definite sex.
/// An unknown prediction on the sequence side alone does not fail the check.
/// # Arguments
/// * `reported` - self-reported sex from the sample metadata
/// * `genotype_predicted` - sex predicted by the genotype run
/// * `sequence_predicted` - sex predicted by the sequence run
pub fn check_sex_concordance(reported: Sex, genotype_predicted: Sex, sequence_predicted: Sex) -> Verdict {
    // no usable reported sex, or an undetermined genotype prediction
    if reported == Sex::Unknown || genotype_predicted == Sex::Unknown {
        return Verdict::Fail;
    }

    // fail when the three assignments jointly span both definite sexes
    let assignments = [genotype_predicted, sequence_predicted, reported];
    if assignments.contains(&Sex::Male) && assignments.contains(&Sex::Female) {
        Verdict::Fail
    } else {
        Verdict::Pass
    }
}
