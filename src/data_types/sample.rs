
use anyhow::bail;
use serde::Serialize;
use strum_macros::EnumString;

use crate::data_types::analysis::{Analysis, AnalysisType, Sex};

/// Overall verdict persisted on a sample
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::Display, EnumString, Serialize)]
pub enum SampleStatus {
    #[strum(ascii_case_insensitive, serialize = "pass")]
    Pass,
    #[strum(ascii_case_insensitive, serialize = "fail")]
    Fail,
    /// Administrative override set by an operator, never by the status engine
    #[strum(ascii_case_insensitive, serialize = "cancel")]
    Cancel
}

/// A tracked laboratory sample with up to one run from each pipeline.
#[derive(Clone, Debug)]
pub struct Sample {
    /// External sample identifier
    sample_id: String,
    /// Self-reported sex from the submission metadata
    sex: Sex,
    /// Free-text operator comment
    comment: String,
    /// Derived status; None until both runs are present and the engine has run
    status: Option<SampleStatus>,
    /// The genotype-pipeline run, if received
    genotype_analysis: Option<Analysis>,
    /// The sequence-pipeline run, if received
    sequence_analysis: Option<Analysis>
}

impl Sample {
    /// Constructor
    /// # Arguments
    /// * `sample_id` - the external sample identifier
    /// * `sex` - the self-reported sex
    pub fn new(sample_id: String, sex: Sex) -> Self {
        Self {
            sample_id,
            sex,
            comment: String::new(),
            status: None,
            genotype_analysis: None,
            sequence_analysis: None
        }
    }

    /// Stores an analysis in the slot for its type, replacing any earlier run of that type.
    /// The derived status is cleared; recomputing it is the status engine's job.
    /// # Arguments
    /// * `analysis` - the run to store
    /// # Errors
    /// * if the analysis is associated with a different sample id
    pub fn set_analysis(&mut self, analysis: Analysis) -> anyhow::Result<()> {
        if let Some(owner) = analysis.sample_id() {
            if owner != self.sample_id {
                bail!("analysis is associated with sample {:?}, not {:?}", owner, self.sample_id);
            }
        }

        match analysis.analysis_type() {
            AnalysisType::Genotype => self.genotype_analysis = Some(analysis),
            AnalysisType::Sequence => self.sequence_analysis = Some(analysis)
        };
        self.status = None;
        Ok(())
    }

    /// Removes and returns the run of the given type, if present.
    /// The derived status is cleared either way.
    pub fn remove_analysis(&mut self, analysis_type: AnalysisType) -> Option<Analysis> {
        self.status = None;
        match analysis_type {
            AnalysisType::Genotype => self.genotype_analysis.take(),
            AnalysisType::Sequence => self.sequence_analysis.take()
        }
    }

    /// Both runs, genotype first, when the pair is complete
    pub fn analysis_pair(&self) -> Option<(&Analysis, &Analysis)> {
        match (self.genotype_analysis.as_ref(), self.sequence_analysis.as_ref()) {
            (Some(genotype), Some(sequence)) => Some((genotype, sequence)),
            _ => None
        }
    }

    /// True when one run from each pipeline is present
    pub fn has_analysis_pair(&self) -> bool {
        self.genotype_analysis.is_some() && self.sequence_analysis.is_some()
    }

    /// Stores a derived or administrative status
    pub fn set_status(&mut self, status: SampleStatus) {
        self.status = Some(status);
    }

    /// Clears the derived status back to unset
    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Replaces the operator comment
    pub fn set_comment(&mut self, comment: String) {
        self.comment = comment;
    }

    // getters
    pub fn sample_id(&self) -> &str {
        &self.sample_id
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn status(&self) -> Option<SampleStatus> {
        self.status
    }

    pub fn genotype_analysis(&self) -> Option<&Analysis> {
        self.genotype_analysis.as_ref()
    }

    pub fn sequence_analysis(&self) -> Option<&Analysis> {
        self.sequence_analysis.as_ref()
    }
}
