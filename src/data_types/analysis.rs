
use anyhow::bail;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use strum_macros::EnumString;

use crate::data_types::genotype_call::GenotypeCall;

/// The two assay pipelines that can produce an analysis for a sample
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::Display, EnumString, Serialize)]
pub enum AnalysisType {
    /// Plate-based genotyping, parsed from spreadsheet exports
    #[strum(ascii_case_insensitive, serialize = "genotype")]
    Genotype,
    /// Sequencing, parsed from variant call files
    #[strum(ascii_case_insensitive, serialize = "sequence")]
    Sequence
}

/// Sex assignment as reported by submission metadata or predicted from assay markers
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::Display, EnumString, Serialize)]
pub enum Sex {
    #[strum(ascii_case_insensitive, serialize = "male")]
    Male,
    #[strum(ascii_case_insensitive, serialize = "female")]
    Female,
    /// No usable assignment from this source
    #[strum(ascii_case_insensitive, serialize = "unknown")]
    Unknown
}

/// One assay run for one sample, holding at most one call per marker.
#[derive(Clone, Debug)]
pub struct Analysis {
    /// Which pipeline produced this run
    analysis_type: AnalysisType,
    /// Sex predicted from the assay markers
    sex: Sex,
    /// Label for the producing source, e.g. an instrument or export name
    source: String,
    /// When the run was recorded
    created_at: DateTime<Utc>,
    /// External id of the owning sample, if assigned
    sample_id: Option<String>,
    /// Id of the plate batch this run was processed on, if any
    plate_id: Option<String>,
    /// Calls keyed by marker id; insertion order is the positional order callers rely on
    calls: IndexMap<String, GenotypeCall>
}

impl Analysis {
    /// Constructor
    /// # Arguments
    /// * `analysis_type` - the producing pipeline
    /// * `sex` - the sex predicted by that pipeline
    /// * `source` - label for the producing source
    pub fn new(analysis_type: AnalysisType, sex: Sex, source: String) -> Self {
        Self {
            analysis_type,
            sex,
            source,
            created_at: Utc::now(),
            sample_id: None,
            plate_id: None,
            calls: Default::default()
        }
    }

    /// Associates this run with a sample id; the association is a lookup key, not ownership
    pub fn assign_sample(&mut self, sample_id: String) {
        self.sample_id = Some(sample_id);
    }

    /// Associates this run with a plate batch
    pub fn assign_plate(&mut self, plate_id: String) {
        self.plate_id = Some(plate_id);
    }

    /// Appends a call to the run.
    /// # Arguments
    /// * `call` - the call to add; its marker must not already have a call in this run
    /// # Errors
    /// * if the run already has a call for the same marker
    pub fn add_call(&mut self, call: GenotypeCall) -> anyhow::Result<()> {
        if self.calls.contains_key(call.marker_id()) {
            bail!("duplicate call for marker {:?}", call.marker_id());
        }

        self.calls.insert(call.marker_id().to_string(), call);
        Ok(())
    }

    /// Looks up the call for a marker, if present
    pub fn get_call(&self, marker_id: &str) -> Option<&GenotypeCall> {
        self.calls.get(marker_id)
    }

    /// Number of calls in this run
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    // getters
    pub fn analysis_type(&self) -> AnalysisType {
        self.analysis_type
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn sample_id(&self) -> Option<&str> {
        self.sample_id.as_deref()
    }

    pub fn plate_id(&self) -> Option<&str> {
        self.plate_id.as_deref()
    }

    pub fn calls(&self) -> &IndexMap<String, GenotypeCall> {
        &self.calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_call_rejects_duplicate_marker() {
        let mut analysis = Analysis::new(AnalysisType::Genotype, Sex::Female, "plate_export".to_string());
        analysis.add_call(GenotypeCall::new("rs1".to_string(), b'A', b'A').unwrap()).unwrap();
        analysis.add_call(GenotypeCall::new("rs2".to_string(), b'C', b'T').unwrap()).unwrap();
        assert_eq!(analysis.call_count(), 2);

        // a second rs1 call must be refused, regardless of its alleles
        let duplicate = GenotypeCall::new("rs1".to_string(), b'G', b'G').unwrap();
        assert!(analysis.add_call(duplicate).is_err());
        assert_eq!(analysis.call_count(), 2);
    }

    #[test]
    fn test_call_order_is_preserved() {
        let mut analysis = Analysis::new(AnalysisType::Sequence, Sex::Male, "vcf_export".to_string());
        for marker in ["rs10", "rs2", "rs7"] {
            analysis.add_call(GenotypeCall::new(marker.to_string(), b'A', b'A').unwrap()).unwrap();
        }

        let observed: Vec<&str> = analysis.calls().values().map(|c| c.marker_id()).collect();
        assert_eq!(observed, vec!["rs10", "rs2", "rs7"]);
    }

    #[test]
    fn test_type_parsing() {
        use std::str::FromStr;
        assert_eq!(AnalysisType::from_str("genotype").unwrap(), AnalysisType::Genotype);
        assert_eq!(AnalysisType::from_str("Sequence").unwrap(), AnalysisType::Sequence);
        assert!(AnalysisType::from_str("microarray").is_err());
    }
}
