use serde::{Deserialize, Serialize};

use crate::behavior::BehaviorResult;
use crate::health::assessment::HealthAssessment;
use crate::health::vitals::{Species, Vitals};
use crate::identify::{IdentificationResult, ManualIdentifiers};

/// One factor's share of a fused score, kept for explainability.
///
/// `weighted` is the factor's banded contribution multiplied by its weight;
/// the fused score is the sum over the breakdown, so a report is
/// reproducible from the `FeatureSet` and the fixed parameter tables.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct FactorContribution {
    pub factor: &'static str,
    pub value: f32,
    pub weighted: f32,
}

/// Caller-supplied context accompanying the image.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisInput {
    pub vitals: Option<Vitals>,
    pub identifiers: ManualIdentifiers,
    pub species: Species,
}

/// Output envelope returned for every structurally valid image.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub identification: IdentificationResult,
    pub behavior: BehaviorResult,
    pub health: HealthAssessment,
    pub recommendations: Vec<String>,
    pub features: crate::features::FeatureSet,
    pub latency_ms: f64,
}
