//! Analyzer-wide parameters.
//!
//! One immutable structure enumerates every weight, band table and threshold
//! the engine uses. [`AnalyzerParams::validate`] runs at construction time:
//! fusion weights must sum to 1.0 and every band ladder must cover the real
//! line contiguously, so a mis-tuned configuration fails at startup rather
//! than mid-request.

use crate::error::ParamsError;
use crate::features::FeatureParams;
use crate::health::assessment::PenaltyParams;
use crate::health::bands::validate_table;
use crate::health::condition::ConditionParams;
use crate::health::lameness::LamenessParams;
use crate::health::symptoms::SymptomParams;
use crate::identify::IdentifyParams;

const WEIGHT_SUM_TOL: f32 = 1e-6;

/// Complete engine configuration. Construct via `Default` and adjust fields
/// before handing it to [`Analyzer::new`](crate::analyzer::Analyzer::new).
#[derive(Clone, Debug, Default)]
pub struct AnalyzerParams {
    pub features: FeatureParams,
    pub condition: ConditionParams,
    pub lameness: LamenessParams,
    pub symptoms: SymptomParams,
    pub identify: IdentifyParams,
    pub penalties: PenaltyParams,
}

impl AnalyzerParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        let condition_sum = self.condition.weights.sum();
        if (condition_sum - 1.0).abs() > WEIGHT_SUM_TOL {
            return Err(ParamsError::WeightSum("body condition", condition_sum));
        }

        // The lameness component maxima act as the component weights.
        let lameness_sum = self.lameness.base_severe
            + self.lameness.activity_hi_add
            + self.lameness.posture_hi_add;
        if (lameness_sum - 1.0).abs() > WEIGHT_SUM_TOL {
            return Err(ParamsError::WeightSum("lameness", lameness_sum));
        }

        validate_table("circularity", &self.condition.circularity_bands)?;
        validate_table("texture_smoothness", &self.condition.smoothness_bands)?;
        validate_table("solidity", &self.condition.solidity_bands)?;
        validate_table("brightness", &self.condition.brightness_bands)?;

        for (name, v) in [
            ("condition confidence floor", self.condition.confidence_floor),
            ("condition confidence cap", self.condition.confidence_cap),
            ("lameness detect threshold", self.lameness.detect_thresh),
            ("lameness side margin", self.lameness.side_margin),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(ParamsError::OutOfRange(name, "[0, 1]", v));
            }
        }

        if self.lameness.asym_mild >= self.lameness.asym_moderate
            || self.lameness.asym_moderate >= self.lameness.asym_severe
        {
            return Err(ParamsError::BandTable(
                "asymmetry",
                "severity thresholds must be strictly increasing".into(),
            ));
        }

        Ok(())
    }
}
