//! Lameness detection from bilateral activity asymmetry.
//!
//! Three weighted components feed one fused score: the banded left/right
//! asymmetry (40%), an activity-difference term (35%) and a posture term
//! (25%). Lameness is reported when the fused score exceeds the detection
//! threshold; severity follows the asymmetry bands and the affected side is
//! the less active half when the imbalance passes the side margin.
use serde::Serialize;

use crate::features::FeatureSet;
use crate::types::FactorContribution;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LamenessSeverity {
    None,
    Mild,
    Moderate,
    Severe,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    None,
    Left,
    Right,
}

/// Thresholds and contributions of the three components.
///
/// The base contributions are already weighted: their maxima (0.40, 0.35,
/// 0.25) are the component weights and sum to 1.0.
#[derive(Clone, Debug)]
pub struct LamenessParams {
    /// Asymmetry severity thresholds (mild/moderate/severe lower bounds).
    pub asym_mild: f32,
    pub asym_moderate: f32,
    pub asym_severe: f32,
    /// Base contributions for the asymmetry bands.
    pub base_mild: f32,
    pub base_moderate: f32,
    pub base_severe: f32,
    /// Activity-difference term.
    pub activity_lo: f32,
    pub activity_hi: f32,
    pub activity_lo_add: f32,
    pub activity_hi_add: f32,
    /// Posture-deviation term.
    pub posture_lo: f32,
    pub posture_hi: f32,
    pub posture_lo_add: f32,
    pub posture_hi_add: f32,
    /// Fused score above which lameness is reported.
    pub detect_thresh: f32,
    /// Side is assigned when one half's activity is below this fraction of
    /// the other's.
    pub side_margin: f32,
    pub eps: f32,
}

impl Default for LamenessParams {
    fn default() -> Self {
        Self {
            asym_mild: 0.18,
            asym_moderate: 0.25,
            asym_severe: 0.35,
            base_mild: 0.20,
            base_moderate: 0.30,
            base_severe: 0.40,
            activity_lo: 0.15,
            activity_hi: 0.25,
            activity_lo_add: 0.25,
            activity_hi_add: 0.35,
            posture_lo: 0.12,
            posture_hi: 0.20,
            posture_lo_add: 0.15,
            posture_hi_add: 0.25,
            detect_thresh: 0.25,
            side_margin: 0.85,
            eps: 1e-6,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LamenessResult {
    pub detected: bool,
    pub severity: LamenessSeverity,
    pub side: Side,
    pub score: f32,
    pub asymmetry: f32,
    pub confidence: f32,
    pub breakdown: Vec<FactorContribution>,
}

pub fn detect_lameness(f: &FeatureSet, p: &LamenessParams) -> LamenessResult {
    let left = f.left_activity.max(0.0);
    let right = f.right_activity.max(0.0);
    let asymmetry = (left - right).abs() / left.max(right).max(p.eps);

    let base = if asymmetry > p.asym_severe {
        p.base_severe
    } else if asymmetry > p.asym_moderate {
        p.base_moderate
    } else if asymmetry > p.asym_mild {
        p.base_mild
    } else {
        0.0
    };

    let activity_diff = (left - right).abs() / (left + right + p.eps);
    let activity_add = if activity_diff > p.activity_hi {
        p.activity_hi_add
    } else if activity_diff > p.activity_lo {
        p.activity_lo_add
    } else {
        0.0
    };

    let posture_add = if f.posture_deviation > p.posture_hi {
        p.posture_hi_add
    } else if f.posture_deviation > p.posture_lo {
        p.posture_lo_add
    } else {
        0.0
    };

    let score = base + activity_add + posture_add;
    let detected = score > p.detect_thresh;

    let severity = if !detected {
        LamenessSeverity::None
    } else if asymmetry > p.asym_severe {
        LamenessSeverity::Severe
    } else if asymmetry > p.asym_moderate {
        LamenessSeverity::Moderate
    } else {
        LamenessSeverity::Mild
    };

    let side = if !detected {
        Side::None
    } else if left < right * p.side_margin {
        Side::Left
    } else if right < left * p.side_margin {
        Side::Right
    } else {
        Side::None
    };

    // Detected: grows with the fused score. Not detected: shrinks as the
    // score approaches the threshold.
    let confidence = if detected {
        (0.40 + score).min(0.85)
    } else {
        let margin = (p.detect_thresh - score) / p.detect_thresh;
        (0.30 + 0.55 * margin).min(0.85)
    };

    LamenessResult {
        detected,
        severity,
        side,
        score,
        asymmetry,
        confidence: confidence.clamp(0.0, 1.0),
        breakdown: vec![
            FactorContribution {
                factor: "asymmetry",
                value: asymmetry,
                weighted: base,
            },
            FactorContribution {
                factor: "activity_difference",
                value: activity_diff,
                weighted: activity_add,
            },
            FactorContribution {
                factor: "posture_deviation",
                value: f.posture_deviation,
                weighted: posture_add,
            },
        ],
    }
}
