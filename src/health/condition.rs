//! Body condition scoring (BCS 1-5).
//!
//! Four shape/texture factors are banded through their ladders and fused by
//! fixed weights (circularity 35%, texture smoothness 30%, solidity 20%,
//! brightness 15%). The fused value is kept at half-point granularity; a
//! whole-point grade selects the assessment text. Confidence is the summed
//! weight of factors that landed in a decisive band, floored and capped.
use serde::Serialize;

use super::bands::{lookup, Band};
use crate::features::FeatureSet;
use crate::types::FactorContribution;

/// Fusion weights. Must sum to 1.0 (validated at analyzer construction).
#[derive(Clone, Copy, Debug)]
pub struct ConditionWeights {
    pub circularity: f32,
    pub texture: f32,
    pub solidity: f32,
    pub brightness: f32,
}

impl ConditionWeights {
    pub fn sum(&self) -> f32 {
        self.circularity + self.texture + self.solidity + self.brightness
    }
}

impl Default for ConditionWeights {
    fn default() -> Self {
        Self {
            circularity: 0.35,
            texture: 0.30,
            solidity: 0.20,
            brightness: 0.15,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConditionParams {
    pub weights: ConditionWeights,
    pub circularity_bands: Vec<Band>,
    pub smoothness_bands: Vec<Band>,
    pub solidity_bands: Vec<Band>,
    pub brightness_bands: Vec<Band>,
    /// Texture std-dev at which smoothness `1/(1+σ/norm)` halves.
    pub texture_norm: f32,
    pub confidence_floor: f32,
    pub confidence_cap: f32,
    /// Score and confidence reported when the contour was not found.
    pub degraded_score: f32,
    pub degraded_confidence: f32,
}

impl Default for ConditionParams {
    fn default() -> Self {
        const INF: f32 = f32::INFINITY;
        const NEG: f32 = f32::NEG_INFINITY;
        Self {
            weights: ConditionWeights::default(),
            circularity_bands: vec![
                Band::new(0.75, INF, 4.5, true),
                Band::new(0.65, 0.75, 4.0, false),
                Band::new(0.55, 0.65, 3.5, false),
                Band::new(0.45, 0.55, 3.0, false),
                Band::new(0.35, 0.45, 2.5, false),
                Band::new(NEG, 0.35, 1.5, true),
            ],
            smoothness_bands: vec![
                Band::new(0.75, INF, 4.5, true),
                Band::new(0.60, 0.75, 3.5, false),
                Band::new(0.45, 0.60, 3.0, false),
                Band::new(NEG, 0.45, 2.0, true),
            ],
            solidity_bands: vec![
                Band::new(0.85, INF, 4.0, true),
                Band::new(0.75, 0.85, 3.5, false),
                Band::new(0.65, 0.75, 3.0, false),
                Band::new(NEG, 0.65, 2.5, true),
            ],
            brightness_bands: vec![
                Band::new(160.0, INF, 4.0, true),
                Band::new(140.0, 160.0, 3.5, false),
                Band::new(100.0, 140.0, 3.0, false),
                Band::new(80.0, 100.0, 2.5, false),
                Band::new(NEG, 80.0, 2.0, true),
            ],
            texture_norm: 25.0,
            confidence_floor: 0.35,
            confidence_cap: 0.95,
            degraded_score: 3.0,
            degraded_confidence: 0.30,
        }
    }
}

const ASSESSMENTS: [&str; 5] = [
    "Emaciated - Immediate attention required",
    "Thin - Needs nutritional support",
    "Moderate - Acceptable condition",
    "Good - Optimal health",
    "Obese - Risk of health issues",
];

#[derive(Clone, Debug, Serialize)]
pub struct BodyConditionResult {
    /// Fused score at half-point granularity, in {1, 1.5, ..., 5}.
    pub score: f32,
    /// Whole-point grade 1..=5 selecting the assessment text.
    pub grade: u8,
    pub assessment: &'static str,
    pub confidence: f32,
    pub breakdown: Vec<FactorContribution>,
}

pub fn score_body_condition(f: &FeatureSet, p: &ConditionParams) -> BodyConditionResult {
    if !f.contour_found {
        let grade = p.degraded_score.round().clamp(1.0, 5.0) as u8;
        return BodyConditionResult {
            score: p.degraded_score,
            grade,
            assessment: ASSESSMENTS[(grade - 1) as usize],
            confidence: p.degraded_confidence,
            breakdown: Vec::new(),
        };
    }

    let smoothness = 1.0 / (1.0 + f.texture_std_dev / p.texture_norm);

    let factors = [
        ("circularity", f.circularity, &p.circularity_bands, p.weights.circularity),
        ("texture_smoothness", smoothness, &p.smoothness_bands, p.weights.texture),
        ("solidity", f.solidity, &p.solidity_bands, p.weights.solidity),
        ("brightness", f.mean_brightness, &p.brightness_bands, p.weights.brightness),
    ];

    let mut fused = 0.0f32;
    let mut decisive_weight = 0.0f32;
    let mut breakdown = Vec::with_capacity(factors.len());
    for (name, value, table, weight) in factors {
        let band = lookup(table, value);
        let weighted = band.contribution * weight;
        fused += weighted;
        if band.decisive {
            decisive_weight += weight;
        }
        breakdown.push(FactorContribution {
            factor: name,
            value,
            weighted,
        });
    }

    let score = ((fused * 2.0).round() / 2.0).clamp(1.0, 5.0);
    let grade = fused.round().clamp(1.0, 5.0) as u8;
    let confidence = decisive_weight
        .max(p.confidence_floor)
        .min(p.confidence_cap);

    BodyConditionResult {
        score,
        grade,
        assessment: ASSESSMENTS[(grade - 1) as usize],
        confidence,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(circularity: f32, smoothness: f32, solidity: f32, brightness: f32) -> FeatureSet {
        let p = ConditionParams::default();
        // invert smoothness = 1 / (1 + sigma/norm)
        let sigma = p.texture_norm * (1.0 / smoothness - 1.0);
        FeatureSet {
            circularity,
            solidity,
            texture_std_dev: sigma,
            mean_brightness: brightness,
            left_activity: 0.1,
            right_activity: 0.1,
            posture_deviation: 0.0,
            lesion_spot_count: 0,
            red_area_fraction: 0.0,
            discharge_area_px: 0,
            coat_texture_std_dev: 30.0,
            sharpness: 50.0,
            contour_found: true,
        }
    }

    #[test]
    fn calibration_good_condition_grades_four() {
        // circularity 0.70, smoothness 0.65, solidity 0.80, brightness 150
        let result = score_body_condition(
            &features(0.70, 0.65, 0.80, 150.0),
            &ConditionParams::default(),
        );
        assert_eq!(result.grade, 4);
        assert_eq!(result.score, 3.5);
        assert_eq!(result.assessment, "Good - Optimal health");
    }

    #[test]
    fn calibration_thin_condition_grades_two() {
        // circularity 0.40, smoothness 0.40, solidity 0.60, brightness 90
        let result = score_body_condition(
            &features(0.40, 0.40, 0.60, 90.0),
            &ConditionParams::default(),
        );
        assert_eq!(result.grade, 2);
        assert_eq!(result.score, 2.5);
    }

    #[test]
    fn score_stays_on_half_point_grid() {
        let p = ConditionParams::default();
        for circ in [0.0, 0.2, 0.5, 0.74, 0.75, 0.76, 0.9, 1.0] {
            let r = score_body_condition(&features(circ, 0.5, 0.7, 120.0), &p);
            let doubled = r.score * 2.0;
            assert_eq!(doubled, doubled.round(), "score {} off-grid", r.score);
            assert!((1.0..=5.0).contains(&r.score));
            assert!((0.0..=1.0).contains(&r.confidence));
        }
    }

    #[test]
    fn boundary_circularity_resolves_consistently() {
        let p = ConditionParams::default();
        let first = score_body_condition(&features(0.75, 0.5, 0.7, 120.0), &p);
        for _ in 0..5 {
            let again = score_body_condition(&features(0.75, 0.5, 0.7, 120.0), &p);
            assert_eq!(again.score, first.score);
            assert_eq!(again.breakdown[0].weighted, first.breakdown[0].weighted);
        }
        // 0.75 sits in the 0.65-0.75 band (upper-inclusive), contribution 4.0
        assert_eq!(first.breakdown[0].weighted, 4.0 * p.weights.circularity);
    }

    #[test]
    fn extreme_factors_raise_confidence() {
        let p = ConditionParams::default();
        let extreme = score_body_condition(&features(0.9, 0.9, 0.9, 200.0), &p);
        let middling = score_body_condition(&features(0.6, 0.55, 0.7, 120.0), &p);
        assert!(extreme.confidence > middling.confidence);
        assert!(extreme.confidence <= p.confidence_cap);
        assert_eq!(middling.confidence, p.confidence_floor);
    }

    #[test]
    fn missing_contour_reports_degraded_band() {
        let mut f = features(0.7, 0.6, 0.8, 150.0);
        f.contour_found = false;
        let r = score_body_condition(&f, &ConditionParams::default());
        assert_eq!(r.score, 3.0);
        assert_eq!(r.confidence, 0.30);
        assert!(r.breakdown.is_empty());
    }

    #[test]
    fn breakdown_reproduces_fused_score() {
        let p = ConditionParams::default();
        let r = score_body_condition(&features(0.70, 0.65, 0.80, 150.0), &p);
        let fused: f32 = r.breakdown.iter().map(|c| c.weighted).sum();
        assert_eq!(((fused * 2.0).round() / 2.0).clamp(1.0, 5.0), r.score);
    }
}
