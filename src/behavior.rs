//! Behavior classification from global activity descriptors.
//!
//! Four candidate labels are scored from sharpness, brightness, edge density
//! and texture; scores are normalized to sum to one and the winner is the
//! first maximum in fixed label order, so ties resolve deterministically.
use serde::Serialize;

use crate::features::FeatureSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BehaviorLabel {
    Standing,
    Eating,
    Resting,
    Walking,
}

pub const BEHAVIOR_LABELS: [BehaviorLabel; 4] = [
    BehaviorLabel::Standing,
    BehaviorLabel::Eating,
    BehaviorLabel::Resting,
    BehaviorLabel::Walking,
];

#[derive(Clone, Copy, Debug, Serialize)]
pub struct LabelScore {
    pub label: BehaviorLabel,
    pub score: f32,
}

#[derive(Clone, Debug, Serialize)]
pub struct BehaviorResult {
    pub label: BehaviorLabel,
    /// The winner's normalized score.
    pub confidence: f32,
    /// Normalized score per label (sums to 1).
    pub scores: Vec<LabelScore>,
}

pub fn classify_behavior(f: &FeatureSet) -> BehaviorResult {
    let edge_density = ((f.left_activity + f.right_activity) / 2.0).clamp(0.0, 1.0);
    let sharpness = f.sharpness;
    let brightness = f.mean_brightness;
    let texture = f.coat_texture_std_dev;

    let raw = [
        // Standing: defined outline, moderate activity
        0.3 * (sharpness / 100.0) + 0.3 * edge_density + 0.2 * (texture / 50.0),
        // Eating: head down in (usually bright) feed areas
        0.4 * (brightness / 255.0) + 0.3 * edge_density + 0.2 * (texture / 50.0),
        // Resting: low activity, soft outline, darker scenes
        0.5 * (1.0 - edge_density)
            + 0.3 * (1.0 - sharpness / 200.0)
            + 0.2 * ((200.0 - brightness) / 200.0),
        // Walking: high edge activity and sharp motion boundaries
        0.4 * edge_density + 0.3 * (sharpness / 100.0) + 0.2 * (texture / 50.0),
    ]
    .map(|v: f32| v.max(0.0));

    let total: f32 = raw.iter().sum();
    let total = if total > 0.0 { total } else { 1.0 };

    let scores: Vec<LabelScore> = BEHAVIOR_LABELS
        .iter()
        .zip(raw)
        .map(|(&label, v)| LabelScore {
            label,
            score: v / total,
        })
        .collect();

    let mut best = scores[0];
    for s in &scores[1..] {
        if s.score > best.score {
            best = *s;
        }
    }

    BehaviorResult {
        label: best.label,
        confidence: best.score,
        scores,
    }
}
