//! Combined health assessment and the 0-100 health score.
//!
//! The score starts at 100 and deducts a documented penalty per finding:
//! body-condition grade, lameness severity, each detected symptom by its
//! severity, and each out-of-range vital. Status bands then map the score to
//! the qualitative labels used in reports and alerts.
use serde::Serialize;

use super::condition::BodyConditionResult;
use super::lameness::{LamenessResult, LamenessSeverity};
use super::symptoms::{Severity, SymptomReport};
use super::vitals::VitalsReport;

/// Where the reported health label came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentSource {
    Model,
    Heuristic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    Healthy,
    Fair,
    Poor,
    Critical,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Fair => "Fair - Monitor Closely",
            Self::Poor => "Poor - Intervention Needed",
            Self::Critical => "Critical - Immediate Attention Required",
        }
    }
}

/// Penalty table for the health score.
#[derive(Clone, Copy, Debug)]
pub struct PenaltyParams {
    pub bcs_emaciated: u32,
    pub bcs_thin: u32,
    pub bcs_obese: u32,
    pub lameness_mild: u32,
    pub lameness_moderate: u32,
    pub lameness_severe: u32,
    pub symptom_mild: u32,
    pub symptom_moderate: u32,
    pub symptom_severe: u32,
    pub vital_out_of_range: u32,
}

impl Default for PenaltyParams {
    fn default() -> Self {
        Self {
            bcs_emaciated: 35,
            bcs_thin: 20,
            bcs_obese: 15,
            lameness_mild: 10,
            lameness_moderate: 18,
            lameness_severe: 30,
            symptom_mild: 4,
            symptom_moderate: 8,
            symptom_severe: 12,
            vital_out_of_range: 4,
        }
    }
}

/// The aggregated health section of the output envelope.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAssessment {
    /// Headline label: the model's class when the classifier answered, or
    /// the heuristic status text otherwise.
    pub label: String,
    pub confidence: f32,
    pub source: AssessmentSource,
    pub status: HealthStatus,
    pub health_score: u8,
    pub body_condition: BodyConditionResult,
    pub lameness: LamenessResult,
    pub symptoms: SymptomReport,
    pub vitals: VitalsReport,
    pub alerts: Vec<String>,
}

/// Compute the penalty-based health score and the alert list.
pub fn compose_score(
    condition: &BodyConditionResult,
    lameness: &LamenessResult,
    symptoms: &SymptomReport,
    vitals: &VitalsReport,
    p: &PenaltyParams,
) -> (u8, HealthStatus, Vec<String>) {
    let mut penalty = 0u32;
    let mut alerts = Vec::new();

    match condition.grade {
        1 => {
            penalty += p.bcs_emaciated;
            alerts.push(
                "CRITICAL: Poor body condition - nutritional intervention required".to_string(),
            );
        }
        2 => {
            penalty += p.bcs_thin;
            alerts.push(
                "CRITICAL: Poor body condition - nutritional intervention required".to_string(),
            );
        }
        5 => {
            penalty += p.bcs_obese;
            alerts.push("WARNING: Obesity detected - reduce feed and increase exercise".to_string());
        }
        _ => {}
    }

    match lameness.severity {
        LamenessSeverity::None => {}
        LamenessSeverity::Mild => penalty += p.lameness_mild,
        LamenessSeverity::Moderate => penalty += p.lameness_moderate,
        LamenessSeverity::Severe => penalty += p.lameness_severe,
    }
    if lameness.detected {
        alerts.push(format!(
            "LAMENESS DETECTED: {:?} severity, side {:?}",
            lameness.severity, lameness.side
        ));
    }

    for symptom in &symptoms.symptoms {
        penalty += match symptom.severity {
            Severity::Mild => p.symptom_mild,
            Severity::Moderate => p.symptom_moderate,
            Severity::Severe => p.symptom_severe,
        };
        if symptom.severity >= Severity::Moderate {
            alerts.push(symptom.description.to_string());
        }
    }

    penalty += vitals.out_of_range as u32 * p.vital_out_of_range;
    alerts.extend(vitals.alerts.iter().cloned());

    let score = 100u32.saturating_sub(penalty).min(100) as u8;
    let status = if score >= 80 {
        HealthStatus::Healthy
    } else if score >= 60 {
        HealthStatus::Fair
    } else if score >= 40 {
        HealthStatus::Poor
    } else {
        HealthStatus::Critical
    };

    (score, status, alerts)
}
