//! Recommendation generation.
//!
//! Pure mapping from the combined assessment to an ordered list of action
//! strings. Rules fire independently; the output order is the fixed rule
//! priority (urgent health risks first), not detection order.
use crate::health::assessment::HealthAssessment;
use crate::health::lameness::LamenessSeverity;
use crate::health::symptoms::Severity;

pub fn build_recommendations(health: &HealthAssessment) -> Vec<String> {
    let mut out = Vec::new();

    if health.lameness.severity == LamenessSeverity::Severe {
        out.push("URGENT: Severe lameness - immediate veterinary attention required".to_string());
    }
    if health.body_condition.grade <= 2 {
        out.push("Increase feed quality and quantity immediately".to_string());
    }
    if health.body_condition.grade >= 5 {
        out.push("Reduce feed and increase exercise - obesity risk".to_string());
    }
    if health.lameness.detected {
        out.push("Schedule immediate hoof inspection and veterinary examination".to_string());
    }
    if health
        .symptoms
        .symptoms
        .iter()
        .any(|s| s.severity >= Severity::Moderate)
    {
        out.push("Isolate animal and monitor for disease progression".to_string());
    }
    if health.symptoms.total_detected > 0 {
        out.push("Monitor identified symptoms and re-examine within 24 hours".to_string());
    }
    if health.vitals.out_of_range > 0 {
        out.push("Re-check out-of-range vitals and flag for veterinary review".to_string());
    }

    if out.is_empty() {
        out.push("Animal appears healthy - continue routine monitoring".to_string());
    }
    out.push("Document in daily attendance and health log".to_string());
    out
}
