//! Visible symptom detection.
//!
//! Each symptom is evaluated independently against its own thresholds; the
//! report is the set of triggered entries (kinds never repeat). A grade
//! string keeps the per-symptom vocabulary (severe/moderate, present/
//! possible, poor/fair) while the mapped severity drives attention flags and
//! health-score penalties.
use serde::Serialize;

use crate::features::FeatureSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomKind {
    Lesions,
    Inflammation,
    Discharge,
    PoorCoat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

#[derive(Clone, Debug, Serialize)]
pub struct SymptomEntry {
    pub kind: SymptomKind,
    pub grade: &'static str,
    pub severity: Severity,
    pub confidence: f32,
    /// The descriptor value that triggered the entry.
    pub value: f32,
    pub description: &'static str,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct SymptomReport {
    pub symptoms: Vec<SymptomEntry>,
    pub total_detected: usize,
    pub requires_attention: bool,
}

#[derive(Clone, Debug)]
pub struct SymptomParams {
    /// Lesions: spot counts above these trigger moderate/severe.
    pub lesion_moderate_count: usize,
    pub lesion_severe_count: usize,
    pub lesion_moderate_conf: f32,
    pub lesion_severe_conf: f32,
    /// Inflammation: red-area fractions.
    pub red_moderate: f32,
    pub red_severe: f32,
    pub red_moderate_conf: f32,
    pub red_severe_conf: f32,
    /// Discharge: bright head-region pixel counts.
    pub discharge_possible_px: u32,
    pub discharge_present_px: u32,
    pub discharge_possible_conf: f32,
    pub discharge_present_conf: f32,
    /// Coat quality: texture std-dev below these is poor/fair.
    pub coat_poor_std: f32,
    pub coat_fair_std: f32,
    pub coat_poor_conf: f32,
    pub coat_fair_conf: f32,
}

impl Default for SymptomParams {
    fn default() -> Self {
        Self {
            lesion_moderate_count: 5,
            lesion_severe_count: 8,
            lesion_moderate_conf: 0.68,
            lesion_severe_conf: 0.75,
            red_moderate: 0.12,
            red_severe: 0.20,
            red_moderate_conf: 0.70,
            red_severe_conf: 0.78,
            discharge_possible_px: 800,
            discharge_present_px: 2000,
            discharge_possible_conf: 0.58,
            discharge_present_conf: 0.65,
            coat_poor_std: 20.0,
            coat_fair_std: 25.0,
            coat_poor_conf: 0.72,
            coat_fair_conf: 0.62,
        }
    }
}

pub fn detect_symptoms(f: &FeatureSet, p: &SymptomParams) -> SymptomReport {
    let mut symptoms = Vec::new();

    if f.lesion_spot_count > p.lesion_severe_count {
        symptoms.push(SymptomEntry {
            kind: SymptomKind::Lesions,
            grade: "severe",
            severity: Severity::Severe,
            confidence: p.lesion_severe_conf,
            value: f.lesion_spot_count as f32,
            description: "Multiple dark spots detected - possible skin lesions or mange",
        });
    } else if f.lesion_spot_count >= p.lesion_moderate_count {
        symptoms.push(SymptomEntry {
            kind: SymptomKind::Lesions,
            grade: "moderate",
            severity: Severity::Moderate,
            confidence: p.lesion_moderate_conf,
            value: f.lesion_spot_count as f32,
            description: "Dark spots detected - possible skin lesions or mange",
        });
    }

    if f.red_area_fraction > p.red_severe {
        symptoms.push(SymptomEntry {
            kind: SymptomKind::Inflammation,
            grade: "severe",
            severity: Severity::Severe,
            confidence: p.red_severe_conf,
            value: f.red_area_fraction,
            description: "Excessive redness detected - possible inflammation or fever",
        });
    } else if f.red_area_fraction > p.red_moderate {
        symptoms.push(SymptomEntry {
            kind: SymptomKind::Inflammation,
            grade: "moderate",
            severity: Severity::Moderate,
            confidence: p.red_moderate_conf,
            value: f.red_area_fraction,
            description: "Elevated redness detected - possible inflammation",
        });
    }

    if f.discharge_area_px > p.discharge_present_px {
        symptoms.push(SymptomEntry {
            kind: SymptomKind::Discharge,
            grade: "present",
            severity: Severity::Mild,
            confidence: p.discharge_present_conf,
            value: f.discharge_area_px as f32,
            description: "Bright areas in head region - possible eye/nasal discharge",
        });
    } else if f.discharge_area_px >= p.discharge_possible_px {
        symptoms.push(SymptomEntry {
            kind: SymptomKind::Discharge,
            grade: "possible",
            severity: Severity::Mild,
            confidence: p.discharge_possible_conf,
            value: f.discharge_area_px as f32,
            description: "Some bright areas in head region - watch for discharge",
        });
    }

    if f.coat_texture_std_dev < p.coat_poor_std {
        symptoms.push(SymptomEntry {
            kind: SymptomKind::PoorCoat,
            grade: "poor",
            severity: Severity::Mild,
            confidence: p.coat_poor_conf,
            value: f.coat_texture_std_dev,
            description: "Dull or poor coat quality - may indicate malnutrition",
        });
    } else if f.coat_texture_std_dev <= p.coat_fair_std {
        symptoms.push(SymptomEntry {
            kind: SymptomKind::PoorCoat,
            grade: "fair",
            severity: Severity::Mild,
            confidence: p.coat_fair_conf,
            value: f.coat_texture_std_dev,
            description: "Coat quality below normal - monitor condition",
        });
    }

    let requires_attention = symptoms.iter().any(|s| s.severity >= Severity::Moderate);
    SymptomReport {
        total_detected: symptoms.len(),
        requires_attention,
        symptoms,
    }
}
