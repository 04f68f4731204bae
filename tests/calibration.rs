//! Documented calibration cases, exercised through the public scorer API
//! with directly constructed feature sets.

use herd_analyzer::features::FeatureSet;
use herd_analyzer::health::{
    detect_lameness, detect_symptoms, score_body_condition, ConditionParams, LamenessParams,
    LamenessSeverity, Side, SymptomKind, SymptomParams,
};

fn baseline_features() -> FeatureSet {
    FeatureSet {
        circularity: 0.6,
        solidity: 0.8,
        texture_std_dev: 15.0,
        mean_brightness: 130.0,
        left_activity: 0.10,
        right_activity: 0.10,
        posture_deviation: 0.0,
        lesion_spot_count: 0,
        red_area_fraction: 0.0,
        discharge_area_px: 0,
        coat_texture_std_dev: 35.0,
        sharpness: 60.0,
        contour_found: true,
    }
}

/// Texture std-dev that makes smoothness `1/(1+σ/norm)` equal `target`.
fn std_for_smoothness(params: &ConditionParams, target: f32) -> f32 {
    params.texture_norm * (1.0 / target - 1.0)
}

#[test]
fn case_1_good_condition_no_findings() {
    let condition_params = ConditionParams::default();
    let mut f = baseline_features();
    f.circularity = 0.70;
    f.texture_std_dev = std_for_smoothness(&condition_params, 0.65);
    f.solidity = 0.80;
    f.mean_brightness = 150.0;

    let condition = score_body_condition(&f, &condition_params);
    assert_eq!(condition.grade, 4);

    let lameness = detect_lameness(&f, &LamenessParams::default());
    assert!(!lameness.detected);
    assert_eq!(lameness.severity, LamenessSeverity::None);

    let symptoms = detect_symptoms(&f, &SymptomParams::default());
    assert_eq!(symptoms.total_detected, 0);
}

#[test]
fn case_2_thin_animal_with_fair_coat() {
    let condition_params = ConditionParams::default();
    let mut f = baseline_features();
    f.circularity = 0.40;
    f.texture_std_dev = std_for_smoothness(&condition_params, 0.40);
    f.solidity = 0.60;
    f.mean_brightness = 90.0;
    f.coat_texture_std_dev = 22.0;

    let condition = score_body_condition(&f, &condition_params);
    assert_eq!(condition.grade, 2);

    let symptoms = detect_symptoms(&f, &SymptomParams::default());
    assert_eq!(symptoms.total_detected, 1);
    assert_eq!(symptoms.symptoms[0].kind, SymptomKind::PoorCoat);
    assert_eq!(symptoms.symptoms[0].grade, "fair");
}

#[test]
fn case_3_moderate_left_lameness() {
    let mut f = baseline_features();
    // asymmetry 0.30 with the left half quieter than 85% of the right
    f.left_activity = 0.07;
    f.right_activity = 0.10;

    let lameness = detect_lameness(&f, &LamenessParams::default());
    assert!(lameness.detected);
    assert_eq!(lameness.severity, LamenessSeverity::Moderate);
    assert_eq!(lameness.side, Side::Left);
}

#[test]
fn case_4_full_symptom_set() {
    let mut f = baseline_features();
    f.red_area_fraction = 0.22;
    f.lesion_spot_count = 9;
    f.discharge_area_px = 2500;
    f.coat_texture_std_dev = 18.0;

    let symptoms = detect_symptoms(&f, &SymptomParams::default());
    assert_eq!(symptoms.total_detected, 4);

    let grade_of = |kind: SymptomKind| {
        symptoms
            .symptoms
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.grade)
            .unwrap()
    };
    assert_eq!(grade_of(SymptomKind::Inflammation), "severe");
    assert_eq!(grade_of(SymptomKind::Lesions), "severe");
    assert_eq!(grade_of(SymptomKind::Discharge), "present");
    assert_eq!(grade_of(SymptomKind::PoorCoat), "poor");
}

#[test]
fn confidences_stay_in_unit_interval_across_sweeps() {
    let condition_params = ConditionParams::default();
    let lameness_params = LamenessParams::default();
    let symptom_params = SymptomParams::default();
    for circ in [0.0, 0.3, 0.5, 0.75, 1.0] {
        for act in [0.0, 0.05, 0.2, 0.8] {
            let mut f = baseline_features();
            f.circularity = circ;
            f.left_activity = act;
            f.right_activity = 0.1;

            let c = score_body_condition(&f, &condition_params);
            assert!((0.0..=1.0).contains(&c.confidence));
            assert!((1.0..=5.0).contains(&c.score));

            let l = detect_lameness(&f, &lameness_params);
            assert!((0.0..=1.0).contains(&l.confidence));

            for s in detect_symptoms(&f, &symptom_params).symptoms {
                assert!((0.0..=1.0).contains(&s.confidence));
            }
        }
    }
}
