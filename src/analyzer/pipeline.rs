//! Analyzer pipeline orchestrating the full assessment.
//!
//! Stages
//! - Validate: size/shape checks on the input view (the only hard failure).
//! - Extract: one `FeatureSet` per request from the shared luma buffer.
//! - Score: body condition, lameness and symptoms run concurrently; they
//!   share nothing but the immutable `FeatureSet`.
//! - Select: model attempt first, heuristic label otherwise; provenance is
//!   recorded either way.
//! - Identify: code/tag/biometric/manual fusion on the same frame.
//! - Report: recommendations, alerts and the timed envelope.
//!
//! The analyzer is stateless per request; the optional classifier handle is
//! shared and must be reentrant.

use std::sync::Arc;
use std::time::Instant;

use crate::behavior::classify_behavior;
use crate::classifier::{run_model_attempt, HealthClassifier};
use crate::error::{EngineError, ParamsError};
use crate::features::{extract_features, validate_image};
use crate::health::assessment::{compose_score, AssessmentSource, HealthAssessment};
use crate::health::condition::score_body_condition;
use crate::health::lameness::detect_lameness;
use crate::health::symptoms::detect_symptoms;
use crate::health::vitals::{assess_vitals, VitalsRanges};
use crate::identify::identify;
use crate::image::ImageRgb8;
use crate::recommend::build_recommendations;
use crate::types::{AnalysisInput, AssessmentReport};

use super::params::AnalyzerParams;

/// Single-image assessment engine.
pub struct Analyzer {
    params: AnalyzerParams,
    classifier: Option<Arc<dyn HealthClassifier>>,
}

impl Analyzer {
    /// Create an analyzer, validating the configuration up front.
    pub fn new(params: AnalyzerParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            params,
            classifier: None,
        })
    }

    /// Inject the optional trained classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn HealthClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn params(&self) -> &AnalyzerParams {
        &self.params
    }

    /// Run the full pipeline on one image.
    ///
    /// Returns a complete envelope for every structurally valid image;
    /// `InvalidImage` is the only error. Classifier trouble and degraded
    /// descriptors lower confidence instead of failing.
    pub fn process(
        &self,
        image: ImageRgb8<'_>,
        input: &AnalysisInput,
    ) -> Result<AssessmentReport, EngineError> {
        let total_start = Instant::now();

        validate_image(&image, self.params.features.min_dim)?;
        let gray = image.luma();
        let features = extract_features(&image, &gray, &self.params.features);

        // The three scorers are independent; run them concurrently.
        let ((condition, lameness), symptoms) = rayon::join(
            || {
                rayon::join(
                    || score_body_condition(&features, &self.params.condition),
                    || detect_lameness(&features, &self.params.lameness),
                )
            },
            || detect_symptoms(&features, &self.params.symptoms),
        );

        let behavior = classify_behavior(&features);
        let vitals = assess_vitals(
            input.vitals.as_ref(),
            &VitalsRanges::for_species(input.species),
        );
        let (health_score, status, alerts) =
            compose_score(&condition, &lameness, &symptoms, &vitals, &self.params.penalties);

        let (label, confidence, source) = match run_model_attempt(
            self.classifier.as_deref(),
            &image,
        ) {
            Some(output) => (output.label, output.confidence, AssessmentSource::Model),
            None => (
                status.as_str().to_string(),
                f32::from(health_score) / 100.0,
                AssessmentSource::Heuristic,
            ),
        };

        let health = HealthAssessment {
            label,
            confidence,
            source,
            status,
            health_score,
            body_condition: condition,
            lameness,
            symptoms,
            vitals,
            alerts,
        };

        let recommendations = build_recommendations(&health);
        let identification = identify(&image, &gray, &input.identifiers, &self.params.identify);

        let latency_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        log::debug!(
            "analysis complete: status {:?} score {} method {:?} in {latency_ms:.2} ms",
            health.status,
            health.health_score,
            identification.method
        );

        Ok(AssessmentReport {
            identification,
            behavior,
            health,
            recommendations,
            features,
            latency_ms,
        })
    }
}
