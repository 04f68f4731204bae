//! Optional trained classifier and the model-or-heuristic selector.
//!
//! The classifier is an injectable capability with a single operation. The
//! selector is an explicit two-branch strategy: attempt the model, and on
//! absence, invocation error or an out-of-contract answer, fall back to the
//! heuristic scorers. The fallback never fails, so classifier trouble is
//! never visible to the caller except through the provenance field.
use crate::error::ClassifierError;
use crate::image::ImageRgb8;

/// A trained classifier's answer: a label with its confidence, plus the raw
/// per-class scores when the backend exposes them.
#[derive(Clone, Debug)]
pub struct ClassifierOutput {
    pub label: String,
    pub confidence: f32,
    pub scores: Vec<(String, f32)>,
}

/// Injectable classification capability. Implementations must be reentrant:
/// the analyzer shares one handle across concurrent requests.
pub trait HealthClassifier: Send + Sync {
    fn classify(&self, image: &ImageRgb8<'_>) -> Result<ClassifierOutput, ClassifierError>;
}

/// Attempt the model branch. Returns `None` when the heuristic branch must
/// take over; the reason is logged, never propagated.
pub fn run_model_attempt(
    classifier: Option<&dyn HealthClassifier>,
    image: &ImageRgb8<'_>,
) -> Option<ClassifierOutput> {
    let Some(classifier) = classifier else {
        log::debug!("no classifier loaded, using heuristic assessment");
        return None;
    };
    match classifier.classify(image) {
        Ok(output) => match validate_output(&output) {
            Ok(()) => Some(output),
            Err(err) => {
                log::warn!("classifier output rejected ({err}), falling back to heuristics");
                None
            }
        },
        Err(err) => {
            log::warn!("classifier invocation failed ({err}), falling back to heuristics");
            None
        }
    }
}

fn validate_output(output: &ClassifierOutput) -> Result<(), ClassifierError> {
    if output.label.trim().is_empty() {
        return Err(ClassifierError::InvalidOutput("empty label".into()));
    }
    if !output.confidence.is_finite() || !(0.0..=1.0).contains(&output.confidence) {
        return Err(ClassifierError::InvalidOutput(format!(
            "confidence {} outside [0, 1]",
            output.confidence
        )));
    }
    for (label, score) in &output.scores {
        if !score.is_finite() || !(0.0..=1.0).contains(score) {
            return Err(ClassifierError::InvalidOutput(format!(
                "score {score} for '{label}' outside [0, 1]"
            )));
        }
    }
    Ok(())
}
