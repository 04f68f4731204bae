//! Error taxonomy.
//!
//! Only `EngineError::InvalidImage` ever reaches the caller as a hard
//! failure. Classifier failures are consumed by the model-or-heuristic
//! selector, and degraded feature extraction lowers scorer confidence
//! instead of failing the request.
use thiserror::Error;

/// Request-level failures surfaced to the caller.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The input image was empty, undecodable or below the minimum size.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Failures of the optional trained classifier.
///
/// Consumed by the selector, which falls back to the heuristic scorers;
/// never surfaced to the caller.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier not loaded")]
    Unavailable,

    #[error("classifier invocation failed: {0}")]
    Invocation(String),

    #[error("classifier output outside contract: {0}")]
    InvalidOutput(String),
}

/// Parameter validation failures reported at analyzer construction time.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("{0} weights must sum to 1.0, got {1}")]
    WeightSum(&'static str, f32),

    #[error("band table '{0}' is invalid: {1}")]
    BandTable(&'static str, String),

    #[error("{0} must be within {1}: got {2}")]
    OutOfRange(&'static str, &'static str, f32),
}
