#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod analyzer;
pub mod error;
pub mod image;
pub mod types;

// Domain modules – public, but considered unstable internals.
pub mod behavior;
pub mod classifier;
pub mod features;
pub mod health;
pub mod identify;
pub mod recommend;

// --- High-level re-exports -------------------------------------------------

// Main entry points: analyzer + report envelope.
pub use crate::analyzer::{Analyzer, AnalyzerParams};
pub use crate::types::{AnalysisInput, AssessmentReport};

// The boundary error and the injectable classifier capability.
pub use crate::classifier::{ClassifierOutput, HealthClassifier};
pub use crate::error::EngineError;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use herd_analyzer::prelude::*;
///
/// # fn main() {
/// let (w, h) = (640usize, 480usize);
/// let rgb = vec![96u8; w * h * 3];
/// let img = ImageRgb8 { w, h, stride: 3 * w, data: &rgb };
///
/// let analyzer = Analyzer::new(AnalyzerParams::default()).unwrap();
/// let report = analyzer.process(img, &AnalysisInput::default()).unwrap();
/// println!(
///     "score={} latency_ms={:.3}",
///     report.health.health_score, report.latency_ms
/// );
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageRgb8;
    pub use crate::{AnalysisInput, Analyzer, AnalyzerParams, AssessmentReport};
}
