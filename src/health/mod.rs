//! Heuristic health scorers.
//!
//! Three independent scorers read the same [`FeatureSet`](crate::features::FeatureSet):
//! body condition ([`condition`]), lameness ([`lameness`]) and visible
//! symptoms ([`symptoms`]). They share the ordered-band-table machinery in
//! [`bands`] and are combined, together with the vitals checks, into a
//! single assessment with a penalty-based 0-100 score ([`assessment`]).
//!
//! All thresholds and weights live in per-scorer parameter structs so the
//! ladders are data, validated once at analyzer construction.

pub mod assessment;
pub mod bands;
pub mod condition;
pub mod lameness;
pub mod symptoms;
pub mod vitals;

pub use assessment::{AssessmentSource, HealthAssessment, HealthStatus, PenaltyParams};
pub use condition::{score_body_condition, BodyConditionResult, ConditionParams};
pub use lameness::{detect_lameness, LamenessParams, LamenessResult, LamenessSeverity, Side};
pub use symptoms::{detect_symptoms, Severity, SymptomKind, SymptomParams, SymptomReport};
pub use vitals::{assess_vitals, Species, Vitals, VitalsRanges, VitalsReport};
