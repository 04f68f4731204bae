//! Analyzer: validated configuration plus the end-to-end pipeline.
//!
//! Modules
//! - [`params`] – every weight, band table and threshold in one immutable,
//!   startup-validated structure.
//! - `pipeline` – the [`Analyzer`] implementation (validate → extract →
//!   parallel scorers → select → identify → report).

pub mod params;
mod pipeline;

pub use params::AnalyzerParams;
pub use pipeline::Analyzer;
