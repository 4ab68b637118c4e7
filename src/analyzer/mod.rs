//! Analyzer module - assessments, scoring and the pass orchestrator

pub mod assessments;
pub mod cancel;
pub mod engine;
pub mod scoring;

pub use cancel::CancellationToken;
pub use engine::{AnalysisEngine, PassState};
pub use scoring::ScoreCalculator;
