//! Error types for the analysis engine

use thiserror::Error;

/// A pass was aborted through its [`CancellationToken`](crate::analyzer::CancellationToken).
///
/// Not a failure: the host simply gets no report for the superseded pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("analysis pass cancelled")]
pub struct Cancelled;

/// Reasons an individual assessment could not produce a result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    /// A research query the assessment depends on yielded nothing usable
    #[error("missing research data: {0}")]
    MissingResearch(&'static str),

    /// The assessment computed a value it cannot map onto its threshold table
    #[error("unscorable measurement {value} for {what}")]
    Unscorable { what: &'static str, value: f64 },

    /// Anything else an assessment wants to surface as a fault
    #[error("{0}")]
    Internal(String),
}
