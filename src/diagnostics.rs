//! Fault reporting for assessments that fail during a pass.
//!
//! The engine never lets one assessment take down a report. When an assessment
//! panics, returns an error or produces a malformed result, the engine drops that
//! result and hands an [`AssessmentFault`] to the installed [`Diagnostics`]
//! collaborator, if any.

use crate::error::AssessmentError;
use crate::AssessmentId;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum FaultKind {
    /// The assessment panicked
    Panicked { message: String },
    /// The assessment returned an error
    Failed { error: String },
    /// The result broke an invariant of the report
    Malformed { reason: String },
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FaultKind::Panicked { message } => write!(f, "panicked: {}", message),
            FaultKind::Failed { error } => write!(f, "failed: {}", error),
            FaultKind::Malformed { reason } => write!(f, "malformed result: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentFault {
    pub assessment: AssessmentId,
    #[serde(flatten)]
    pub kind: FaultKind,
}

impl AssessmentFault {
    pub fn panicked(assessment: AssessmentId, message: impl Into<String>) -> Self {
        Self {
            assessment,
            kind: FaultKind::Panicked {
                message: message.into(),
            },
        }
    }

    pub fn failed(assessment: AssessmentId, error: &AssessmentError) -> Self {
        Self {
            assessment,
            kind: FaultKind::Failed {
                error: error.to_string(),
            },
        }
    }

    pub fn malformed(assessment: AssessmentId, reason: impl Into<String>) -> Self {
        Self {
            assessment,
            kind: FaultKind::Malformed {
                reason: reason.into(),
            },
        }
    }
}

impl std::fmt::Display for AssessmentFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "assessment {} {}", self.assessment, self.kind)
    }
}

/// Receiver of assessment faults. Shared across passes, so implementations
/// must be thread safe.
pub trait Diagnostics: Send + Sync {
    fn record(&self, fault: AssessmentFault);
}

/// Logs every fault at `warn`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&self, fault: AssessmentFault) {
        tracing::warn!(assessment = %fault.assessment, "{}", fault.kind);
    }
}

/// Keeps faults in memory for later inspection
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    faults: Mutex<Vec<AssessmentFault>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Faults recorded so far, oldest first
    pub fn faults(&self) -> Vec<AssessmentFault> {
        self.lock().clone()
    }

    /// Remove and return the recorded faults
    pub fn take(&self) -> Vec<AssessmentFault> {
        std::mem::take(&mut *self.lock())
    }

    /// Lock the fault list; a poisoned lock still holds a valid list
    fn lock(&self) -> MutexGuard<'_, Vec<AssessmentFault>> {
        self.faults.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn record(&self, fault: AssessmentFault) {
        self.lock().push(fault);
    }
}
