use thiserror::Error;

use crate::feasibility::FeasibilityReport;
use crate::validate::ValidationError;

/// Everything that can stop a solve before it produces a `SolveResult`.
/// Genuine infeasibility is *not* one of these — it's a normal
/// `SolveResult { status: Infeasible, .. }`.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("structural validation failed: {0}")]
    Invalid(#[from] ValidationError),

    #[error("feasibility pre-check failed: {0:?}")]
    FeasibilityFailed(FeasibilityReport),

    #[error("internal solver error: {0}")]
    Internal(#[from] anyhow::Error),
}
