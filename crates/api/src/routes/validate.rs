use axum::Json;
use serde::Serialize;
use types::ProblemData;
use utoipa::ToSchema;

use sched_core::SolveError;

#[derive(Serialize, ToSchema)]
pub struct ValidationReport {
    pub ok: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Runs structural validation and the feasibility pre-check without
/// solving, so a caller can check a problem is solvable before paying for
/// a `/v1/solve` round trip.
#[utoipa::path(
    post,
    path = "/v1/validate",
    request_body = ProblemData,
    responses(
        (status = 200, description = "Validation result", body = ValidationReport)
    )
)]
pub async fn validate_handler(Json(problem): Json<ProblemData>) -> Json<ValidationReport> {
    match sched_core::prepare(&problem) {
        Ok(prepared) => Json(ValidationReport {
            ok: true,
            errors: vec![],
            warnings: prepared.feasibility.warnings,
        }),
        Err(SolveError::Invalid(err)) => Json(ValidationReport {
            ok: false,
            errors: vec![err.to_string()],
            warnings: vec![],
        }),
        Err(SolveError::FeasibilityFailed(report)) => Json(ValidationReport {
            ok: false,
            errors: report.errors,
            warnings: report.warnings,
        }),
        Err(SolveError::Internal(err)) => Json(ValidationReport {
            ok: false,
            errors: vec![err.to_string()],
            warnings: vec![],
        }),
    }
}
