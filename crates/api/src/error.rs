use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use sched_core::SolveError;

/// Maps `sched_core::SolveError` onto HTTP statuses: a feasibility failure
/// is a client-correctable 422 with the error list in the body, anything
/// internal is a 500. Infeasibility/timeout is not an error at all — it's
/// a 200 `SolveResult` with `status: "INFEASIBLE"`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

#[derive(Serialize)]
struct ApiErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<loader::LoaderError> for ApiError {
    fn from(err: loader::LoaderError) -> Self {
        ApiError {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: ApiErrorBody {
                message: err.to_string(),
                errors: vec![],
                warnings: vec![],
            },
        }
    }
}

impl From<SolveError> for ApiError {
    fn from(err: SolveError) -> Self {
        match err {
            SolveError::Invalid(e) => ApiError {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                body: ApiErrorBody {
                    message: e.to_string(),
                    errors: vec![],
                    warnings: vec![],
                },
            },
            SolveError::FeasibilityFailed(report) => ApiError {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                body: ApiErrorBody {
                    message: "feasibility pre-check failed".to_string(),
                    errors: report.errors,
                    warnings: report.warnings,
                },
            },
            SolveError::Internal(e) => ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: ApiErrorBody {
                    message: e.to_string(),
                    errors: vec![],
                    warnings: vec![],
                },
            },
        }
    }
}

impl From<base64::DecodeError> for ApiError {
    fn from(err: base64::DecodeError) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            body: ApiErrorBody {
                message: format!("invalid base64 in request body: {err}"),
                errors: vec![],
                warnings: vec![],
            },
        }
    }
}

impl From<std::string::FromUtf8Error> for ApiError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            body: ApiErrorBody {
                message: format!("request file is not valid UTF-8: {err}"),
                errors: vec![],
                warnings: vec![],
            },
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ApiErrorBody {
                message: err.to_string(),
                errors: vec![],
                warnings: vec![],
            },
        }
    }
}
