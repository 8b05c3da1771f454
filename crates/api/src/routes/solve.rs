use std::collections::HashMap;

use axum::{extract::State, Json};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use utoipa::ToSchema;

use types::SolveResult;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SolveFile {
    pub name: String,
    pub content_base64: String,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    pub files: Vec<SolveFile>,
    #[serde(default = "default_time_limit_sec")]
    pub time_limit_sec: u64,
    #[serde(default)]
    pub optimize_gaps: bool,
    #[serde(default = "default_workers")]
    pub workers: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_time_limit_sec() -> u64 {
    60
}

fn default_workers() -> u32 {
    8
}

fn default_seed() -> u64 {
    1
}

/// Decodes the uploaded CSVs, validates and feasibility-checks the
/// problem, then runs the MILP solve on a blocking thread — a solve is
/// synchronous and CPU-bound, so it must not run on the async reactor.
#[utoipa::path(
    post,
    path = "/v1/solve",
    request_body = SolveRequest,
    responses(
        (status = 200, description = "Solve completed (status may still be INFEASIBLE)", body = types::SolveResult),
        (status = 422, description = "Input or feasibility error"),
        (status = 500, description = "Internal solver error")
    )
)]
pub async fn solve(
    State(state): State<AppState>,
    Json(req): Json<SolveRequest>,
) -> Result<Json<SolveResult>, ApiError> {
    let mut files: HashMap<String, String> = HashMap::with_capacity(req.files.len());
    for f in req.files {
        let bytes = STANDARD.decode(f.content_base64)?;
        let text = String::from_utf8(bytes)?;
        files.insert(f.name, text);
    }

    let problem = loader::load_from_files(&files)?;
    let params = types::SolveParams {
        time_limit_sec: req.time_limit_sec,
        optimize_gaps: req.optimize_gaps,
        workers: req.workers,
        seed: req.seed,
    };

    let result = tokio::task::spawn_blocking(move || -> Result<SolveResult, sched_core::SolveError> {
        let prepared = sched_core::prepare(&problem)?;
        sched_core::Solver::solve(&*state.solver, &prepared, &params)
    })
    .await
    .map_err(|join_err| anyhow::anyhow!(join_err))??;

    Ok(Json(result))
}
