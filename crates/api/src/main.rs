mod error;
mod state;
mod telemetry;
pub mod routes {
    pub mod health;
    pub mod solve;
    pub mod validate;
}

use axum::{
    routing::{get, post},
    Router,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health,
        routes::solve::solve,
        routes::validate::validate_handler,
    ),
    components(schemas(
        types::Section, types::Faculty, types::Course, types::SectionCourseRequirement,
        types::FacultyCourseAssignment, types::Room, types::DayPeriod, types::ProblemData,
        types::SolveParams, types::SolveResult, types::SolveStatus, types::ScheduleEntry,
        types::ClassKind,
        routes::solve::SolveFile, routes::solve::SolveRequest,
        routes::validate::ValidationReport,
    )),
    tags(
        (name = "timetable", description = "University timetable solving API")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let app_state = state::AppState::new_default();

    let app = Router::new()
        .route("/v1/health", get(routes::health::health))
        .route("/v1/solve", post(routes::solve::solve))
        .route("/v1/validate", post(routes::validate::validate_handler))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(telemetry::stack())
        .with_state(app_state);

    let port = std::env::var("TIMETABLE__SERVER__PORT").unwrap_or_else(|_| "8080".into());
    let addr: std::net::SocketAddr = format!("0.0.0.0:{}", port)
        .parse()
        .expect("invalid listen addr");
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
