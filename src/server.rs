use crate::config::ServerConfig;
use crate::data::SlotSpec;
use crate::filter::filter_students;
use crate::report::{SlotSummary, summarize};
use crate::runner::{RunConfig, ScheduleRun, Seed, run_schedule};
use crate::schema::{Row, load_rooms, load_students};
use crate::strategy::Strategy;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of an allocation request. Rooms and students arrive as raw rows and
/// go through the column-alias resolution.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
    pub rooms: Vec<Row>,
    pub students: Vec<Row>,
    pub slots: Vec<SlotSpec>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default, alias = "max_courses_per_room")]
    pub max_courses_per_room: Option<usize>,
    #[serde(default)]
    pub seed: Option<Seed>,
    #[serde(default)]
    pub semesters: Vec<String>,
    #[serde(default)]
    pub courses: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResponse {
    #[serde(flatten)]
    pub run: ScheduleRun,
    pub summary: Vec<SlotSummary>,
}

type ApiError = (StatusCode, String);

fn bad_request(e: impl std::fmt::Display) -> ApiError {
    (StatusCode::BAD_REQUEST, e.to_string())
}

async fn allocate_handler(
    State(config): State<Arc<ServerConfig>>,
    Json(request): Json<AllocationRequest>,
) -> Result<Json<AllocationResponse>, ApiError> {
    let strategy = match request.strategy.as_deref() {
        Some(name) => name.parse::<Strategy>().map_err(bad_request)?,
        None => Strategy::default(),
    };
    let run_config = RunConfig {
        strategy,
        max_courses_per_room: request
            .max_courses_per_room
            .unwrap_or(config.default_max_courses),
        seed: request.seed,
    };

    let rooms = load_rooms(&request.rooms).map_err(bad_request)?;
    let students = load_students(&request.students).map_err(bad_request)?;
    info!(
        "Loaded {} rooms and {} student-course enrollments",
        rooms.len(),
        students.len()
    );

    let students = filter_students(students, &request.semesters, &request.courses);
    info!("Using {} enrollments after applying filters", students.len());

    let run = run_schedule(&rooms, students, &request.slots, &run_config).map_err(bad_request)?;
    if !run.spillover.is_empty() {
        warn!(
            "{} students could not be seated across the configured slots; consider adding slots or rooms",
            run.spillover.total_unplaced
        );
    }

    let summary = summarize(&request.slots, &run.schedule);
    Ok(Json(AllocationResponse { run, summary }))
}

pub fn router(config: ServerConfig) -> Router {
    Router::new()
        .route("/v1/exam/allocate", post(allocate_handler))
        .with_state(Arc::new(config))
}

pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, router(config)).await
}
