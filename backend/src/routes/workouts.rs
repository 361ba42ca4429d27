//! Workout API routes

use crate::auth::AuthOwner;
use crate::error::ApiError;
use crate::services::{DashboardService, WorkoutService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use fittrack_shared::types::{
    DateQuery, MonthDetail, MonthGroup, ParseWorkoutsResponse, RecordWorkoutsRequest,
    RecordWorkoutsResponse, WorkoutsForDate,
};
use validator::Validate;

pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(record_workouts).get(workouts_for_date))
        .route("/parse", post(parse_workouts))
        .route("/monthly", get(monthly_summary))
        .route("/monthly/:year/:month", get(monthly_detail))
}

/// POST /api/v1/workouts - Parse and store a workout text block
async fn record_workouts(
    State(state): State<AppState>,
    auth: AuthOwner,
    Json(req): Json<RecordWorkoutsRequest>,
) -> Result<(StatusCode, Json<RecordWorkoutsResponse>), ApiError> {
    req.validate()?;

    let created = WorkoutService::record_workouts(
        state.db(),
        auth.owner_id,
        &req.workout_string,
        req.delimiter,
        req.date.unwrap_or_else(Utc::now),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(RecordWorkoutsResponse { created })))
}

/// POST /api/v1/workouts/parse - Parse a workout block without storing it
async fn parse_workouts(
    _auth: AuthOwner,
    Json(req): Json<RecordWorkoutsRequest>,
) -> Result<Json<ParseWorkoutsResponse>, ApiError> {
    req.validate()?;
    Ok(Json(WorkoutService::parse(&req.workout_string, req.delimiter)?))
}

/// GET /api/v1/workouts?date=YYYY-MM-DD - Workouts of one day (default today)
async fn workouts_for_date(
    State(state): State<AppState>,
    auth: AuthOwner,
    Query(query): Query<DateQuery>,
) -> Result<Json<WorkoutsForDate>, ApiError> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    Ok(Json(
        WorkoutService::workouts_for_date(state.db(), auth.owner_id, date).await?,
    ))
}

/// GET /api/v1/workouts/monthly - Per-month totals, newest first
async fn monthly_summary(
    State(state): State<AppState>,
    auth: AuthOwner,
) -> Result<Json<Vec<MonthGroup>>, ApiError> {
    Ok(Json(
        DashboardService::monthly_summary(state.db(), auth.owner_id).await?,
    ))
}

/// GET /api/v1/workouts/monthly/:year/:month - One month in detail
async fn monthly_detail(
    State(state): State<AppState>,
    auth: AuthOwner,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<Json<MonthDetail>, ApiError> {
    Ok(Json(
        DashboardService::monthly_detail(state.db(), auth.owner_id, year, month).await?,
    ))
}
