//! Workout plan API routes

use crate::auth::AuthOwner;
use crate::error::ApiError;
use crate::services::PlanService;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use fittrack_shared::types::{ApplyPlanRequest, CreatePlanRequest, RecordWorkoutsResponse};
use fittrack_shared::WorkoutPlan;
use uuid::Uuid;
use validator::Validate;

pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_plan).get(list_plans))
        .route("/:id/apply", post(apply_plan))
}

/// POST /api/v1/plans - Save a plan from structured workouts or text
async fn create_plan(
    State(state): State<AppState>,
    auth: AuthOwner,
    Json(req): Json<CreatePlanRequest>,
) -> Result<(StatusCode, Json<WorkoutPlan>), ApiError> {
    req.validate()?;
    let plan = PlanService::create_plan(state.db(), auth.owner_id, req).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /api/v1/plans - Owner's plans, newest first
async fn list_plans(
    State(state): State<AppState>,
    auth: AuthOwner,
) -> Result<Json<Vec<WorkoutPlan>>, ApiError> {
    Ok(Json(PlanService::list_plans(state.db(), auth.owner_id).await?))
}

/// POST /api/v1/plans/:id/apply - Log the plan's workouts on a day
async fn apply_plan(
    State(state): State<AppState>,
    auth: AuthOwner,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<(StatusCode, Json<RecordWorkoutsResponse>), ApiError> {
    let performed_at = apply_date(&body)?.unwrap_or_else(Utc::now);

    let created = PlanService::apply_plan(state.db(), auth.owner_id, id, performed_at).await?;
    Ok((StatusCode::CREATED, Json(RecordWorkoutsResponse { created })))
}

/// Date from an optional apply body; an empty body means "now"
fn apply_date(body: &[u8]) -> Result<Option<DateTime<Utc>>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let req: ApplyPlanRequest = serde_json::from_slice(body)
        .map_err(|e| ApiError::Validation(format!("Invalid apply request: {}", e)))?;
    Ok(req.date)
}
