//! Goal API routes

use crate::auth::AuthOwner;
use crate::error::ApiError;
use crate::services::GoalsService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use fittrack_shared::types::{CreateGoalRequest, GoalWithProgress};
use uuid::Uuid;
use validator::Validate;

pub fn goal_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_goal).get(list_goals))
        .route("/:id", get(get_goal))
}

/// POST /api/v1/goals - Create a calorie-burn goal
async fn create_goal(
    State(state): State<AppState>,
    auth: AuthOwner,
    Json(req): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<GoalWithProgress>), ApiError> {
    req.validate()?;

    let goal = GoalsService::create_goal(state.db(), auth.owner_id, req).await?;
    let today = Utc::now().date_naive();
    let burned = GoalsService::calories_burned(state.db(), &goal, today).await?;

    Ok((
        StatusCode::CREATED,
        Json(GoalsService::with_progress(&goal, burned, today)),
    ))
}

/// GET /api/v1/goals - All goals with progress
async fn list_goals(
    State(state): State<AppState>,
    auth: AuthOwner,
) -> Result<Json<Vec<GoalWithProgress>>, ApiError> {
    let today = Utc::now().date_naive();
    Ok(Json(
        GoalsService::goals_with_progress(state.db(), auth.owner_id, today).await?,
    ))
}

/// GET /api/v1/goals/:id - One goal with progress
async fn get_goal(
    State(state): State<AppState>,
    auth: AuthOwner,
    Path(id): Path<Uuid>,
) -> Result<Json<GoalWithProgress>, ApiError> {
    let today = Utc::now().date_naive();
    Ok(Json(
        GoalsService::goal_with_progress(state.db(), auth.owner_id, id, today).await?,
    ))
}
