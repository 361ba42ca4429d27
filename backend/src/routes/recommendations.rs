//! Recommendation API route

use crate::auth::AuthOwner;
use crate::error::ApiError;
use crate::services::RecommendationService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use fittrack_shared::types::GoalRecommendation;

pub fn recommendation_routes() -> Router<AppState> {
    Router::new().route("/", get(recommendations))
}

/// GET /api/v1/recommendations - Coaching for every active or future goal
async fn recommendations(
    State(state): State<AppState>,
    auth: AuthOwner,
) -> Result<Json<Vec<GoalRecommendation>>, ApiError> {
    Ok(Json(
        RecommendationService::recommendations(
            state.db(),
            auth.owner_id,
            state.coaching(),
            Utc::now(),
        )
        .await?,
    ))
}
