//! Dashboard API route

use crate::auth::AuthOwner;
use crate::error::ApiError;
use crate::services::DashboardService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use fittrack_shared::types::DailyDashboard;

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(daily_dashboard))
}

/// GET /api/v1/dashboard - Today's totals and the trailing week
async fn daily_dashboard(
    State(state): State<AppState>,
    auth: AuthOwner,
) -> Result<Json<DailyDashboard>, ApiError> {
    let today = Utc::now().date_naive();
    Ok(Json(
        DashboardService::daily_dashboard(state.db(), auth.owner_id, today).await?,
    ))
}
