//! Meal API routes

use crate::auth::AuthOwner;
use crate::error::ApiError;
use crate::services::NutritionService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use fittrack_shared::types::{CreateMealRequest, DateQuery, MealsForDate, WeeklyNutrition};
use fittrack_shared::MealEntry;
use validator::Validate;

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(add_meal).get(meals_for_date))
        .route("/weekly", get(weekly_nutrition))
}

/// POST /api/v1/meals - Log a meal
async fn add_meal(
    State(state): State<AppState>,
    auth: AuthOwner,
    Json(req): Json<CreateMealRequest>,
) -> Result<(StatusCode, Json<MealEntry>), ApiError> {
    req.validate()?;
    let meal = NutritionService::add_meal(state.db(), auth.owner_id, req, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}

/// GET /api/v1/meals?date=YYYY-MM-DD - Meals of one day (default today)
async fn meals_for_date(
    State(state): State<AppState>,
    auth: AuthOwner,
    Query(query): Query<DateQuery>,
) -> Result<Json<MealsForDate>, ApiError> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    Ok(Json(
        NutritionService::meals_for_date(state.db(), auth.owner_id, date).await?,
    ))
}

/// GET /api/v1/meals/weekly - Intake over the trailing seven days
async fn weekly_nutrition(
    State(state): State<AppState>,
    auth: AuthOwner,
) -> Result<Json<WeeklyNutrition>, ApiError> {
    let today = Utc::now().date_naive();
    Ok(Json(
        NutritionService::weekly_nutrition(state.db(), auth.owner_id, today).await?,
    ))
}
