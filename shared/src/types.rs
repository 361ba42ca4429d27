//! API request and response types

use crate::models::{GoalState, MealEntry, WorkoutDraft, WorkoutEntry};
use crate::workout_text::Delimiter;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    /// 1-indexed workout unit for malformed text input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Optional `?date=YYYY-MM-DD` query parameter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

// ============================================================================
// Workouts
// ============================================================================

/// Workout text block to parse or record
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordWorkoutsRequest {
    #[validate(length(max = 20000, message = "Workout text cannot exceed 20000 characters"))]
    pub workout_string: String,
    #[serde(default)]
    pub delimiter: Delimiter,
    /// Defaults to the time of the request
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseWorkoutsResponse {
    pub workouts: Vec<WorkoutDraft>,
    pub total_calories: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordWorkoutsResponse {
    pub created: Vec<WorkoutEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutsForDate {
    pub date: NaiveDate,
    pub workouts: Vec<WorkoutEntry>,
    pub total_calories_burned: f64,
}

// ============================================================================
// Dashboard
// ============================================================================

/// Calories burned on one day of the weekly series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTotal {
    pub date: NaiveDate,
    /// Day-of-month ordinal, e.g. `15th`
    pub label: String,
    pub calories_burned: f64,
}

/// Pie-chart slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub id: usize,
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyDashboard {
    pub total_calories_burnt: f64,
    pub total_workouts: i64,
    pub avg_calories_burnt_per_workout: f64,
    pub weekly_series: Vec<DayTotal>,
    pub category_breakdown: Vec<CategorySlice>,
}

/// Workout count per category
pub type CategoryCounts = std::collections::BTreeMap<String, i64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGroup {
    pub year: i32,
    pub month: u32,
    pub total_workouts: i64,
    pub total_calories_burned: f64,
    pub category_breakdown: CategoryCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthDetail {
    pub year: i32,
    pub month: u32,
    pub total_workouts: i64,
    pub total_calories_burned: f64,
    pub category_breakdown: CategoryCounts,
    /// Most recent first
    pub workouts: Vec<WorkoutEntry>,
}

// ============================================================================
// Goals & recommendations
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    #[validate(length(max = 200, message = "Goal name cannot exceed 200 characters"))]
    pub name: String,
    pub target_calories: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalWithProgress {
    pub id: Uuid,
    pub name: String,
    pub target_calories: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub state: GoalState,
    pub total_calories_burned: f64,
    /// Percentage in `[0, 100]`
    pub progress: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecommendationKind {
    Congratulation,
    WorkoutVolume,
    IntakeReduction,
    Pacing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub message: String,
}

impl Recommendation {
    pub fn new(kind: RecommendationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRecommendation {
    pub goal_id: Uuid,
    pub goal_name: String,
    pub calories_burned: f64,
    pub target_calories: f64,
    pub recommendations: Vec<Recommendation>,
}

// ============================================================================
// Nutrition
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    #[validate(length(min = 1, max = 200, message = "Meal name must be 1-200 characters"))]
    pub name: String,
    #[validate(range(min = 0.0, max = 50000.0, message = "Calories must be between 0 and 50000"))]
    pub calories: f64,
    /// Defaults to the time of the request
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealsForDate {
    pub date: NaiveDate,
    pub meals: Vec<MealEntry>,
    pub total_calories: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyNutrition {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_calories: f64,
    pub meal_count: i64,
    pub days_with_meals: i64,
    pub average_daily_calories: f64,
}

// ============================================================================
// Plans
// ============================================================================

/// Plan workouts come either structured or as a workout text block
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequest {
    #[validate(length(min = 1, max = 200, message = "Plan name must be 1-200 characters"))]
    pub name: String,
    pub workouts: Option<Vec<WorkoutDraft>>,
    pub workout_string: Option<String>,
    #[serde(default)]
    pub delimiter: Delimiter,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyPlanRequest {
    pub date: Option<DateTime<Utc>>,
}
