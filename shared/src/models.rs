//! Data models for the FitTrack application

use crate::calendar::{day_window, start_of_day};
use crate::calories::estimate_calories;
use crate::errors::{DomainError, DomainResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A workout described by the user but not yet dated or estimated.
///
/// Produced by the text parser and stored as-is inside workout plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDraft {
    pub category: String,
    pub workout_name: String,
    pub sets: i32,
    pub reps: i32,
    /// Weight in kg
    pub weight: f64,
    /// Duration in minutes
    pub duration: f64,
}

impl WorkoutDraft {
    /// Reject negative counts and negative or non-finite quantities
    pub fn validate(&self) -> DomainResult<()> {
        if self.category.trim().is_empty() {
            return Err(DomainError::measurement("category cannot be empty"));
        }
        if self.workout_name.trim().is_empty() {
            return Err(DomainError::measurement("workout name cannot be empty"));
        }
        if self.sets < 0 || self.reps < 0 {
            return Err(DomainError::measurement(format!(
                "{}: sets and reps cannot be negative",
                self.workout_name
            )));
        }
        estimate_calories(self.duration, self.weight).map(|_| ())
    }

    pub fn estimated_calories(&self) -> DomainResult<f64> {
        estimate_calories(self.duration, self.weight)
    }
}

/// A logged workout with its derived calorie expenditure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntry {
    pub id: Uuid,
    #[serde(skip_serializing, default)]
    pub owner_id: Uuid,
    pub category: String,
    pub workout_name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub duration: f64,
    pub calories_burned: f64,
    pub date: DateTime<Utc>,
}

/// A logged meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    pub id: Uuid,
    #[serde(skip_serializing, default)]
    pub owner_id: Uuid,
    pub name: String,
    pub calories: f64,
    pub date: DateTime<Utc>,
}

/// Calorie-burn goal over a range of whole days
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Uuid,
    #[serde(skip_serializing, default)]
    pub owner_id: Uuid,
    pub name: String,
    pub target_calories: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Goal {
    /// Lifecycle state of the goal on `today`
    pub fn state(&self, today: NaiveDate) -> GoalState {
        if self.end_date < today {
            GoalState::Expired
        } else if self.start_date > today {
            GoalState::Future
        } else {
            GoalState::Active
        }
    }

    /// Half-open instant range `[start_date 00:00, end_date + 1 day 00:00)`
    pub fn window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let (_, end) = day_window(self.end_date);
        (start_of_day(self.start_date), end)
    }
}

/// Goal lifecycle relative to the current day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalState {
    Active,
    Expired,
    Future,
}

/// Reusable list of workouts that can be applied to any day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub id: Uuid,
    #[serde(skip_serializing, default)]
    pub owner_id: Uuid,
    pub name: String,
    pub workouts: Vec<WorkoutDraft>,
    pub created_at: DateTime<Utc>,
}
