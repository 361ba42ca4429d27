//! Input validation functions
//!
//! Request bodies carry `validator` derives for simple shape checks; the
//! functions here cover the rules that need domain context and map onto
//! [`DomainError`] variants.

use crate::errors::{DomainError, DomainResult};
use crate::models::WorkoutDraft;
use chrono::NaiveDate;

/// Upper bound for a single meal entry
pub const MAX_MEAL_CALORIES: f64 = 50_000.0;

/// Largest weight accepted for one workout entry, in kg
pub const MAX_WEIGHT_KG: f64 = 1_000_000.0;

/// Largest duration accepted for one workout entry, in minutes
pub const MAX_DURATION_MINUTES: f64 = 1_000_000.0;

/// Largest estimate a single workout may produce; stays inside `NUMERIC(12, 2)`
pub const MAX_WORKOUT_CALORIES: f64 = 9_999_999_999.0;

/// Largest goal target; stays inside `NUMERIC(12, 2)`
pub const MAX_TARGET_CALORIES: f64 = 9_999_999_999.0;

/// Validate goal fields before creation
pub fn validate_goal(
    name: &str,
    target_calories: f64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::goal("name cannot be empty"));
    }
    if !target_calories.is_finite() || target_calories <= 0.0 {
        return Err(DomainError::goal(
            "target calories must be a positive number",
        ));
    }
    if target_calories > MAX_TARGET_CALORIES {
        return Err(DomainError::goal(format!(
            "target calories cannot exceed {}",
            MAX_TARGET_CALORIES
        )));
    }
    if end_date < start_date {
        return Err(DomainError::goal("end date cannot be before start date"));
    }
    Ok(())
}

/// Validate a meal's calorie value
pub fn validate_meal_calories(calories: f64) -> DomainResult<()> {
    if !calories.is_finite() {
        return Err(DomainError::measurement("calories must be a valid number"));
    }
    if calories < 0.0 {
        return Err(DomainError::measurement("calories cannot be negative"));
    }
    if calories > MAX_MEAL_CALORIES {
        return Err(DomainError::measurement("calorie value unreasonably high"));
    }
    Ok(())
}

/// Validate every workout of a plan; a plan needs at least one
pub fn validate_plan_workouts(workouts: &[WorkoutDraft]) -> DomainResult<()> {
    if workouts.is_empty() {
        return Err(DomainError::measurement(
            "a plan needs at least one workout",
        ));
    }
    workouts.iter().try_for_each(WorkoutDraft::validate)
}

/// Reject a workout quantity above `max`
pub fn validate_quantity(field: &str, value: f64, max: f64) -> DomainResult<()> {
    if value > max {
        return Err(DomainError::measurement(format!(
            "{} cannot exceed {}",
            field, max
        )));
    }
    Ok(())
}

/// Validate a calendar month number
pub fn validate_month(month: u32) -> Result<(), String> {
    if !(1..=12).contains(&month) {
        return Err(format!("Month must be between 1 and 12, got {}", month));
    }
    Ok(())
}
