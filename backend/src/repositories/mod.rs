//! Database repositories
//!
//! Unit structs with async functions over `&PgPool`. Rows are `FromRow`
//! records with `NUMERIC` columns as `Decimal`; conversion into the shared
//! `f64` models happens through `From` impls.

pub mod goals;
pub mod meals;
pub mod plans;
pub mod workouts;

use fittrack_shared::{DomainError, DomainResult};
use rust_decimal::Decimal;

pub use goals::{CreateGoal, GoalRecord, GoalRepository};
pub use meals::{CreateMeal, MealRecord, MealRepository};
pub use plans::{PlanRecord, PlanRepository};
pub use workouts::{CreateWorkout, MonthCategoryRow, WorkoutRecord, WorkoutRepository};

/// Convert a validated quantity into a `NUMERIC` value rounded to cents
pub fn to_numeric(field: &str, value: f64) -> DomainResult<Decimal> {
    Decimal::try_from(value)
        .map(|d| d.round_dp(2))
        .map_err(|_| DomainError::measurement(format!("{} {} cannot be stored", field, value)))
}
