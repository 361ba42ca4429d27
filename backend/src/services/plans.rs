//! Workout plan service
//!
//! A plan is a named list of drafts. Applying it logs each draft as a new
//! workout, with calories estimated at apply time.

use crate::error::ApiError;
use crate::repositories::PlanRepository;
use crate::services::workouts::WorkoutService;
use chrono::{DateTime, Utc};
use fittrack_shared::types::CreatePlanRequest;
use fittrack_shared::validation::validate_plan_workouts;
use fittrack_shared::{parse_workout_text, WorkoutDraft, WorkoutEntry, WorkoutPlan};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

pub struct PlanService;

impl PlanService {
    /// Resolve the plan's workouts from structured input or workout text
    pub fn resolve_workouts(input: &CreatePlanRequest) -> Result<Vec<WorkoutDraft>, ApiError> {
        let workouts = match (&input.workouts, &input.workout_string) {
            (Some(_), Some(_)) => {
                return Err(ApiError::Validation(
                    "Provide either workouts or workoutString, not both".to_string(),
                ))
            }
            (Some(workouts), None) => workouts.clone(),
            (None, Some(text)) => parse_workout_text(text, input.delimiter)?,
            (None, None) => {
                return Err(ApiError::Validation(
                    "A plan needs workouts or a workoutString".to_string(),
                ))
            }
        };

        validate_plan_workouts(&workouts)?;
        Ok(workouts)
    }

    pub async fn create_plan(
        pool: &PgPool,
        owner_id: Uuid,
        input: CreatePlanRequest,
    ) -> Result<WorkoutPlan, ApiError> {
        let workouts = Self::resolve_workouts(&input)?;
        let record = PlanRepository::create(pool, owner_id, input.name.trim(), &workouts).await?;

        info!(
            owner_id = %owner_id,
            plan_id = %record.id,
            workouts = workouts.len(),
            "Created workout plan"
        );
        Ok(WorkoutPlan::from(record))
    }

    /// Owner's plans, newest first
    pub async fn list_plans(pool: &PgPool, owner_id: Uuid) -> Result<Vec<WorkoutPlan>, ApiError> {
        Ok(PlanRepository::list_for_owner(pool, owner_id)
            .await?
            .into_iter()
            .map(WorkoutPlan::from)
            .collect())
    }

    /// Log every planned workout at `performed_at`, all or nothing.
    ///
    /// Plans of other owners are reported as not found.
    pub async fn apply_plan(
        pool: &PgPool,
        owner_id: Uuid,
        plan_id: Uuid,
        performed_at: DateTime<Utc>,
    ) -> Result<Vec<WorkoutEntry>, ApiError> {
        let plan: WorkoutPlan = PlanRepository::find_by_id(pool, owner_id, plan_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Workout plan not found".to_string()))?
            .into();

        WorkoutService::record_drafts(pool, owner_id, &plan.workouts, performed_at).await
    }
}
