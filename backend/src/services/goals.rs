//! Goals service for calorie-burn goals and their progress
//!
//! Progress is never stored. It is recomputed from the workouts whose date
//! falls inside the goal window every time a goal is read.

use crate::error::ApiError;
use crate::repositories::{to_numeric, CreateGoal, GoalRepository, WorkoutRepository};
use chrono::NaiveDate;
use fittrack_shared::types::{CreateGoalRequest, GoalWithProgress};
use fittrack_shared::validation::validate_goal;
use fittrack_shared::{Goal, GoalState};
use rust_decimal::prelude::ToPrimitive;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

pub struct GoalsService;

impl GoalsService {
    /// Create a new goal
    pub async fn create_goal(
        pool: &PgPool,
        owner_id: Uuid,
        input: CreateGoalRequest,
    ) -> Result<Goal, ApiError> {
        validate_goal(
            &input.name,
            input.target_calories,
            input.start_date,
            input.end_date,
        )?;

        let record = GoalRepository::create(
            pool,
            CreateGoal {
                owner_id,
                name: input.name.trim().to_string(),
                target_calories: to_numeric("target calories", input.target_calories)?,
                start_date: input.start_date,
                end_date: input.end_date,
            },
        )
        .await?;

        info!(owner_id = %owner_id, goal_id = %record.id, "Created goal");
        Ok(Goal::from(record))
    }

    /// Every goal of the owner, expired ones included
    pub async fn goals_with_progress(
        pool: &PgPool,
        owner_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<GoalWithProgress>, ApiError> {
        let goals = GoalRepository::list_for_owner(pool, owner_id).await?;

        let mut out = Vec::with_capacity(goals.len());
        for record in goals {
            let goal = Goal::from(record);
            let burned = Self::calories_burned(pool, &goal, today).await?;
            out.push(Self::with_progress(&goal, burned, today));
        }
        Ok(out)
    }

    /// One goal with its progress
    pub async fn goal_with_progress(
        pool: &PgPool,
        owner_id: Uuid,
        goal_id: Uuid,
        today: NaiveDate,
    ) -> Result<GoalWithProgress, ApiError> {
        let goal: Goal = GoalRepository::find_by_id(pool, owner_id, goal_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))?
            .into();

        let burned = Self::calories_burned(pool, &goal, today).await?;
        Ok(Self::with_progress(&goal, burned, today))
    }

    /// Calories burned inside the goal window; zero for goals that have not
    /// started yet
    pub async fn calories_burned(
        pool: &PgPool,
        goal: &Goal,
        today: NaiveDate,
    ) -> Result<f64, ApiError> {
        if goal.state(today) == GoalState::Future {
            return Ok(0.0);
        }
        let (start, end) = goal.window();
        let sum = WorkoutRepository::sum_calories_in_range(pool, goal.owner_id, start, end).await?;
        Ok(sum.to_f64().unwrap_or(0.0))
    }

    /// Attach state and progress to a goal
    pub fn with_progress(goal: &Goal, calories_burned: f64, today: NaiveDate) -> GoalWithProgress {
        let state = goal.state(today);
        let burned = if state == GoalState::Future {
            0.0
        } else {
            calories_burned
        };

        GoalWithProgress {
            id: goal.id,
            name: goal.name.clone(),
            target_calories: goal.target_calories,
            start_date: goal.start_date,
            end_date: goal.end_date,
            state,
            total_calories_burned: burned,
            progress: Self::calculate_progress(burned, goal.target_calories),
        }
    }

    /// Percentage of the target reached, clamped to `[0, 100]`
    pub fn calculate_progress(calories_burned: f64, target_calories: f64) -> f64 {
        if !target_calories.is_finite() || target_calories <= 0.0 || !calories_burned.is_finite() {
            return 0.0;
        }
        (100.0 * calories_burned / target_calories).clamp(0.0, 100.0)
    }
}
