//! Workout repository - database operations for logged workouts

use chrono::{DateTime, Utc};
use fittrack_shared::WorkoutEntry;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Workout row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WorkoutRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub category: String,
    pub workout_name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight_kg: Decimal,
    pub duration_min: Decimal,
    pub calories_burned: Decimal,
    pub performed_at: DateTime<Utc>,
}

impl From<WorkoutRecord> for WorkoutEntry {
    fn from(r: WorkoutRecord) -> Self {
        WorkoutEntry {
            id: r.id,
            owner_id: r.owner_id,
            category: r.category,
            workout_name: r.workout_name,
            sets: r.sets,
            reps: r.reps,
            weight: r.weight_kg.to_f64().unwrap_or(0.0),
            duration: r.duration_min.to_f64().unwrap_or(0.0),
            calories_burned: r.calories_burned.to_f64().unwrap_or(0.0),
            date: r.performed_at,
        }
    }
}

/// Input for inserting a workout; calories are already estimated
#[derive(Debug, Clone)]
pub struct CreateWorkout {
    pub category: String,
    pub workout_name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight_kg: Decimal,
    pub duration_min: Decimal,
    pub calories_burned: Decimal,
    pub performed_at: DateTime<Utc>,
}

/// Per (year, month, category) totals
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MonthCategoryRow {
    pub year: i32,
    pub month: i32,
    pub category: String,
    pub workouts: i64,
    pub calories: Decimal,
}

const WORKOUT_COLUMNS: &str = "id, owner_id, category, workout_name, sets, reps, \
     weight_kg, duration_min, calories_burned, performed_at";

/// Workout repository
pub struct WorkoutRepository;

impl WorkoutRepository {
    /// Insert a batch of workouts in one transaction.
    ///
    /// Either every row is written or none is.
    pub async fn create_batch(
        db: &PgPool,
        owner_id: Uuid,
        inputs: &[CreateWorkout],
    ) -> sqlx::Result<Vec<WorkoutRecord>> {
        let mut tx = db.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());

        let insert = format!(
            r#"
            INSERT INTO workouts (
                id, owner_id, category, workout_name, sets, reps,
                weight_kg, duration_min, calories_burned, performed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            WORKOUT_COLUMNS
        );

        for input in inputs {
            let record = sqlx::query_as::<_, WorkoutRecord>(&insert)
                .bind(Uuid::new_v4())
                .bind(owner_id)
                .bind(&input.category)
                .bind(&input.workout_name)
                .bind(input.sets)
                .bind(input.reps)
                .bind(input.weight_kg)
                .bind(input.duration_min)
                .bind(input.calories_burned)
                .bind(input.performed_at)
                .fetch_one(&mut *tx)
                .await?;
            created.push(record);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Workouts with `start <= performed_at < end`, most recent first
    pub async fn get_in_range(
        db: &PgPool,
        owner_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> sqlx::Result<Vec<WorkoutRecord>> {
        sqlx::query_as::<_, WorkoutRecord>(&format!(
            r#"
            SELECT {}
            FROM workouts
            WHERE owner_id = $1 AND performed_at >= $2 AND performed_at < $3
            ORDER BY performed_at DESC, created_at DESC
            "#,
            WORKOUT_COLUMNS
        ))
        .bind(owner_id)
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await
    }

    /// Sum of calories burned with `start <= performed_at < end`
    pub async fn sum_calories_in_range(
        db: &PgPool,
        owner_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> sqlx::Result<Decimal> {
        sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(calories_burned), 0)
            FROM workouts
            WHERE owner_id = $1 AND performed_at >= $2 AND performed_at < $3
            "#,
        )
        .bind(owner_id)
        .bind(start)
        .bind(end)
        .fetch_one(db)
        .await
    }

    /// The owner's `limit` most recent workouts
    pub async fn get_recent(
        db: &PgPool,
        owner_id: Uuid,
        limit: i64,
    ) -> sqlx::Result<Vec<WorkoutRecord>> {
        sqlx::query_as::<_, WorkoutRecord>(&format!(
            r#"
            SELECT {}
            FROM workouts
            WHERE owner_id = $1
            ORDER BY performed_at DESC, created_at DESC
            LIMIT $2
            "#,
            WORKOUT_COLUMNS
        ))
        .bind(owner_id)
        .bind(limit)
        .fetch_all(db)
        .await
    }

    /// Totals grouped by UTC calendar month and category
    pub async fn monthly_category_totals(
        db: &PgPool,
        owner_id: Uuid,
    ) -> sqlx::Result<Vec<MonthCategoryRow>> {
        sqlx::query_as::<_, MonthCategoryRow>(
            r#"
            SELECT
                EXTRACT(YEAR FROM performed_at AT TIME ZONE 'UTC')::INT AS year,
                EXTRACT(MONTH FROM performed_at AT TIME ZONE 'UTC')::INT AS month,
                category,
                COUNT(*) AS workouts,
                COALESCE(SUM(calories_burned), 0) AS calories
            FROM workouts
            WHERE owner_id = $1
            GROUP BY 1, 2, category
            ORDER BY 1 DESC, 2 DESC, category
            "#,
        )
        .bind(owner_id)
        .fetch_all(db)
        .await
    }
}
