//! Meal repository

use chrono::{DateTime, Utc};
use fittrack_shared::MealEntry;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MealRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub calories: Decimal,
    pub eaten_at: DateTime<Utc>,
}

impl From<MealRecord> for MealEntry {
    fn from(r: MealRecord) -> Self {
        MealEntry {
            id: r.id,
            owner_id: r.owner_id,
            name: r.name,
            calories: r.calories.to_f64().unwrap_or(0.0),
            date: r.eaten_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMeal {
    pub owner_id: Uuid,
    pub name: String,
    pub calories: Decimal,
    pub eaten_at: DateTime<Utc>,
}

pub struct MealRepository;

impl MealRepository {
    pub async fn create(db: &PgPool, input: CreateMeal) -> sqlx::Result<MealRecord> {
        sqlx::query_as::<_, MealRecord>(
            r#"
            INSERT INTO meals (id, owner_id, name, calories, eaten_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, name, calories, eaten_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.owner_id)
        .bind(&input.name)
        .bind(input.calories)
        .bind(input.eaten_at)
        .fetch_one(db)
        .await
    }

    /// Meals with `start <= eaten_at < end`, oldest first
    pub async fn get_in_range(
        db: &PgPool,
        owner_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> sqlx::Result<Vec<MealRecord>> {
        sqlx::query_as::<_, MealRecord>(
            r#"
            SELECT id, owner_id, name, calories, eaten_at
            FROM meals
            WHERE owner_id = $1 AND eaten_at >= $2 AND eaten_at < $3
            ORDER BY eaten_at ASC
            "#,
        )
        .bind(owner_id)
        .bind(start)
        .bind(end)
        .fetch_all(db)
        .await
    }

    pub async fn sum_calories_in_range(
        db: &PgPool,
        owner_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> sqlx::Result<Decimal> {
        sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(calories), 0)
            FROM meals
            WHERE owner_id = $1 AND eaten_at >= $2 AND eaten_at < $3
            "#,
        )
        .bind(owner_id)
        .bind(start)
        .bind(end)
        .fetch_one(db)
        .await
    }

    /// The owner's `limit` most recent meals
    pub async fn get_recent(db: &PgPool, owner_id: Uuid, limit: i64) -> sqlx::Result<Vec<MealRecord>> {
        sqlx::query_as::<_, MealRecord>(
            r#"
            SELECT id, owner_id, name, calories, eaten_at
            FROM meals
            WHERE owner_id = $1
            ORDER BY eaten_at DESC
            LIMIT $2
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .fetch_all(db)
        .await
    }
}
