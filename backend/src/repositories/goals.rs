//! Goal repository
//!
//! Only the goal definition is stored; progress is derived on read.

use chrono::NaiveDate;
use fittrack_shared::Goal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GoalRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub target_calories: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<GoalRecord> for Goal {
    fn from(r: GoalRecord) -> Self {
        Goal {
            id: r.id,
            owner_id: r.owner_id,
            name: r.name,
            target_calories: r.target_calories.to_f64().unwrap_or(0.0),
            start_date: r.start_date,
            end_date: r.end_date,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateGoal {
    pub owner_id: Uuid,
    pub name: String,
    pub target_calories: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub struct GoalRepository;

impl GoalRepository {
    pub async fn create(db: &PgPool, input: CreateGoal) -> sqlx::Result<GoalRecord> {
        sqlx::query_as::<_, GoalRecord>(
            r#"
            INSERT INTO goals (id, owner_id, name, target_calories, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, owner_id, name, target_calories, start_date, end_date
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.owner_id)
        .bind(&input.name)
        .bind(input.target_calories)
        .bind(input.start_date)
        .bind(input.end_date)
        .fetch_one(db)
        .await
    }

    /// All of the owner's goals, earliest start first
    pub async fn list_for_owner(db: &PgPool, owner_id: Uuid) -> sqlx::Result<Vec<GoalRecord>> {
        sqlx::query_as::<_, GoalRecord>(
            r#"
            SELECT id, owner_id, name, target_calories, start_date, end_date
            FROM goals
            WHERE owner_id = $1
            ORDER BY start_date ASC, created_at ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(db)
        .await
    }

    /// Goal by id, scoped to its owner
    pub async fn find_by_id(
        db: &PgPool,
        owner_id: Uuid,
        id: Uuid,
    ) -> sqlx::Result<Option<GoalRecord>> {
        sqlx::query_as::<_, GoalRecord>(
            r#"
            SELECT id, owner_id, name, target_calories, start_date, end_date
            FROM goals
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(db)
        .await
    }
}
