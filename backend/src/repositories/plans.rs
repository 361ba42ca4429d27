//! Workout plan repository
//!
//! Planned workouts are stored as a JSONB array of drafts.

use chrono::{DateTime, Utc};
use fittrack_shared::{WorkoutDraft, WorkoutPlan};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlanRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub workouts: Json<Vec<WorkoutDraft>>,
    pub created_at: DateTime<Utc>,
}

impl From<PlanRecord> for WorkoutPlan {
    fn from(r: PlanRecord) -> Self {
        WorkoutPlan {
            id: r.id,
            owner_id: r.owner_id,
            name: r.name,
            workouts: r.workouts.0,
            created_at: r.created_at,
        }
    }
}

pub struct PlanRepository;

impl PlanRepository {
    pub async fn create(
        db: &PgPool,
        owner_id: Uuid,
        name: &str,
        workouts: &[WorkoutDraft],
    ) -> sqlx::Result<PlanRecord> {
        sqlx::query_as::<_, PlanRecord>(
            r#"
            INSERT INTO workout_plans (id, owner_id, name, workouts)
            VALUES ($1, $2, $3, $4)
            RETURNING id, owner_id, name, workouts, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(name)
        .bind(Json(workouts))
        .fetch_one(db)
        .await
    }

    /// Owner's plans, newest first
    pub async fn list_for_owner(db: &PgPool, owner_id: Uuid) -> sqlx::Result<Vec<PlanRecord>> {
        sqlx::query_as::<_, PlanRecord>(
            r#"
            SELECT id, owner_id, name, workouts, created_at
            FROM workout_plans
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(db)
        .await
    }

    /// Plan by id, scoped to its owner
    pub async fn find_by_id(
        db: &PgPool,
        owner_id: Uuid,
        id: Uuid,
    ) -> sqlx::Result<Option<PlanRecord>> {
        sqlx::query_as::<_, PlanRecord>(
            r#"
            SELECT id, owner_id, name, workouts, created_at
            FROM workout_plans
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(db)
        .await
    }
}
