//! Workout logging service
//!
//! Text is parsed and every entry estimated before anything is written, so
//! a bad unit anywhere in the block leaves storage untouched.

use crate::error::ApiError;
use crate::repositories::{to_numeric, CreateWorkout, WorkoutRepository};
use chrono::{DateTime, NaiveDate, Utc};
use fittrack_shared::calendar::day_window;
use fittrack_shared::types::{ParseWorkoutsResponse, WorkoutsForDate};
use fittrack_shared::{parse_workout_text, Delimiter, DomainError, WorkoutDraft, WorkoutEntry};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

pub struct WorkoutService;

impl WorkoutService {
    /// Parse a workout block without storing it
    pub fn parse(raw: &str, delimiter: Delimiter) -> Result<ParseWorkoutsResponse, ApiError> {
        let workouts = parse_workout_text(raw, delimiter)?;
        let total_calories = workouts
            .iter()
            .map(WorkoutDraft::estimated_calories)
            .sum::<Result<f64, DomainError>>()?;

        Ok(ParseWorkoutsResponse {
            workouts,
            total_calories,
        })
    }

    /// Estimate calories for each draft and date them at `performed_at`
    pub fn prepare_batch(
        drafts: &[WorkoutDraft],
        performed_at: DateTime<Utc>,
    ) -> Result<Vec<CreateWorkout>, ApiError> {
        drafts
            .iter()
            .map(|draft| -> Result<CreateWorkout, ApiError> {
                draft.validate()?;
                Ok(CreateWorkout {
                    category: draft.category.clone(),
                    workout_name: draft.workout_name.clone(),
                    sets: draft.sets,
                    reps: draft.reps,
                    weight_kg: to_numeric("weight", draft.weight)?,
                    duration_min: to_numeric("duration", draft.duration)?,
                    calories_burned: to_numeric("calories", draft.estimated_calories()?)?,
                    performed_at,
                })
            })
            .collect()
    }

    /// Parse, estimate and store a workout block as one batch
    pub async fn record_workouts(
        pool: &PgPool,
        owner_id: Uuid,
        raw: &str,
        delimiter: Delimiter,
        performed_at: DateTime<Utc>,
    ) -> Result<Vec<WorkoutEntry>, ApiError> {
        let drafts = parse_workout_text(raw, delimiter)?;
        Self::record_drafts(pool, owner_id, &drafts, performed_at).await
    }

    /// Store already-structured drafts as one batch
    pub async fn record_drafts(
        pool: &PgPool,
        owner_id: Uuid,
        drafts: &[WorkoutDraft],
        performed_at: DateTime<Utc>,
    ) -> Result<Vec<WorkoutEntry>, ApiError> {
        let batch = Self::prepare_batch(drafts, performed_at)?;
        let records = WorkoutRepository::create_batch(pool, owner_id, &batch).await?;

        info!(
            owner_id = %owner_id,
            count = records.len(),
            "Recorded workouts"
        );

        Ok(records.into_iter().map(WorkoutEntry::from).collect())
    }

    /// The day's workouts, most recent first, with their calorie total
    pub async fn workouts_for_date(
        pool: &PgPool,
        owner_id: Uuid,
        date: NaiveDate,
    ) -> Result<WorkoutsForDate, ApiError> {
        let (start, end) = day_window(date);
        let workouts: Vec<WorkoutEntry> = WorkoutRepository::get_in_range(pool, owner_id, start, end)
            .await?
            .into_iter()
            .map(WorkoutEntry::from)
            .collect();
        let total_calories_burned = workouts.iter().map(|w| w.calories_burned).sum();

        Ok(WorkoutsForDate {
            date,
            workouts,
            total_calories_burned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    const TWO_UNITS: &str = "#Legs\n-Back Squat\n-5 sets15 reps\n-30kg\n-10min\n#Cardio\n-Rowing\n-1 sets1 reps\n-0kg\n-20min";

    #[test]
    fn test_parse_totals_calories() {
        let parsed = WorkoutService::parse(TWO_UNITS, Delimiter::Newline).unwrap();
        assert_eq!(parsed.workouts.len(), 2);
        assert_eq!(parsed.total_calories, 1500.0);
    }

    #[test]
    fn test_parse_error_maps_to_malformed_input() {
        let err = WorkoutService::parse("#Legs\n-Back Squat", Delimiter::Newline).unwrap_err();
        assert!(matches!(err, ApiError::MalformedInput { unit: 1, .. }));
    }

    #[test]
    fn test_prepare_batch_estimates_every_entry() {
        let drafts = parse_workout_text(TWO_UNITS, Delimiter::Newline).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 10, 10, 7, 30, 0).unwrap();

        let batch = WorkoutService::prepare_batch(&drafts, at).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].calories_burned, Decimal::from(1500));
        assert_eq!(batch[1].calories_burned, Decimal::ZERO);
        assert!(batch.iter().all(|w| w.performed_at == at));
    }

    #[test]
    fn test_prepare_batch_rejects_whole_batch_on_bad_entry() {
        let mut drafts = parse_workout_text(TWO_UNITS, Delimiter::Newline).unwrap();
        drafts[1].duration = f64::INFINITY;

        let err = WorkoutService::prepare_batch(&drafts, Utc::now()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidMeasurement(_)));
    }

    #[test]
    fn test_prepare_batch_rejects_unstorable_quantities() {
        let mut drafts = parse_workout_text(TWO_UNITS, Delimiter::Newline).unwrap();
        drafts[0].weight = 1.0e30;
        let err = WorkoutService::prepare_batch(&drafts, Utc::now()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidMeasurement(_)));

        drafts[0].weight = 2.0e8;
        let err = WorkoutService::prepare_batch(&drafts, Utc::now()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidMeasurement(_)));
    }

    #[test]
    fn test_parse_rejects_oversized_weight() {
        let err = WorkoutService::parse(
            "#Legs\n-Back Squat\n-5 sets15 reps\n-1e30kg\n-10min",
            Delimiter::Newline,
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidMeasurement(_)));
    }
}
