//! Nutrition service for meal logging

use crate::error::ApiError;
use crate::repositories::{to_numeric, CreateMeal, MealRepository};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use fittrack_shared::calendar::{day_window, start_of_day};
use fittrack_shared::types::{CreateMealRequest, MealsForDate, WeeklyNutrition};
use fittrack_shared::validation::validate_meal_calories;
use fittrack_shared::MealEntry;
use sqlx::PgPool;
use std::collections::HashSet;
use tracing::info;
use uuid::Uuid;

pub struct NutritionService;

impl NutritionService {
    /// Log a meal; the date defaults to `now`
    pub async fn add_meal(
        pool: &PgPool,
        owner_id: Uuid,
        input: CreateMealRequest,
        now: DateTime<Utc>,
    ) -> Result<MealEntry, ApiError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ApiError::Validation("Meal name cannot be empty".to_string()));
        }
        validate_meal_calories(input.calories)?;

        let record = MealRepository::create(
            pool,
            CreateMeal {
                owner_id,
                name: name.to_string(),
                calories: to_numeric("calories", input.calories)?,
                eaten_at: input.date.unwrap_or(now),
            },
        )
        .await?;

        info!(owner_id = %owner_id, meal_id = %record.id, "Logged meal");
        Ok(MealEntry::from(record))
    }

    /// The day's meals with their calorie total
    pub async fn meals_for_date(
        pool: &PgPool,
        owner_id: Uuid,
        date: NaiveDate,
    ) -> Result<MealsForDate, ApiError> {
        let (start, end) = day_window(date);
        let meals: Vec<MealEntry> = MealRepository::get_in_range(pool, owner_id, start, end)
            .await?
            .into_iter()
            .map(MealEntry::from)
            .collect();
        let total_calories = meals.iter().map(|m| m.calories).sum();

        Ok(MealsForDate {
            date,
            meals,
            total_calories,
        })
    }

    /// Intake over the seven days ending on `today`
    pub async fn weekly_nutrition(
        pool: &PgPool,
        owner_id: Uuid,
        today: NaiveDate,
    ) -> Result<WeeklyNutrition, ApiError> {
        let start_date = today - Duration::days(6);
        let meals: Vec<MealEntry> = MealRepository::get_in_range(
            pool,
            owner_id,
            start_of_day(start_date),
            start_of_day(today + Duration::days(1)),
        )
        .await?
        .into_iter()
        .map(MealEntry::from)
        .collect();

        Ok(Self::summarize_week(&meals, start_date, today))
    }

    /// Average over the days that actually have meals
    pub fn summarize_week(
        meals: &[MealEntry],
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> WeeklyNutrition {
        let total_calories: f64 = meals.iter().map(|m| m.calories).sum();
        let days: HashSet<NaiveDate> = meals.iter().map(|m| m.date.date_naive()).collect();
        let days_with_meals = days.len() as i64;

        WeeklyNutrition {
            start_date,
            end_date,
            total_calories,
            meal_count: meals.len() as i64,
            days_with_meals,
            average_daily_calories: if days_with_meals > 0 {
                total_calories / days_with_meals as f64
            } else {
                0.0
            },
        }
    }
}
