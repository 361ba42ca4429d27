//! Dashboard aggregation
//!
//! Daily, weekly and monthly views over logged workouts. Each view loads
//! its rows with a single query and folds them with the pure functions
//! below, which carry the unit and property tests.

use crate::error::ApiError;
use crate::repositories::{MonthCategoryRow, WorkoutRepository};
use chrono::{Duration, NaiveDate};
use fittrack_shared::calendar::{day_label, month_window, start_of_day, trailing_days};
use fittrack_shared::types::{
    CategoryCounts, CategorySlice, DailyDashboard, DayTotal, MonthDetail, MonthGroup,
};
use fittrack_shared::validation::validate_month;
use fittrack_shared::WorkoutEntry;
use rust_decimal::prelude::ToPrimitive;
use sqlx::PgPool;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;
use uuid::Uuid;

/// Days in the dashboard's trailing series, today included
pub const WEEKLY_SERIES_DAYS: u32 = 7;

pub struct DashboardService;

impl DashboardService {
    /// Today's totals plus the trailing seven-day series
    pub async fn daily_dashboard(
        pool: &PgPool,
        owner_id: Uuid,
        today: NaiveDate,
    ) -> Result<DailyDashboard, ApiError> {
        let days = trailing_days(today, WEEKLY_SERIES_DAYS);
        let start = start_of_day(days[0]);
        let end = start_of_day(today + Duration::days(1));

        let week: Vec<WorkoutEntry> = WorkoutRepository::get_in_range(pool, owner_id, start, end)
            .await?
            .into_iter()
            .map(WorkoutEntry::from)
            .collect();

        debug!(owner_id = %owner_id, rows = week.len(), "Loaded weekly workouts");

        Ok(Self::summarize(&week, today))
    }

    /// Fold a week of workouts into the dashboard for `today`
    pub fn summarize(week: &[WorkoutEntry], today: NaiveDate) -> DailyDashboard {
        let todays: Vec<&WorkoutEntry> = week
            .iter()
            .filter(|w| w.date.date_naive() == today)
            .collect();

        let total_calories_burnt: f64 = todays.iter().map(|w| w.calories_burned).sum();
        let total_workouts = todays.len() as i64;
        let avg_calories_burnt_per_workout = if total_workouts > 0 {
            total_calories_burnt / total_workouts as f64
        } else {
            0.0
        };

        DailyDashboard {
            total_calories_burnt,
            total_workouts,
            avg_calories_burnt_per_workout,
            weekly_series: Self::weekly_series(week, today),
            category_breakdown: Self::category_breakdown(todays),
        }
    }

    /// Exactly [`WEEKLY_SERIES_DAYS`] per-day totals ending on `today`,
    /// oldest first. Entries outside the window are ignored.
    pub fn weekly_series(entries: &[WorkoutEntry], today: NaiveDate) -> Vec<DayTotal> {
        let mut per_day: HashMap<NaiveDate, f64> = HashMap::new();
        for entry in entries {
            *per_day.entry(entry.date.date_naive()).or_default() += entry.calories_burned;
        }

        trailing_days(today, WEEKLY_SERIES_DAYS)
            .into_iter()
            .map(|date| DayTotal {
                date,
                label: day_label(date),
                calories_burned: per_day.get(&date).copied().unwrap_or(0.0),
            })
            .collect()
    }

    /// Calories per category as pie slices, sorted by label
    pub fn category_breakdown<'a>(
        entries: impl IntoIterator<Item = &'a WorkoutEntry>,
    ) -> Vec<CategorySlice> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for entry in entries {
            *totals.entry(entry.category.as_str()).or_default() += entry.calories_burned;
        }

        totals
            .into_iter()
            .enumerate()
            .map(|(id, (label, value))| CategorySlice {
                id,
                label: label.to_string(),
                value,
            })
            .collect()
    }

    /// Every month with workouts, newest first
    pub async fn monthly_summary(
        pool: &PgPool,
        owner_id: Uuid,
    ) -> Result<Vec<MonthGroup>, ApiError> {
        let rows = WorkoutRepository::monthly_category_totals(pool, owner_id).await?;
        Ok(Self::build_month_groups(&rows))
    }

    /// Fold (year, month, category) rows into one group per month
    pub fn build_month_groups(rows: &[MonthCategoryRow]) -> Vec<MonthGroup> {
        let mut groups: BTreeMap<(i32, i32), MonthGroup> = BTreeMap::new();

        for row in rows {
            let group = groups
                .entry((row.year, row.month))
                .or_insert_with(|| MonthGroup {
                    year: row.year,
                    month: row.month as u32,
                    total_workouts: 0,
                    total_calories_burned: 0.0,
                    category_breakdown: CategoryCounts::new(),
                });
            group.total_workouts += row.workouts;
            group.total_calories_burned += row.calories.to_f64().unwrap_or(0.0);
            *group
                .category_breakdown
                .entry(row.category.clone())
                .or_default() += row.workouts;
        }

        groups.into_values().rev().collect()
    }

    /// All workouts in one calendar month
    pub async fn monthly_detail(
        pool: &PgPool,
        owner_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<MonthDetail, ApiError> {
        validate_month(month).map_err(ApiError::Validation)?;
        let (start, end) = month_window(year, month)
            .ok_or_else(|| ApiError::Validation(format!("Year {} is out of range", year)))?;

        let workouts: Vec<WorkoutEntry> = WorkoutRepository::get_in_range(pool, owner_id, start, end)
            .await?
            .into_iter()
            .map(WorkoutEntry::from)
            .collect();

        Ok(Self::month_detail(year, month, workouts))
    }

    /// Totals for one month; `workouts` are sorted most recent first
    pub fn month_detail(year: i32, month: u32, mut workouts: Vec<WorkoutEntry>) -> MonthDetail {
        workouts.sort_by(|a, b| b.date.cmp(&a.date));

        let mut category_breakdown = CategoryCounts::new();
        for workout in &workouts {
            *category_breakdown.entry(workout.category.clone()).or_default() += 1;
        }

        MonthDetail {
            year,
            month,
            total_workouts: workouts.len() as i64,
            total_calories_burned: workouts.iter().map(|w| w.calories_burned).sum(),
            category_breakdown,
            workouts,
        }
    }
}
