//! Coaching recommendations for open goals
//!
//! Recommendations are derived on every request from the goal window totals
//! and from the owner's recent history. Nothing here is stored.

use crate::config::CoachingConfig;
use crate::error::ApiError;
use crate::repositories::{GoalRepository, MealRepository, WorkoutRepository};
use crate::services::goals::GoalsService;
use chrono::{DateTime, NaiveDate, Utc};
use fittrack_shared::types::{GoalRecommendation, Recommendation, RecommendationKind};
use fittrack_shared::{Goal, GoalState, MealEntry, WorkoutEntry};
use rust_decimal::prelude::ToPrimitive;
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use tracing::debug;
use uuid::Uuid;

/// Category suggested when there is no workout history
pub const DEFAULT_CATEGORY: &str = "Cardio";

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Averages over the owner's recent history
#[derive(Debug, Clone, PartialEq)]
pub struct CoachingContext {
    pub top_category: String,
    pub avg_calories_per_workout: f64,
    pub avg_daily_intake: f64,
}

/// Window totals for one goal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalTotals {
    pub calories_burned: f64,
    pub calories_consumed: f64,
}

pub struct RecommendationService;

impl RecommendationService {
    /// Recommendations for every active or future goal of the owner
    pub async fn recommendations(
        pool: &PgPool,
        owner_id: Uuid,
        coaching: &CoachingConfig,
        now: DateTime<Utc>,
    ) -> Result<Vec<GoalRecommendation>, ApiError> {
        let today = now.date_naive();
        let goals: Vec<Goal> = GoalRepository::list_for_owner(pool, owner_id)
            .await?
            .into_iter()
            .map(Goal::from)
            .filter(|g| g.state(today) != GoalState::Expired)
            .collect();

        if goals.is_empty() {
            return Ok(Vec::new());
        }

        let workouts: Vec<WorkoutEntry> =
            WorkoutRepository::get_recent(pool, owner_id, coaching.history_limit)
                .await?
                .into_iter()
                .map(WorkoutEntry::from)
                .collect();
        let meals: Vec<MealEntry> = MealRepository::get_recent(pool, owner_id, coaching.history_limit)
            .await?
            .into_iter()
            .map(MealEntry::from)
            .collect();
        let context = Self::coaching_context(&workouts, &meals, coaching);

        debug!(
            owner_id = %owner_id,
            goals = goals.len(),
            top_category = %context.top_category,
            "Computing recommendations"
        );

        let mut out = Vec::with_capacity(goals.len());
        for goal in &goals {
            let totals = Self::goal_totals(pool, goal, today).await?;
            out.push(Self::recommend_for_goal(goal, totals, &context, coaching, now));
        }
        Ok(out)
    }

    /// Burned and consumed calories inside the goal window
    async fn goal_totals(pool: &PgPool, goal: &Goal, today: NaiveDate) -> Result<GoalTotals, ApiError> {
        if goal.state(today) == GoalState::Future {
            return Ok(GoalTotals {
                calories_burned: 0.0,
                calories_consumed: 0.0,
            });
        }

        let calories_burned = GoalsService::calories_burned(pool, goal, today).await?;
        let (start, end) = goal.window();
        let calories_consumed = MealRepository::sum_calories_in_range(pool, goal.owner_id, start, end)
            .await?
            .to_f64()
            .unwrap_or(0.0);

        Ok(GoalTotals {
            calories_burned,
            calories_consumed,
        })
    }

    /// Summarize recent history. Both slices are most recent first.
    pub fn coaching_context(
        recent_workouts: &[WorkoutEntry],
        recent_meals: &[MealEntry],
        coaching: &CoachingConfig,
    ) -> CoachingContext {
        CoachingContext {
            top_category: Self::top_category(recent_workouts)
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            avg_calories_per_workout: Self::average_calories_per_workout(
                recent_workouts,
                coaching.default_calories_per_workout,
            ),
            avg_daily_intake: Self::average_daily_intake(recent_meals, coaching.default_daily_intake),
        }
    }

    /// Most frequent category; ties go to the one logged most recently
    pub fn top_category(recent_workouts: &[WorkoutEntry]) -> Option<String> {
        // category -> (count, index of most recent occurrence)
        let mut seen: HashMap<&str, (usize, usize)> = HashMap::new();
        for (index, workout) in recent_workouts.iter().enumerate() {
            seen.entry(workout.category.as_str())
                .and_modify(|(count, _)| *count += 1)
                .or_insert((1, index));
        }

        seen.into_iter()
            .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
                count_a.cmp(count_b).then(first_b.cmp(first_a))
            })
            .map(|(category, _)| category.to_string())
    }

    /// Mean calories per workout, or `default` when that is not positive
    pub fn average_calories_per_workout(recent_workouts: &[WorkoutEntry], default: f64) -> f64 {
        if recent_workouts.is_empty() {
            return default;
        }
        let total: f64 = recent_workouts.iter().map(|w| w.calories_burned).sum();
        let avg = total / recent_workouts.len() as f64;
        if avg > 0.0 {
            avg
        } else {
            default
        }
    }

    /// Total intake divided by the number of distinct days with meals
    pub fn average_daily_intake(recent_meals: &[MealEntry], default: f64) -> f64 {
        let days: HashSet<NaiveDate> = recent_meals.iter().map(|m| m.date.date_naive()).collect();
        if days.is_empty() {
            return default;
        }
        let total: f64 = recent_meals.iter().map(|m| m.calories).sum();
        total / days.len() as f64
    }

    /// Whole days left until the goal window closes, at least one
    pub fn days_left(goal: &Goal, now: DateTime<Utc>) -> i64 {
        let (_, end) = goal.window();
        let seconds = (end - now).num_seconds() as f64;
        ((seconds / SECONDS_PER_DAY).ceil() as i64).max(1)
    }

    /// Build the recommendation list for one goal
    pub fn recommend_for_goal(
        goal: &Goal,
        totals: GoalTotals,
        context: &CoachingContext,
        coaching: &CoachingConfig,
        now: DateTime<Utc>,
    ) -> GoalRecommendation {
        let remaining = goal.target_calories - totals.calories_burned;
        let mut recommendations = Vec::new();

        if remaining <= 0.0 {
            recommendations.push(Recommendation::new(
                RecommendationKind::Congratulation,
                format!(
                    "You reached your '{}' goal with {:.0} kcal burned. Time to set a new challenge!",
                    goal.name, totals.calories_burned
                ),
            ));
        } else {
            let days_left = Self::days_left(goal, now);
            let category = &context.top_category;

            let workouts_needed = (remaining / context.avg_calories_per_workout).ceil().max(1.0);
            let per_session = remaining / workouts_needed;
            recommendations.push(Recommendation::new(
                RecommendationKind::WorkoutVolume,
                format!(
                    "Based on your {} preference, add {} {} sessions of about {:.0} kcal each.",
                    category,
                    workouts_needed as i64,
                    category.to_lowercase(),
                    per_session
                ),
            ));

            if totals.calories_consumed > totals.calories_burned {
                let excess = totals.calories_consumed - totals.calories_burned;
                let daily_reduction =
                    (excess / days_left as f64).round().min(coaching.max_daily_intake_reduction);
                if daily_reduction >= 1.0 {
                    recommendations.push(Recommendation::new(
                        RecommendationKind::IntakeReduction,
                        format!(
                            "You're averaging {:.0} kcal a day; reduce intake by {:.0} kcal/day.",
                            context.avg_daily_intake, daily_reduction
                        ),
                    ));
                }
            }

            recommendations.push(Recommendation::new(
                RecommendationKind::Pacing,
                format!(
                    "To finish by {}, burn about {:.0} kcal a day for the next {} day{}.",
                    goal.end_date.format("%Y-%m-%d"),
                    remaining / days_left as f64,
                    days_left,
                    if days_left == 1 { "" } else { "s" }
                ),
            ));
        }

        GoalRecommendation {
            goal_id: goal.id,
            goal_name: goal.name.clone(),
            calories_burned: totals.calories_burned,
            target_calories: goal.target_calories,
            recommendations,
        }
    }
}
