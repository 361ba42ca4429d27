//! Business logic services
//!
//! Services coordinate repositories and hold the pure calculations that the
//! unit tests exercise directly.

pub mod dashboard;
pub mod goals;
pub mod nutrition;
pub mod plans;
pub mod recommendations;
pub mod workouts;

pub use dashboard::DashboardService;
pub use goals::GoalsService;
pub use nutrition::NutritionService;
pub use plans::PlanService;
pub use recommendations::RecommendationService;
pub use workouts::WorkoutService;
