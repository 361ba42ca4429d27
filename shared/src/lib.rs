//! FitTrack Shared Library
//!
//! Pure domain logic shared by the backend and the WASM bindings: the
//! workout text grammar, calorie estimation, calendar windows, models and
//! API types. Nothing in this crate performs I/O.

pub mod calendar;
pub mod calories;
pub mod errors;
pub mod models;
pub mod types;
pub mod validation;
pub mod workout_text;

// Re-export commonly used items
pub use calories::{estimate_calories, CALORIES_PER_KG_PER_MINUTE};
pub use errors::*;
pub use models::*;
pub use types::*;
pub use workout_text::{format_workout_text, parse_workout_text, Delimiter};
