//! FitTrack WASM Module
//!
//! Browser bindings for the workout text grammar and calorie estimator, so
//! the quick-add box and plan editor validate input exactly as the server
//! does. Structured values cross the boundary as JSON strings.

use fittrack_shared::{Delimiter, WorkoutDraft};
use wasm_bindgen::prelude::*;

/// Parse a workout block and return the drafts as a JSON array
#[wasm_bindgen]
pub fn parse_workouts(raw: &str, delimiter: &str) -> Result<String, String> {
    parse_to_json(raw, delimiter)
}

/// Render a JSON array of drafts back into workout text
#[wasm_bindgen]
pub fn format_workouts(drafts_json: &str, delimiter: &str) -> Result<String, String> {
    format_from_json(drafts_json, delimiter)
}

/// Calories burned for a single workout
#[wasm_bindgen]
pub fn estimate_calories(duration_minutes: f64, weight_kg: f64) -> Result<f64, String> {
    fittrack_shared::estimate_calories(duration_minutes, weight_kg).map_err(|e| e.to_string())
}

/// Total estimated calories for a workout block, for live previews
#[wasm_bindgen]
pub fn preview_calories(raw: &str, delimiter: &str) -> Result<f64, String> {
    let drafts = parse_drafts(raw, delimiter)?;
    drafts.iter().try_fold(0.0, |total, draft| {
        draft
            .estimated_calories()
            .map(|calories| total + calories)
            .map_err(|e| e.to_string())
    })
}

fn parse_drafts(raw: &str, delimiter: &str) -> Result<Vec<WorkoutDraft>, String> {
    let delimiter: Delimiter = delimiter.parse().map_err(|e: fittrack_shared::DomainError| e.to_string())?;
    fittrack_shared::parse_workout_text(raw, delimiter).map_err(|e| e.to_string())
}

fn parse_to_json(raw: &str, delimiter: &str) -> Result<String, String> {
    let drafts = parse_drafts(raw, delimiter)?;
    serde_json::to_string(&drafts).map_err(|e| e.to_string())
}

fn format_from_json(drafts_json: &str, delimiter: &str) -> Result<String, String> {
    let delimiter: Delimiter = delimiter.parse().map_err(|e: fittrack_shared::DomainError| e.to_string())?;
    let drafts: Vec<WorkoutDraft> = serde_json::from_str(drafts_json).map_err(|e| e.to_string())?;
    Ok(fittrack_shared::format_workout_text(&drafts, delimiter))
}
