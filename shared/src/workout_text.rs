//! Free-text workout parser
//!
//! Users log workouts as blocks of short lines:
//!
//! ```text
//! #Legs
//! -Back Squat
//! -5 sets15 reps
//! -30kg
//! -10min
//! ```
//!
//! Each unit is a `#Category` header followed by exactly four `-` attribute
//! lines: name, sets/reps, weight in kg and duration in minutes. Units repeat
//! until the input is exhausted.
//!
//! The quick-add box on the dashboard separates lines with `;` while the plan
//! editor uses line breaks, so the separator is a [`Delimiter`] option of one
//! grammar rather than two parsers.

use crate::errors::{DomainError, DomainResult};
use crate::models::WorkoutDraft;
use crate::validation::{validate_quantity, MAX_DURATION_MINUTES, MAX_WEIGHT_KG};
use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Number of attribute lines following each `#Category` header
const ATTRIBUTE_LINES: usize = 4;

static SETS_REPS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?P<sets>.*?)\s*sets\s*(?P<reps>.*?)\s*reps$").expect("sets/reps pattern")
});

/// Line separator accepted by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// One line per attribute, separated by line breaks
    #[default]
    Newline,
    /// Lines separated by `;` (line breaks are accepted too)
    Semicolon,
}

impl Delimiter {
    fn is_separator(self, c: char) -> bool {
        match self {
            Delimiter::Newline => c == '\n',
            Delimiter::Semicolon => c == ';' || c == '\n',
        }
    }

    fn joiner(self) -> &'static str {
        match self {
            Delimiter::Newline => "\n",
            Delimiter::Semicolon => ";",
        }
    }
}

impl std::str::FromStr for Delimiter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newline" | "\\n" => Ok(Delimiter::Newline),
            "semicolon" | ";" => Ok(Delimiter::Semicolon),
            other => Err(DomainError::malformed(
                1,
                format!("unknown delimiter '{}'", other),
            )),
        }
    }
}

/// Parse a raw workout block into drafts, in unit order.
///
/// The whole block is validated: the first bad unit fails the call and
/// nothing is returned for the units before it.
pub fn parse_workout_text(raw: &str, delimiter: Delimiter) -> DomainResult<Vec<WorkoutDraft>> {
    let lines: Vec<&str> = raw
        .split(|c| delimiter.is_separator(c))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(DomainError::malformed(1, "no workouts found"));
    }

    let mut drafts = Vec::new();
    let mut cursor = 0;
    let mut unit = 0;

    while cursor < lines.len() {
        unit += 1;
        let header = lines[cursor];
        let category = header
            .strip_prefix('#')
            .map(str::trim)
            .ok_or_else(|| {
                DomainError::malformed(
                    unit,
                    format!("expected a '#Category' line, found '{}'", header),
                )
            })?;
        if category.is_empty() {
            return Err(DomainError::malformed(unit, "category is empty"));
        }

        let available = lines.len() - cursor - 1;
        if available < ATTRIBUTE_LINES {
            return Err(DomainError::malformed(
                unit,
                format!(
                    "expected {} attribute lines after '#{}', found {}",
                    ATTRIBUTE_LINES, category, available
                ),
            ));
        }

        let attrs = &lines[cursor + 1..cursor + 1 + ATTRIBUTE_LINES];
        drafts.push(parse_unit(unit, category, attrs)?);
        cursor += 1 + ATTRIBUTE_LINES;
    }

    Ok(drafts)
}

/// Render drafts back into the text grammar accepted by [`parse_workout_text`]
pub fn format_workout_text(drafts: &[WorkoutDraft], delimiter: Delimiter) -> String {
    drafts
        .iter()
        .flat_map(|d| {
            [
                format!("#{}", d.category),
                format!("-{}", d.workout_name),
                format!("-{} sets {} reps", d.sets, d.reps),
                format!("-{}kg", d.weight),
                format!("-{}min", d.duration),
            ]
        })
        .collect::<Vec<_>>()
        .join(delimiter.joiner())
}

fn parse_unit(unit: usize, category: &str, attrs: &[&str]) -> DomainResult<WorkoutDraft> {
    let name = attribute(unit, "workout name", attrs[0])?;
    if name.is_empty() {
        return Err(DomainError::malformed(unit, "workout name is empty"));
    }

    let sets_reps = attribute(unit, "sets/reps", attrs[1])?;
    let caps = SETS_REPS.captures(sets_reps).ok_or_else(|| {
        DomainError::malformed(
            unit,
            format!("expected '<n> sets<n> reps', found '{}'", sets_reps),
        )
    })?;
    let sets = parse_count(unit, "sets", caps.name("sets").map_or("", |m| m.as_str()))?;
    let reps = parse_count(unit, "reps", caps.name("reps").map_or("", |m| m.as_str()))?;

    let weight_line = attribute(unit, "weight", attrs[2])?;
    let weight = strip_unit(weight_line, "kg").ok_or_else(|| {
        DomainError::malformed(unit, format!("expected '<n>kg', found '{}'", weight_line))
    })?;
    let weight = parse_quantity(unit, "weight", weight, MAX_WEIGHT_KG)?;

    let duration_line = attribute(unit, "duration", attrs[3])?;
    let duration = strip_unit(duration_line, "min").ok_or_else(|| {
        DomainError::malformed(
            unit,
            format!("expected '<n>min', found '{}'", duration_line),
        )
    })?;
    let duration = parse_quantity(unit, "duration", duration, MAX_DURATION_MINUTES)?;

    Ok(WorkoutDraft {
        category: category.to_string(),
        workout_name: name.to_string(),
        sets,
        reps,
        weight,
        duration,
    })
}

fn attribute<'a>(unit: usize, field: &str, line: &'a str) -> DomainResult<&'a str> {
    line.strip_prefix('-').map(str::trim).ok_or_else(|| {
        DomainError::malformed(
            unit,
            format!("expected '-' before {}, found '{}'", field, line),
        )
    })
}

/// Strip a case-insensitive unit suffix such as `kg`
fn strip_unit<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let split = text.len().checked_sub(suffix.len())?;
    if !text.is_char_boundary(split) || !text[split..].eq_ignore_ascii_case(suffix) {
        return None;
    }
    Some(text[..split].trim())
}

fn parse_count(unit: usize, field: &str, raw: &str) -> DomainResult<i32> {
    let raw = raw.trim();
    let value: i64 = raw.parse().map_err(|_| {
        DomainError::measurement(format!(
            "workout {}: {} '{}' is not a whole number",
            unit, field, raw
        ))
    })?;
    if value < 0 {
        return Err(DomainError::measurement(format!(
            "workout {}: {} cannot be negative",
            unit, field
        )));
    }
    i32::try_from(value).map_err(|_| {
        DomainError::measurement(format!("workout {}: {} is too large", unit, field))
    })
}

fn parse_quantity(unit: usize, field: &str, raw: &str, max: f64) -> DomainResult<f64> {
    let value: f64 = raw.parse().map_err(|_| {
        DomainError::measurement(format!(
            "workout {}: {} '{}' is not a number",
            unit, field, raw
        ))
    })?;
    if !value.is_finite() {
        return Err(DomainError::measurement(format!(
            "workout {}: {} must be finite",
            unit, field
        )));
    }
    if value < 0.0 {
        return Err(DomainError::measurement(format!(
            "workout {}: {} cannot be negative",
            unit, field
        )));
    }
    validate_quantity(&format!("workout {}: {}", unit, field), value, max)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn squat() -> WorkoutDraft {
        WorkoutDraft {
            category: "Legs".to_string(),
            workout_name: "Back Squat".to_string(),
            sets: 5,
            reps: 15,
            weight: 30.0,
            duration: 10.0,
        }
    }

    #[test]
    fn test_parse_single_unit() {
        let drafts = parse_workout_text(
            "#Legs\n-Back Squat\n-5 sets15 reps\n-30kg\n-10min",
            Delimiter::Newline,
        )
        .unwrap();

        assert_eq!(drafts, vec![squat()]);
        assert_eq!(drafts[0].estimated_calories().unwrap(), 1500.0);
    }

    #[test]
    fn test_parse_semicolon_units_with_inner_newlines() {
        let raw = "#Legs\n-Back Squat\n-5 sets15 reps\n-30kg\n-10min;#Back\n-Deadlift\n-3 sets 8 reps\n-80 kg\n-15 min";
        let drafts = parse_workout_text(raw, Delimiter::Semicolon).unwrap();

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[1].category, "Back");
        assert_eq!(drafts[1].workout_name, "Deadlift");
        assert_eq!((drafts[1].sets, drafts[1].reps), (3, 8));
        assert_eq!(drafts[1].weight, 80.0);
        assert_eq!(drafts[1].duration, 15.0);
    }

    #[test]
    fn test_parse_single_line_semicolons() {
        let drafts = parse_workout_text(
            "#Legs;-Back Squat;-5 sets15 reps;-30kg;-10min;",
            Delimiter::Semicolon,
        )
        .unwrap();
        assert_eq!(drafts, vec![squat()]);
    }

    #[test]
    fn test_newline_mode_does_not_split_on_semicolons() {
        let err = parse_workout_text(
            "#Legs;-Back Squat;-5 sets15 reps;-30kg;-10min",
            Delimiter::Newline,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::MalformedInput { unit: 1, .. }));
    }

    #[test]
    fn test_tolerates_whitespace_and_blank_lines() {
        let raw = "\r\n  #Legs  \r\n\n  - Back Squat \n- 5 sets 15 reps\n- 30 kg\n- 10 min\n\n";
        let drafts = parse_workout_text(raw, Delimiter::Newline).unwrap();
        assert_eq!(drafts, vec![squat()]);
    }

    #[test]
    fn test_fractional_weight_and_duration() {
        let drafts = parse_workout_text(
            "#Cardio\n-Rowing\n-1 sets1 reps\n-12.5kg\n-20.75min",
            Delimiter::Newline,
        )
        .unwrap();
        assert_eq!(drafts[0].weight, 12.5);
        assert_eq!(drafts[0].duration, 20.75);
    }

    #[rstest]
    #[case("", 1)]
    #[case("   \n \n", 1)]
    #[case("-Back Squat\n-5 sets15 reps\n-30kg\n-10min", 1)]
    #[case("#Legs\n-Back Squat\n-5 sets15 reps\n-30kg", 1)]
    #[case("#\n-Back Squat\n-5 sets15 reps\n-30kg\n-10min", 1)]
    #[case("#Legs\n-\n-5 sets15 reps\n-30kg\n-10min", 1)]
    #[case("#Legs\nBack Squat\n-5 sets15 reps\n-30kg\n-10min", 1)]
    #[case("#Legs\n-Back Squat\n-5 sets\n-30kg\n-10min", 1)]
    #[case("#Legs\n-Back Squat\n-5 sets15 reps\n-30lbs\n-10min", 1)]
    #[case("#Legs\n-Back Squat\n-5 sets15 reps\n-30kg\n-10sec", 1)]
    #[case("#Legs\n-Back Squat\n-5 sets15 reps\n-30kg\n-10min\n#Arms\n-Curl\n-3 sets10 reps", 2)]
    #[case("#Legs\n-Back Squat\n-5 sets15 reps\n-30kg\n-10min\n-Extra line", 2)]
    fn test_malformed_names_unit(#[case] raw: &str, #[case] expected_unit: usize) {
        match parse_workout_text(raw, Delimiter::Newline) {
            Err(DomainError::MalformedInput { unit, .. }) => assert_eq!(unit, expected_unit),
            other => panic!("expected MalformedInput for unit {}, got {:?}", expected_unit, other),
        }
    }

    #[rstest]
    #[case("#Legs\n-Back Squat\n-five sets15 reps\n-30kg\n-10min")]
    #[case("#Legs\n-Back Squat\n-5 sets fifteen reps\n-30kg\n-10min")]
    #[case("#Legs\n-Back Squat\n-5.5 sets15 reps\n-30kg\n-10min")]
    #[case("#Legs\n-Back Squat\n--5 sets15 reps\n-30kg\n-10min")]
    #[case("#Legs\n-Back Squat\n-5 sets15 reps\n-heavykg\n-10min")]
    #[case("#Legs\n-Back Squat\n-5 sets15 reps\n--30kg\n-10min")]
    #[case("#Legs\n-Back Squat\n-5 sets15 reps\n-30kg\n-NaNmin")]
    #[case("#Legs\n-Back Squat\n-5 sets15 reps\n-30kg\n-infmin")]
    #[case("#Legs\n-Back Squat\n-5 sets15 reps\n-1e30kg\n-10min")]
    #[case("#Legs\n-Back Squat\n-5 sets15 reps\n-200000000kg\n-10min")]
    #[case("#Legs\n-Back Squat\n-5 sets15 reps\n-30kg\n-200000000min")]
    fn test_bad_quantities_fail_without_defaulting(#[case] raw: &str) {
        let err = parse_workout_text(raw, Delimiter::Newline).unwrap_err();
        assert!(
            matches!(err, DomainError::InvalidMeasurement(_)),
            "expected InvalidMeasurement, got {:?}",
            err
        );
    }

    #[test]
    fn test_measurement_error_mentions_unit() {
        let raw = "#Legs\n-Back Squat\n-5 sets15 reps\n-30kg\n-10min\n#Arms\n-Curl\n-3 sets10 reps\n-xkg\n-5min";
        let err = parse_workout_text(raw, Delimiter::Newline).unwrap_err();
        assert!(err.to_string().contains("workout 2"));
    }

    #[test]
    fn test_delimiter_from_str() {
        assert_eq!("semicolon".parse::<Delimiter>().unwrap(), Delimiter::Semicolon);
        assert_eq!(" Newline ".parse::<Delimiter>().unwrap(), Delimiter::Newline);
        assert_eq!(";".parse::<Delimiter>().unwrap(), Delimiter::Semicolon);
        assert!("comma".parse::<Delimiter>().is_err());
    }

    #[test]
    fn test_delimiter_serde() {
        let d: Delimiter = serde_json::from_str("\"semicolon\"").unwrap();
        assert_eq!(d, Delimiter::Semicolon);
        assert_eq!(serde_json::to_string(&Delimiter::Newline).unwrap(), "\"newline\"");
    }

    #[test]
    fn test_format_matches_grammar() {
        let text = format_workout_text(&[squat()], Delimiter::Newline);
        assert_eq!(text, "#Legs\n-Back Squat\n-5 sets 15 reps\n-30kg\n-10min");
    }

    fn draft_strategy() -> impl Strategy<Value = WorkoutDraft> {
        (
            "[A-Za-z][A-Za-z ]{0,10}[A-Za-z]",
            "[A-Za-z][A-Za-z0-9 ]{0,14}[A-Za-z0-9]",
            0i32..100,
            0i32..100,
            0u32..40000,
            0u32..24000,
        )
            .prop_map(|(category, workout_name, sets, reps, weight, duration)| WorkoutDraft {
                category,
                workout_name,
                sets,
                reps,
                weight: weight as f64 / 100.0,
                duration: duration as f64 / 100.0,
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_round_trip_newline(drafts in prop::collection::vec(draft_strategy(), 1..8)) {
            let text = format_workout_text(&drafts, Delimiter::Newline);
            let parsed = parse_workout_text(&text, Delimiter::Newline).unwrap();
            prop_assert_eq!(parsed, drafts);
        }

        #[test]
        fn prop_round_trip_semicolon(drafts in prop::collection::vec(draft_strategy(), 1..8)) {
            let text = format_workout_text(&drafts, Delimiter::Semicolon);
            let parsed = parse_workout_text(&text, Delimiter::Semicolon).unwrap();
            prop_assert_eq!(parsed, drafts);
        }

        #[test]
        fn prop_parse_is_deterministic(drafts in prop::collection::vec(draft_strategy(), 1..4)) {
            let text = format_workout_text(&drafts, Delimiter::Newline);
            let first = parse_workout_text(&text, Delimiter::Newline).unwrap();
            let second = parse_workout_text(&text, Delimiter::Newline).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
