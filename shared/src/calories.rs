//! Calorie expenditure estimation
//!
//! Energy expenditure for a strength or cardio entry is modelled as a flat
//! rate per kilogram lifted per minute:
//!
//! ```text
//! calories = trunc(duration_minutes) * trunc(weight_kg) * CALORIES_PER_KG_PER_MINUTE
//! ```
//!
//! Both inputs are truncated to whole units before multiplying. Stored
//! workout totals were produced with this truncation, so changing it would
//! make historical dashboards disagree with newly logged entries.

use crate::errors::{DomainError, DomainResult};
use crate::validation::{
    validate_quantity, MAX_DURATION_MINUTES, MAX_WEIGHT_KG, MAX_WORKOUT_CALORIES,
};

/// Calories burned per kilogram per minute.
pub const CALORIES_PER_KG_PER_MINUTE: f64 = 5.0;

/// Estimate calories burned for a workout of `duration_minutes` at `weight_kg`.
///
/// Returns [`DomainError::InvalidMeasurement`] for NaN, infinite, negative
/// or out-of-range input, and for estimates above [`MAX_WORKOUT_CALORIES`].
pub fn estimate_calories(duration_minutes: f64, weight_kg: f64) -> DomainResult<f64> {
    check_measurement("duration", duration_minutes)?;
    check_measurement("weight", weight_kg)?;
    validate_quantity("duration", duration_minutes, MAX_DURATION_MINUTES)?;
    validate_quantity("weight", weight_kg, MAX_WEIGHT_KG)?;

    let calories = duration_minutes.trunc() * weight_kg.trunc() * CALORIES_PER_KG_PER_MINUTE;
    validate_quantity("estimated calories", calories, MAX_WORKOUT_CALORIES)?;
    Ok(calories)
}

fn check_measurement(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() {
        return Err(DomainError::measurement(format!(
            "{} must be a finite number",
            field
        )));
    }
    if value < 0.0 {
        return Err(DomainError::measurement(format!(
            "{} cannot be negative",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(10.0, 30.0, 1500.0)]
    #[case(0.0, 80.0, 0.0)]
    #[case(45.0, 0.0, 0.0)]
    #[case(10.9, 30.7, 1500.0)]
    #[case(1.0, 1.0, 5.0)]
    fn test_estimate_truncates_inputs(
        #[case] duration: f64,
        #[case] weight: f64,
        #[case] expected: f64,
    ) {
        assert_eq!(estimate_calories(duration, weight).unwrap(), expected);
    }

    #[rstest]
    #[case(f64::NAN, 10.0)]
    #[case(10.0, f64::NAN)]
    #[case(-1.0, 10.0)]
    #[case(10.0, -0.5)]
    #[case(f64::INFINITY, 10.0)]
    #[case(10.0, 1.0e30)]
    #[case(10.0, 2.0e8)]
    #[case(2.0e8, 10.0)]
    #[case(1.0e6, 1.0e6)]
    fn test_estimate_rejects_bad_input(#[case] duration: f64, #[case] weight: f64) {
        let err = estimate_calories(duration, weight).unwrap_err();
        assert!(matches!(err, DomainError::InvalidMeasurement(_)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_monotonic_in_duration(
            d in 0.0f64..600.0,
            delta in 0.0f64..600.0,
            w in 0.0f64..500.0
        ) {
            let lower = estimate_calories(d, w).unwrap();
            let higher = estimate_calories(d + delta, w).unwrap();
            prop_assert!(higher >= lower, "{} < {} for d={}, delta={}, w={}", higher, lower, d, delta, w);
        }

        #[test]
        fn prop_monotonic_in_weight(
            d in 0.0f64..600.0,
            w in 0.0f64..500.0,
            delta in 0.0f64..500.0
        ) {
            let lower = estimate_calories(d, w).unwrap();
            let higher = estimate_calories(d, w + delta).unwrap();
            prop_assert!(higher >= lower);
        }

        #[test]
        fn prop_never_negative(d in 0.0f64..1000.0, w in 0.0f64..1000.0) {
            prop_assert!(estimate_calories(d, w).unwrap() >= 0.0);
        }
    }
}
