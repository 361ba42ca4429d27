//! Calendar helpers for day and month windows
//!
//! All windows are half-open `[start, end)` ranges of UTC instants.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

/// Midnight UTC at the start of `date`
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// `[date 00:00, date + 1 day 00:00)`
pub fn day_window(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = start_of_day(date);
    (start, start + Duration::days(1))
}

/// `[first day of month 00:00, first day of next month 00:00)`.
///
/// Returns `None` when `month` is not in `1..=12` or the year is out of range.
pub fn month_window(year: i32, month: u32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start_of_day(first), start_of_day(next)))
}

/// The `days` calendar days ending on `today`, oldest first
pub fn trailing_days(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days as i64)
        .rev()
        .map(|back| today - Duration::days(back))
        .collect()
}

/// Day-of-month with its English ordinal suffix, e.g. `1st`, `12th`, `23rd`
pub fn day_label(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", day, suffix)
}
