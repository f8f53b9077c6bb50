//! Time-related utility functions.
//!
//! Provides the wall-clock date to fractional-year conversion used by the
//! datum drift correction.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Convert a UTC timestamp to a fractional year.
///
/// The fraction is the elapsed portion of the timestamp's own calendar
/// year, so leap years divide by 366 days. Mid-2026 maps to roughly
/// 2026.5.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use swetrack::time::fractional_year;
///
/// let new_year = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(fractional_year(new_year), 2026.0);
/// ```
pub fn fractional_year(when: DateTime<Utc>) -> f64 {
    let year = when.year();
    let year_length_days = if is_leap_year(year) { 366.0 } else { 365.0 };

    let seconds_into_day = when.num_seconds_from_midnight() as f64;
    let elapsed_days = when.ordinal0() as f64 + seconds_into_day / 86_400.0;

    year as f64 + elapsed_days / year_length_days
}

/// Gregorian leap year rule.
#[inline]
fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
