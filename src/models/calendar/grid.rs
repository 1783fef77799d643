//! Month-grid arithmetic for the calendar views.
//!
//! A month grid is the ordered run of dates from the Sunday on or before
//! the 1st of the month to the Saturday on or after its last day, so a
//! month always renders as whole weeks.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Compute the cell dates for a month view.
///
/// `month0` is 0-based (0 = January) to match the service contract; values
/// of 12 and above roll into the following year, so callers can navigate
/// months with plain `month0 +/- 1` arithmetic.
///
/// The result length is always a multiple of 7 (28, 35 or 42 for Gregorian
/// months), strictly ascending with no gaps, and contains every date of the
/// target month exactly once. Pure: same input, same output.
pub fn month_grid(year: i32, month0: u32) -> Vec<NaiveDate> {
    let Some(year) = year.checked_add((month0 / 12) as i32) else {
        return Vec::new();
    };
    let month = month0 % 12 + 1;

    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let Some(last) = last_day_of_month(year, month) else {
        return Vec::new();
    };

    let lead = first.weekday().num_days_from_sunday() as i64;
    let trail = 6 - last.weekday().num_days_from_sunday() as i64;
    let grid_start = first - Duration::days(lead);
    let grid_end = last + Duration::days(trail);

    grid_start
        .iter_days()
        .take_while(|d| *d <= grid_end)
        .collect()
}

/// Last day of the given 1-based month, or `None` outside chrono's range.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month >= 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Heading for a month view, e.g. "February 2024".
pub fn month_label(year: i32, month0: u32) -> String {
    let Some(year) = year.checked_add((month0 / 12) as i32) else {
        return String::new();
    };
    let month = month0 % 12 + 1;
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d.format("%B %Y").to_string(),
        None => String::new(),
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count Monday-Friday days in `start..=end`; 0 when the range is empty.
pub fn working_days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|d| !is_weekend(*d))
        .count() as u32
}
