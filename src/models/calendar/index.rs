//! Mapping date-ranged events onto individual grid cells.

use chrono::{Datelike, NaiveDate};

use super::CalendarEvent;
use super::grid::is_weekend;

/// How many event badges a day cell shows before collapsing the rest into
/// a "+N more" count. Presentation policy only; the full set for a date
/// stays queryable through [`events_on`].
pub const MAX_VISIBLE_EVENTS: usize = 2;

/// All events covering `date`, in input order.
///
/// An event covers a date when `start <= date <= end` compared at calendar-
/// date granularity; time-of-day on the event bounds is ignored, so an
/// event ending at 17:30 still covers its final day.
pub fn events_on<'a>(events: &'a [CalendarEvent], date: NaiveDate) -> Vec<&'a CalendarEvent> {
    events
        .iter()
        .filter(|e| e.start.date_naive() <= date && date <= e.end.date_naive())
        .collect()
}

#[derive(Debug, Clone)]
pub struct EventBadge {
    pub title: String,
    pub kind_label: &'static str,
    pub status_label: &'static str,
    /// CSS class hook, one of the snake_case status names.
    pub status_class: &'static str,
}

#[derive(Debug, Clone)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    pub in_month: bool,
    pub is_today: bool,
    pub weekend: bool,
    pub badges: Vec<EventBadge>,
    /// Events beyond [`MAX_VISIBLE_EVENTS`] on this date.
    pub overflow: usize,
}

/// Populate a month grid with events.
///
/// `grid` comes from [`super::month_grid`] for the same `(year, month0)`;
/// cells outside the target month are flagged so templates can dim them.
pub fn build_cells(
    grid: &[NaiveDate],
    events: &[CalendarEvent],
    year: i32,
    month0: u32,
    today: NaiveDate,
) -> Vec<DayCell> {
    let target_year = year.checked_add((month0 / 12) as i32);
    let target_month = month0 % 12 + 1;

    grid.iter()
        .map(|&date| {
            let on_day = events_on(events, date);
            let overflow = on_day.len().saturating_sub(MAX_VISIBLE_EVENTS);
            let badges = on_day
                .iter()
                .take(MAX_VISIBLE_EVENTS)
                .map(|e| EventBadge {
                    title: e.title.clone(),
                    kind_label: e.kind.label(),
                    status_label: e.status.label(),
                    status_class: e.status.as_str(),
                })
                .collect();

            DayCell {
                date,
                day: date.day(),
                in_month: target_year == Some(date.year()) && date.month() == target_month,
                is_today: date == today,
                weekend: is_weekend(date),
                badges,
                overflow,
            }
        })
        .collect()
}

/// Split a flat cell run into rows of 7 for rendering.
pub fn weeks(cells: Vec<DayCell>) -> Vec<Vec<DayCell>> {
    let mut rows = Vec::with_capacity(cells.len() / 7);
    let mut row = Vec::with_capacity(7);
    for cell in cells {
        row.push(cell);
        if row.len() == 7 {
            rows.push(std::mem::take(&mut row));
            row.reserve(7);
        }
    }
    rows
}
