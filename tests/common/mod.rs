//! Shared helpers for the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};

use pentestops::models::calendar::{CalendarEvent, EventKind};
use pentestops::models::pentest::PentestStatus;
use pentestops::models::stats::DashboardStats;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    date(year, month, day)
        .and_hms_opt(hour, minute, 0)
        .expect("valid time")
        .and_utc()
}

pub fn event(id: i64, start: DateTime<Utc>, end: DateTime<Utc>) -> CalendarEvent {
    CalendarEvent {
        id,
        title: format!("Event {id}"),
        start,
        end,
        kind: EventKind::Pentest,
        status: PentestStatus::Planned,
        pentest_id: None,
        user_id: 1,
    }
}

/// The canonical stats payload used throughout the tests.
pub fn sample_stats() -> DashboardStats {
    DashboardStats {
        working_days: 22,
        pentest_days: 15,
        leave_days: 2,
        non_pentest_days: 5,
        total_pentests: 8,
        completed_pentests: 3,
        in_progress_pentests: 2,
        planned_pentests: 3,
        on_hold_pentests: 0,
        stopped_pentests: 0,
    }
}
