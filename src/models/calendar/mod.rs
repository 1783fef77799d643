pub mod grid;
pub mod index;

pub use grid::{is_weekend, last_day_of_month, month_grid, month_label, working_days_between};
pub use index::{MAX_VISIBLE_EVENTS, DayCell, EventBadge, build_cells, events_on, weeks};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::pentest::PentestStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Pentest,
    Leave,
    NonPentest,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Pentest => "Pentest",
            EventKind::Leave => "Leave",
            EventKind::NonPentest => "Non-Pentest",
        }
    }
}

/// A date-ranged calendar entry. Immutable for the duration of a rendering
/// pass; `start <= end` is guaranteed by the producing service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub status: PentestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pentest_id: Option<i64>,
    pub user_id: i64,
}
