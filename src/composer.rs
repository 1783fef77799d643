//! Dashboard composition: issuing the per-view fetches and holding their
//! results.
//!
//! The two slices of a dashboard view (events, stats) are fetched
//! concurrently and resolved independently, so a failing slice never blocks
//! the one that succeeded. Results land in a [`DashboardStore`] slot tagged
//! with a generation token; a fetch issued for an older dependency snapshot
//! finds its token stale and is discarded instead of overwriting newer
//! state.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;

use crate::models::calendar::CalendarEvent;
use crate::models::stats::DashboardStats;
use crate::services::{CalendarData, ManagerAggregation, ServiceError, UserScope};

/// Per-slice load state. Slices are written at most once per fetch
/// resolution and replaced wholesale, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub enum SliceState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> SliceState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            SliceState::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SliceState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl<T> From<Result<T, ServiceError>> for SliceState<T> {
    fn from(result: Result<T, ServiceError>) -> Self {
        match result {
            Ok(v) => SliceState::Ready(v),
            Err(e) => SliceState::Failed(e.to_string()),
        }
    }
}

/// The dependency snapshot a dashboard load was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewDeps {
    pub scope: UserScope,
    pub year: i32,
    pub month0: u32,
}

/// Fetch both dashboard slices concurrently, awaiting them independently.
pub async fn load_slices<A: CalendarData>(
    api: &A,
    deps: ViewDeps,
) -> (SliceState<Vec<CalendarEvent>>, SliceState<DashboardStats>) {
    let (events, stats) = tokio::join!(
        api.events(deps.scope, deps.year, deps.month0),
        api.stats(deps.scope, deps.year, deps.month0),
    );
    (events.into(), stats.into())
}

/// Manager variant: events come from the calendar, stats from the global
/// aggregation over an explicit date range.
pub async fn load_manager_slices<A: CalendarData + ManagerAggregation>(
    api: &A,
    deps: ViewDeps,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> (SliceState<Vec<CalendarEvent>>, SliceState<DashboardStats>) {
    let (events, stats) = tokio::join!(
        api.events(deps.scope, deps.year, deps.month0),
        api.global_stats(range_start, range_end),
    );
    (events.into(), stats.into())
}

/// Token identifying one load against the slot it was begun for.
#[derive(Debug, Clone, Copy)]
pub struct LoadToken {
    user_id: i64,
    generation: u64,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u64,
    deps: ViewDeps,
    events: SliceState<Vec<CalendarEvent>>,
    stats: SliceState<DashboardStats>,
}

#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub deps: ViewDeps,
    pub events: SliceState<Vec<CalendarEvent>>,
    pub stats: SliceState<DashboardStats>,
}

/// Shared view-state slots, one per signed-in user.
#[derive(Debug, Default)]
pub struct DashboardStore {
    slots: Mutex<HashMap<i64, Slot>>,
}

impl DashboardStore {
    /// Start a load for a dependency snapshot. Bumps the user's generation
    /// and resets both slices to `Loading`; any still-running load begun
    /// earlier now holds a stale token.
    pub fn begin(&self, user_id: i64, deps: ViewDeps) -> LoadToken {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let generation = slots.get(&user_id).map(|s| s.generation + 1).unwrap_or(1);
        slots.insert(
            user_id,
            Slot {
                generation,
                deps,
                events: SliceState::Loading,
                stats: SliceState::Loading,
            },
        );
        LoadToken {
            user_id,
            generation,
        }
    }

    /// Apply an events result. Returns false (and changes nothing) when the
    /// token's generation is no longer current.
    pub fn apply_events(&self, token: LoadToken, state: SliceState<Vec<CalendarEvent>>) -> bool {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        match slots.get_mut(&token.user_id) {
            Some(slot) if slot.generation == token.generation => {
                slot.events = state;
                true
            }
            _ => false,
        }
    }

    /// Apply a stats result, with the same staleness rule as
    /// [`Self::apply_events`].
    pub fn apply_stats(&self, token: LoadToken, state: SliceState<DashboardStats>) -> bool {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        match slots.get_mut(&token.user_id) {
            Some(slot) if slot.generation == token.generation => {
                slot.stats = state;
                true
            }
            _ => false,
        }
    }

    pub fn snapshot(&self, user_id: i64) -> Option<DashboardSnapshot> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.get(&user_id).map(|slot| DashboardSnapshot {
            deps: slot.deps,
            events: slot.events.clone(),
            stats: slot.stats.clone(),
        })
    }
}
