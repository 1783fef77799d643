use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;
use std::str::FromStr;

use crate::auth::session::require_user;
use crate::composer::{self, DashboardStore, SliceState, ViewDeps};
use crate::errors::{AppError, render};
use crate::models::calendar::{
    CalendarEvent, build_cells, last_day_of_month, month_grid, month_label, weeks,
};
use crate::models::dashboard::{monthly_overview, project, status_breakdown};
use crate::models::nav_item::{FilterKind, visible_filters};
use crate::models::pentest::PentestStatus;
use crate::models::role::Role;
use crate::services::{CalendarData, ManagerAggregation, UserDirectory, UserScope};
use crate::templates_structs::{DashboardFilters, DashboardTemplate, PageContext};

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub year: Option<i32>,
    /// 0-based month, matching the calendar service contract.
    pub month: Option<u32>,
    /// "all" or a pentester id; CES scoping only.
    pub user: Option<String>,
    /// "all" or a snake_case status; CES filtering only.
    pub status: Option<String>,
    /// Manager stats range, %Y-%m-%d.
    pub start: Option<String>,
    pub end: Option<String>,
}

fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

fn month_href(year: i32, month0: u32, query: &DashboardQuery) -> String {
    let mut href = format!("/dashboard?year={year}&month={month0}");
    if let Some(user) = &query.user {
        href.push_str(&format!("&user={user}"));
    }
    if let Some(status) = &query.status {
        href.push_str(&format!("&status={status}"));
    }
    if let Some(start) = &query.start {
        href.push_str(&format!("&start={start}"));
    }
    if let Some(end) = &query.end {
        href.push_str(&format!("&end={end}"));
    }
    href
}

fn prev_month(year: i32, month0: u32) -> (i32, u32) {
    if month0 == 0 { (year.saturating_sub(1), 11) } else { (year, month0 - 1) }
}

fn next_month(year: i32, month0: u32) -> (i32, u32) {
    if month0 >= 11 { (year.saturating_add(1), 0) } else { (year, month0 + 1) }
}

pub async fn index<A>(
    api: web::Data<A>,
    store: web::Data<DashboardStore>,
    session: Session,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, AppError>
where
    A: CalendarData + ManagerAggregation + UserDirectory + 'static,
{
    let user = require_user(&session)?;
    let ctx = PageContext::build(&session, "/dashboard")?;

    let today = Local::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month0 = query.month.unwrap_or_else(|| today.month0());

    let selected_pentester = match query.user.as_deref() {
        None | Some("all") => None,
        Some(raw) => raw.parse::<i64>().ok(),
    };
    let selected_status = match query.status.as_deref() {
        None | Some("all") => None,
        Some(raw) => PentestStatus::from_str(raw).ok(),
    };

    let scope = match user.role {
        Role::Pentester => UserScope::User(user.id),
        Role::Ces => selected_pentester
            .map(UserScope::User)
            .unwrap_or(UserScope::AllPentesters),
        Role::Manager => UserScope::AllPentesters,
    };

    // Manager stats range defaults to the current month.
    let range_start = parse_date(query.start.as_deref())
        .or_else(|| NaiveDate::from_ymd_opt(today.year(), today.month(), 1))
        .unwrap_or(today);
    let range_end = parse_date(query.end.as_deref())
        .or_else(|| last_day_of_month(today.year(), today.month()))
        .unwrap_or(today);

    let deps = ViewDeps {
        scope,
        year,
        month0,
    };
    let token = store.begin(user.id, deps);

    let (events_state, stats_state) = match user.role {
        Role::Manager => {
            composer::load_manager_slices(api.get_ref(), deps, range_start, range_end).await
        }
        _ => composer::load_slices(api.get_ref(), deps).await,
    };
    // Discarded when a request begun later for this user got there first.
    store.apply_events(token, events_state);
    store.apply_stats(token, stats_state);

    let snap = match store.snapshot(user.id) {
        Some(snap) => snap,
        None => return Err(AppError::Session("dashboard state lost".to_string())),
    };

    let mut events: Vec<CalendarEvent> = snap.events.ready().cloned().unwrap_or_default();
    if user.role == Role::Ces {
        if let Some(status) = selected_status {
            events.retain(|e| e.status == status);
        }
    }

    let grid_year = snap.deps.year;
    let grid_month0 = snap.deps.month0;
    let grid = month_grid(grid_year, grid_month0);
    let cells = build_cells(&grid, &events, grid_year, grid_month0, today);

    let stats_cards = project(user.role, snap.stats.ready());
    let (breakdown, overview) = match (user.role, snap.stats.ready()) {
        (Role::Manager, Some(stats)) => (status_breakdown(stats), monthly_overview(stats)),
        _ => (Vec::new(), Vec::new()),
    };

    let active_filters = visible_filters(user.role);
    let pentesters = if active_filters.contains(&FilterKind::PentesterSelect) {
        match api.list_users(Some(Role::Pentester)).await {
            Ok(users) => users,
            Err(e) => {
                log::warn!("user directory unavailable: {e}");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };

    let (heading, subheading) = match user.role {
        Role::Pentester => (
            "Pentester Dashboard",
            "Your schedule and monthly activity at a glance",
        ),
        Role::Ces => (
            "CES Team Dashboard",
            "Manage pentest assignments and team coordination",
        ),
        Role::Manager => (
            "Manager Dashboard",
            "Comprehensive oversight of all penetration testing operations",
        ),
    };

    let (py, pm) = prev_month(grid_year, grid_month0);
    let (ny, nm) = next_month(grid_year, grid_month0);

    let tmpl = DashboardTemplate {
        ctx,
        heading: heading.to_string(),
        subheading,
        stats_loading: matches!(snap.stats, SliceState::Loading),
        stats_error: snap.stats.error().map(str::to_string),
        stats_cards,
        events_error: snap.events.error().map(str::to_string),
        month_label: month_label(grid_year, grid_month0),
        prev_href: month_href(py, pm, &query),
        next_href: month_href(ny, nm, &query),
        weeks: weeks(cells),
        filters: DashboardFilters {
            show_pentester_select: active_filters.contains(&FilterKind::PentesterSelect),
            pentesters,
            selected_pentester: selected_pentester
                .map(|id| id.to_string())
                .unwrap_or_else(|| "all".to_string()),
            show_status_select: active_filters.contains(&FilterKind::StatusSelect),
            statuses: &PentestStatus::ALL,
            selected_status: selected_status
                .map(|s| s.as_str().to_string())
                .unwrap_or_else(|| "all".to_string()),
            show_date_range: active_filters.contains(&FilterKind::DateRange),
            range_start: range_start.format("%Y-%m-%d").to_string(),
            range_end: range_end.format("%Y-%m-%d").to_string(),
        },
        show_manager_panels: user.role == Role::Manager && snap.stats.ready().is_some(),
        breakdown,
        overview,
    };
    render(tmpl)
}
