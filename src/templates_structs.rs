//! Template context structures for the Askama pages.

use actix_session::Session;
use askama::Template;

use crate::auth::session::{require_user, take_flash};
use crate::errors::AppError;
use crate::models::calendar::DayCell;
use crate::models::dashboard::{BreakdownRow, StatCard};
use crate::models::nav_item::{NavLink, nav_links};
use crate::models::pentest::PentestStatus;
use crate::models::role::Role;
use crate::models::user::User;

pub fn app_name() -> String {
    std::env::var("PENTESTOPS_APP_NAME").unwrap_or_else(|_| "PentestOps".to_string())
}

/// Common context shared by all authenticated pages.
pub struct PageContext {
    pub username: String,
    pub avatar_initial: String,
    pub role: Role,
    pub role_label: &'static str,
    pub flash: Option<String>,
    pub nav: Vec<NavLink>,
    pub app_name: String,
}

impl PageContext {
    pub fn build(session: &Session, current_path: &str) -> Result<Self, AppError> {
        let user = require_user(session)?;
        let avatar_initial = user
            .name
            .chars()
            .next()
            .unwrap_or('?')
            .to_uppercase()
            .to_string();
        Ok(Self {
            username: user.name,
            avatar_initial,
            role: user.role,
            role_label: user.role.label(),
            flash: take_flash(session),
            nav: nav_links(user.role, current_path),
            app_name: app_name(),
        })
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub app_name: String,
}

/// Filter affordances rendered above the dashboard calendar; which of them
/// show is decided by `models::nav_item::visible_filters`.
pub struct DashboardFilters {
    pub show_pentester_select: bool,
    pub pentesters: Vec<User>,
    /// "all" or a user id as string.
    pub selected_pentester: String,
    pub show_status_select: bool,
    pub statuses: &'static [PentestStatus],
    /// "all" or a snake_case status.
    pub selected_status: String,
    pub show_date_range: bool,
    pub range_start: String,
    pub range_end: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub heading: String,
    pub subheading: &'static str,
    pub stats_loading: bool,
    pub stats_error: Option<String>,
    pub stats_cards: Vec<StatCard>,
    pub events_error: Option<String>,
    pub month_label: String,
    pub prev_href: String,
    pub next_href: String,
    pub weeks: Vec<Vec<DayCell>>,
    pub filters: DashboardFilters,
    pub show_manager_panels: bool,
    pub breakdown: Vec<BreakdownRow>,
    pub overview: Vec<StatCard>,
}

#[derive(Template)]
#[template(path = "calendar.html")]
pub struct CalendarTemplate {
    pub ctx: PageContext,
    pub events_error: Option<String>,
    pub month_label: String,
    pub prev_href: String,
    pub next_href: String,
    pub weeks: Vec<Vec<DayCell>>,
}

#[derive(Template)]
#[template(path = "users.html")]
pub struct UserListTemplate {
    pub ctx: PageContext,
    pub error: Option<String>,
    pub users: Vec<User>,
}

/// A pentest with its assignee resolved, ready for the table.
pub struct PentestRow {
    pub project_name: String,
    pub kind_label: &'static str,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub assignee: String,
    pub start_date: String,
    pub end_date: String,
    pub progress: u8,
}

#[derive(Template)]
#[template(path = "pentests.html")]
pub struct PentestListTemplate {
    pub ctx: PageContext,
    pub error: Option<String>,
    pub statuses: &'static [PentestStatus],
    pub selected_status: String,
    pub rows: Vec<PentestRow>,
}

pub struct PentestOption {
    pub id: i64,
    pub label: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Default)]
pub struct ReportFormValues {
    pub pentest_id: String,
    pub vulnerabilities: String,
    pub remarks: String,
    pub start_date: String,
    pub end_date: String,
}

pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Template)]
#[template(path = "reports.html")]
pub struct ReportFormTemplate {
    pub ctx: PageContext,
    pub error: Option<String>,
    pub pentests: Vec<PentestOption>,
    pub form: ReportFormValues,
    pub errors: Vec<FieldError>,
    pub can_export: bool,
}
