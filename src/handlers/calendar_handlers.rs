use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::{Datelike, Local};
use serde::Deserialize;

use crate::auth::session::require_user;
use crate::errors::{AppError, render};
use crate::models::calendar::{build_cells, month_grid, month_label, weeks};
use crate::models::role::Role;
use crate::services::{CalendarData, UserScope};
use crate::templates_structs::{CalendarTemplate, PageContext};

#[derive(Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    /// 0-based month.
    pub month: Option<u32>,
}

fn scope_for(role: Role, user_id: i64) -> UserScope {
    match role {
        Role::Pentester => UserScope::User(user_id),
        Role::Ces | Role::Manager => UserScope::AllPentesters,
    }
}

pub async fn index<A>(
    api: web::Data<A>,
    session: Session,
    query: web::Query<CalendarQuery>,
) -> Result<HttpResponse, AppError>
where
    A: CalendarData + 'static,
{
    let user = require_user(&session)?;
    let ctx = PageContext::build(&session, "/calendar")?;

    let today = Local::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month0 = query.month.unwrap_or_else(|| today.month0());

    let (events, events_error) = match api
        .events(scope_for(user.role, user.id), year, month0)
        .await
    {
        Ok(events) => (events, None),
        Err(e) => (Vec::new(), Some(e.to_string())),
    };

    let grid = month_grid(year, month0);
    let cells = build_cells(&grid, &events, year, month0, today);

    let (py, pm) = if month0 == 0 { (year.saturating_sub(1), 11) } else { (year, month0 - 1) };
    let (ny, nm) = if month0 >= 11 { (year.saturating_add(1), 0) } else { (year, month0 + 1) };

    let tmpl = CalendarTemplate {
        ctx,
        events_error,
        month_label: month_label(year, month0),
        prev_href: format!("/calendar?year={py}&month={pm}"),
        next_href: format!("/calendar?year={ny}&month={nm}"),
        weeks: weeks(cells),
    };
    render(tmpl)
}

/// JSON event feed for a month. The response echoes the (year, month) it
/// was computed for so a client can discard answers that no longer match
/// its current selection.
pub async fn events_api<A>(
    api: web::Data<A>,
    session: Session,
    query: web::Query<CalendarQuery>,
) -> Result<HttpResponse, AppError>
where
    A: CalendarData + 'static,
{
    let user = require_user(&session)?;

    let today = Local::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month0 = query.month.unwrap_or_else(|| today.month0());

    let events = api
        .events(scope_for(user.role, user.id), year, month0)
        .await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "year": year,
        "month": month0,
        "events": events,
    })))
}
