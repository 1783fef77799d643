use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

use crate::auth::session::require_any_role;
use crate::errors::{AppError, render};
use crate::models::pentest::PentestStatus;
use crate::models::role::Role;
use crate::services::{PentestDirectory, UserDirectory};
use crate::templates_structs::{PageContext, PentestListTemplate, PentestRow};

#[derive(Deserialize)]
pub struct PentestListQuery {
    /// "all" or a snake_case status.
    pub status: Option<String>,
}

pub async fn list<A>(
    api: web::Data<A>,
    session: Session,
    query: web::Query<PentestListQuery>,
) -> Result<HttpResponse, AppError>
where
    A: PentestDirectory + UserDirectory + 'static,
{
    require_any_role(&session, &[Role::Ces, Role::Manager])?;
    let ctx = PageContext::build(&session, "/pentests")?;

    let status = match query.status.as_deref() {
        None | Some("all") => None,
        Some(raw) => PentestStatus::from_str(raw).ok(),
    };

    let (pentests, users) = tokio::join!(api.list_pentests(status), api.list_users(None));

    let (pentests, error) = match pentests {
        Ok(pentests) => (pentests, None),
        Err(e) => (Vec::new(), Some(e.to_string())),
    };
    let names: HashMap<i64, String> = match users {
        Ok(users) => users.into_iter().map(|u| (u.id, u.name)).collect(),
        Err(e) => {
            log::warn!("user directory unavailable: {e}");
            HashMap::new()
        }
    };

    let rows = pentests
        .into_iter()
        .map(|p| PentestRow {
            kind_label: p.kind.label(),
            status_label: p.status.label(),
            status_class: p.status.as_str(),
            assignee: names.get(&p.assigned_to).cloned().unwrap_or_default(),
            start_date: p.start_date.format("%Y-%m-%d").to_string(),
            end_date: p.end_date.format("%Y-%m-%d").to_string(),
            progress: p.progress,
            project_name: p.project_name,
        })
        .collect();

    let tmpl = PentestListTemplate {
        ctx,
        error,
        statuses: &PentestStatus::ALL,
        selected_status: status
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| "all".to_string()),
        rows,
    };
    render(tmpl)
}
