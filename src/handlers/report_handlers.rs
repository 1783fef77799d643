use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;
use std::str::FromStr;

use crate::auth::session::{require_role, require_user, set_flash};
use crate::errors::{AppError, render};
use crate::models::calendar::last_day_of_month;
use crate::models::pentest::{Pentest, PentestStatus};
use crate::models::role::Role;
use crate::services::{
    ExportFilters, ExportFormat, ManagerAggregation, PentestDirectory, ReportSubmission,
    ReportSubmissionRequest, ServiceError,
};
use crate::templates_structs::{
    FieldError, PageContext, PentestOption, ReportFormTemplate, ReportFormValues,
};
use crate::validate;

fn pentest_options(pentests: Vec<Pentest>) -> Vec<PentestOption> {
    pentests
        .into_iter()
        .map(|p| PentestOption {
            id: p.id,
            label: format!("{} ({})", p.project_name, p.kind.label()),
            start_date: p.start_date.format("%Y-%m-%d").to_string(),
            end_date: p.end_date.format("%Y-%m-%d").to_string(),
        })
        .collect()
}

async fn build_form_page<A>(
    api: &A,
    session: &Session,
    form: ReportFormValues,
    errors: Vec<FieldError>,
    error: Option<String>,
) -> Result<HttpResponse, AppError>
where
    A: PentestDirectory,
{
    let user = require_user(session)?;
    let ctx = PageContext::build(session, "/reports")?;

    let (pentests, fetch_error) = match api.list_pentests(None).await {
        Ok(pentests) => (pentests, None),
        Err(e) => (Vec::new(), Some(e.to_string())),
    };

    let tmpl = ReportFormTemplate {
        ctx,
        error: error.or(fetch_error),
        pentests: pentest_options(pentests),
        form,
        errors,
        can_export: user.role == Role::Manager,
    };
    render(tmpl)
}

pub async fn form<A>(api: web::Data<A>, session: Session) -> Result<HttpResponse, AppError>
where
    A: PentestDirectory + 'static,
{
    build_form_page(
        api.get_ref(),
        &session,
        ReportFormValues::default(),
        Vec::new(),
        None,
    )
    .await
}

#[derive(Deserialize)]
pub struct ReportForm {
    pub pentest_id: String,
    pub vulnerabilities: String,
    pub remarks: String,
    pub start_date: String,
    pub end_date: String,
}

/// Validate the submission; either a fully-parsed request or the list of
/// field-level messages. Nothing is submitted while any field is invalid.
fn validate_report(form: &ReportForm) -> Result<ReportSubmissionRequest, Vec<FieldError>> {
    let mut errors = Vec::new();

    let pentest_id = match form.pentest_id.trim().parse::<i64>() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(FieldError {
                field: "pentest_id",
                message: "Please select a pentest".to_string(),
            });
            None
        }
    };

    let vulnerabilities = match validate::parse_vulnerabilities(&form.vulnerabilities) {
        Ok(n) => Some(n),
        Err(message) => {
            errors.push(FieldError {
                field: "vulnerabilities",
                message,
            });
            None
        }
    };

    if let Some(message) = validate::validate_remarks(&form.remarks) {
        errors.push(FieldError {
            field: "remarks",
            message,
        });
    }

    let start_date = NaiveDate::parse_from_str(form.start_date.trim(), "%Y-%m-%d").ok();
    if start_date.is_none() {
        errors.push(FieldError {
            field: "start_date",
            message: "Please select a start date".to_string(),
        });
    }
    let end_date = NaiveDate::parse_from_str(form.end_date.trim(), "%Y-%m-%d").ok();
    if end_date.is_none() {
        errors.push(FieldError {
            field: "end_date",
            message: "Please select an end date".to_string(),
        });
    }
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if let Some(message) = validate::validate_date_range(start, end) {
            errors.push(FieldError {
                field: "end_date",
                message,
            });
        }
    }

    match (pentest_id, vulnerabilities, start_date, end_date, errors.is_empty()) {
        (Some(pentest_id), Some(vulnerabilities), Some(start_date), Some(end_date), true) => {
            Ok(ReportSubmissionRequest {
                pentest_id,
                vulnerabilities,
                remarks: form.remarks.trim().to_string(),
                start_date,
                end_date,
            })
        }
        _ => Err(errors),
    }
}

pub async fn submit<A>(
    api: web::Data<A>,
    session: Session,
    form: web::Form<ReportForm>,
) -> Result<HttpResponse, AppError>
where
    A: PentestDirectory + ReportSubmission + 'static,
{
    let values = ReportFormValues {
        pentest_id: form.pentest_id.clone(),
        vulnerabilities: form.vulnerabilities.clone(),
        remarks: form.remarks.clone(),
        start_date: form.start_date.clone(),
        end_date: form.end_date.clone(),
    };

    let request = match validate_report(&form) {
        Ok(request) => request,
        Err(errors) => {
            return build_form_page(api.get_ref(), &session, values, errors, None).await;
        }
    };

    match api.submit_report(&request).await {
        Ok(()) => {
            set_flash(&session, "Monthly report submitted");
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/reports"))
                .finish())
        }
        Err(ServiceError::Rejected(msg)) => {
            let errors = vec![FieldError {
                field: "pentest_id",
                message: msg,
            }];
            build_form_page(api.get_ref(), &session, values, errors, None).await
        }
        Err(ServiceError::Transport(msg)) => {
            build_form_page(api.get_ref(), &session, values, Vec::new(), Some(msg)).await
        }
    }
}

#[derive(Deserialize)]
pub struct ExportQuery {
    pub format: String,
    pub start: Option<String>,
    pub end: Option<String>,
    pub status: Option<String>,
}

pub async fn export<A>(
    api: web::Data<A>,
    session: Session,
    query: web::Query<ExportQuery>,
) -> Result<HttpResponse, AppError>
where
    A: ManagerAggregation + 'static,
{
    require_role(&session, Role::Manager)?;

    let format = ExportFormat::parse(&query.format)
        .ok_or_else(|| AppError::Validation(format!("unknown export format: {}", query.format)))?;

    let today = Local::now().date_naive();
    let start = query
        .start
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .or_else(|| NaiveDate::from_ymd_opt(today.year(), today.month(), 1))
        .unwrap_or(today);
    let end = query
        .end
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .or_else(|| last_day_of_month(today.year(), today.month()))
        .unwrap_or(today);
    let status = query
        .status
        .as_deref()
        .and_then(|s| PentestStatus::from_str(s).ok());

    let filters = ExportFilters { start, end, status };
    match api.export_reports(format, &filters).await {
        Ok(bytes) => Ok(HttpResponse::Ok()
            .content_type(format.content_type())
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", format.file_name()),
            ))
            .body(bytes)),
        Err(e) => {
            set_flash(&session, &format!("Export failed: {e}"));
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/reports"))
                .finish())
        }
    }
}
