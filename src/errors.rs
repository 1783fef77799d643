use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use crate::services::ServiceError;

#[derive(Debug)]
pub enum AppError {
    /// A backing service was unreachable or returned a non-success response.
    Service(String),
    /// User input failed validation before submission.
    Validation(String),
    Session(String),
    Template(askama::Error),
    PermissionDenied(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Service(e) => write!(f, "Service error: {e}"),
            AppError::Validation(e) => write!(f, "Validation error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::PermissionDenied(what) => write!(f, "Permission denied: {what}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::PermissionDenied(_) => HttpResponse::Forbidden().body("Forbidden"),
            AppError::Validation(msg) => HttpResponse::BadRequest().body(msg.clone()),
            // Broken or expired session: send the user back to login
            AppError::Session(_) => HttpResponse::SeeOther()
                .insert_header(("Location", "/login"))
                .finish(),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError().body("Internal Server Error")
            }
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Transport(msg) => AppError::Service(msg),
            ServiceError::Rejected(msg) => AppError::Validation(msg),
        }
    }
}

/// Render an Askama template into an HTML response.
pub fn render<T: askama::Template>(tmpl: T) -> Result<HttpResponse, AppError> {
    let body = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}
