//! External service interfaces.
//!
//! These traits are the only seam between the dashboard core and whatever
//! backs it. [`mock::MockApi`] implements all of them with canned data; a
//! real REST client would implement the same traits without the core
//! noticing the swap.

#![allow(async_fn_in_trait)]

pub mod mock;

use chrono::NaiveDate;
use std::fmt;

use crate::models::calendar::CalendarEvent;
use crate::models::pentest::{Pentest, PentestStatus};
use crate::models::role::Role;
use crate::models::stats::DashboardStats;
use crate::models::user::User;

/// Failure of an external service call, distinguishable by kind: transport
/// failures surface as dismissible notifications, rejections as field or
/// form errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Service unreachable or non-success response.
    Transport(String),
    /// The service understood the request and refused it.
    Rejected(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Transport(msg) => write!(f, "service unreachable: {msg}"),
            ServiceError::Rejected(msg) => write!(f, "request rejected: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Whose data a calendar/stats fetch covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserScope {
    User(i64),
    AllPentesters,
}

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

pub trait AuthService {
    async fn login(&self, email: &str, password: &str) -> Result<AuthUser, ServiceError>;
    async fn logout(&self) -> Result<(), ServiceError>;
}

pub trait UserDirectory {
    async fn list_users(&self, role: Option<Role>) -> Result<Vec<User>, ServiceError>;
}

pub trait CalendarData {
    async fn events(
        &self,
        scope: UserScope,
        year: i32,
        month0: u32,
    ) -> Result<Vec<CalendarEvent>, ServiceError>;

    async fn stats(
        &self,
        scope: UserScope,
        year: i32,
        month0: u32,
    ) -> Result<DashboardStats, ServiceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "csv" => Some(ExportFormat::Csv),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "pentest-report.csv",
            ExportFormat::Pdf => "pentest-report.pdf",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportFilters {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub status: Option<PentestStatus>,
}

pub trait ManagerAggregation {
    async fn global_stats(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DashboardStats, ServiceError>;

    async fn export_reports(
        &self,
        format: ExportFormat,
        filters: &ExportFilters,
    ) -> Result<Vec<u8>, ServiceError>;
}

/// A monthly report submission, already validated by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSubmissionRequest {
    pub pentest_id: i64,
    pub vulnerabilities: u32,
    pub remarks: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub trait ReportSubmission {
    async fn submit_report(&self, report: &ReportSubmissionRequest) -> Result<(), ServiceError>;
}

pub trait PentestDirectory {
    async fn list_pentests(
        &self,
        status: Option<PentestStatus>,
    ) -> Result<Vec<Pentest>, ServiceError>;
}
