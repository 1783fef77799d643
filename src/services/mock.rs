//! Canned in-process backend.
//!
//! Stands in for the future REST API behind the exact trait interfaces in
//! [`super`]. Data is deterministic per requested month so the UI is stable
//! across reloads; optional latency simulates a network round trip.

use std::sync::Mutex;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rand::Rng;

use crate::models::calendar::{CalendarEvent, EventKind, last_day_of_month, working_days_between};
use crate::models::pentest::{Pentest, PentestKind, PentestStatus};
use crate::models::role::Role;
use crate::models::stats::DashboardStats;
use crate::models::user::User;

use super::{
    AuthService, AuthUser, CalendarData, ExportFilters, ExportFormat, ManagerAggregation,
    PentestDirectory, ReportSubmission, ReportSubmissionRequest, ServiceError, UserDirectory,
    UserScope,
};

pub struct MockApi {
    latency: bool,
    fail_events: bool,
    fail_stats: bool,
    submitted: Mutex<Vec<ReportSubmissionRequest>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApi {
    pub fn new() -> Self {
        MockApi {
            latency: false,
            fail_events: false,
            fail_stats: false,
            submitted: Mutex::new(Vec::new()),
        }
    }

    /// Sleep 200-700 ms before every response, like the original mock client.
    pub fn with_latency() -> Self {
        MockApi {
            latency: true,
            ..Self::new()
        }
    }

    /// Make the events endpoint fail with a transport error.
    pub fn failing_events() -> Self {
        MockApi {
            fail_events: true,
            ..Self::new()
        }
    }

    /// Make the stats endpoints fail with a transport error.
    pub fn failing_stats() -> Self {
        MockApi {
            fail_stats: true,
            ..Self::new()
        }
    }

    /// Reports accepted so far, oldest first.
    pub fn submitted_reports(&self) -> Vec<ReportSubmissionRequest> {
        self.submitted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    async fn simulate_delay(&self) {
        if self.latency {
            let ms = rand::rng().random_range(200..700);
            tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
        }
    }

    fn roster() -> Vec<User> {
        let user = |id: i64, name: &str, email: &str, role: Role| User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role,
            is_active: true,
        };
        vec![
            user(1, "John Doe", "john@example.com", Role::Pentester),
            user(2, "Jane Smith", "jane@example.com", Role::Pentester),
            user(3, "Mike Wilson", "mike.ces@example.com", Role::Ces),
            user(4, "Sarah Chen", "sarah.manager@example.com", Role::Manager),
        ]
    }

    fn pentest_roster() -> Vec<Pentest> {
        let pentest = |id: i64,
                       project_name: &str,
                       kind: PentestKind,
                       status: PentestStatus,
                       assigned_to: i64,
                       start: (i32, u32, u32),
                       end: (i32, u32, u32),
                       progress: u8| Pentest {
            id,
            project_name: project_name.to_string(),
            kind,
            status,
            assigned_to,
            start_date: date(start.0, start.1, start.2),
            end_date: date(end.0, end.1, end.2),
            progress,
        };
        vec![
            pentest(1, "Acme Web Portal", PentestKind::Web, PentestStatus::InProgress, 1, (2026, 8, 3), (2026, 8, 7), 60),
            pentest(2, "Mobile Banking App", PentestKind::Mobile, PentestStatus::InProgress, 2, (2026, 8, 5), (2026, 8, 9), 40),
            pentest(3, "Internal Infra Review", PentestKind::Infrastructure, PentestStatus::Planned, 1, (2026, 8, 10), (2026, 8, 12), 0),
            pentest(4, "Partner API", PentestKind::Api, PentestStatus::OnHold, 2, (2026, 8, 17), (2026, 8, 18), 25),
            pentest(5, "Legacy Thick Client", PentestKind::ThickClient, PentestStatus::Completed, 1, (2026, 7, 6), (2026, 7, 17), 100),
        ]
    }

    /// Per-pentester baseline for a month; the "all pentesters" scope sums
    /// one baseline per pentester.
    fn baseline_stats() -> DashboardStats {
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

    fn scaled_stats(factor: u32, working_days: u32) -> DashboardStats {
        let b = Self::baseline_stats();
        DashboardStats {
            working_days,
            pentest_days: b.pentest_days * factor,
            leave_days: b.leave_days * factor,
            non_pentest_days: b.non_pentest_days * factor,
            total_pentests: b.total_pentests * factor,
            completed_pentests: b.completed_pentests * factor,
            in_progress_pentests: b.in_progress_pentests * factor,
            planned_pentests: b.planned_pentests * factor,
            on_hold_pentests: b.on_hold_pentests * factor,
            stopped_pentests: b.stopped_pentests * factor,
        }
    }

    fn pentester_count() -> u32 {
        Self::roster()
            .iter()
            .filter(|u| u.role == Role::Pentester)
            .count() as u32
    }

    /// Deterministic events for one pentester in the requested month.
    /// Day numbers past the end of a short month are clamped or dropped.
    fn month_events(user_id: i64, year: i32, month0: u32) -> Vec<CalendarEvent> {
        let Some(year) = year.checked_add((month0 / 12) as i32) else {
            return Vec::new();
        };
        let month = month0 % 12 + 1;
        let Some(last) = last_day_of_month(year, month) else {
            return Vec::new();
        };
        let last_day = last.day();

        // (seq, title, kind, status, pentest_id, start_day, end_day)
        let plan: &[(i64, &str, EventKind, PentestStatus, Option<i64>, u32, u32)] = match user_id {
            1 => &[
                (1, "Acme Web Portal", EventKind::Pentest, PentestStatus::InProgress, Some(1), 3, 7),
                (2, "Internal Infra Review", EventKind::Pentest, PentestStatus::Planned, Some(3), 10, 12),
                (3, "Annual Leave", EventKind::Leave, PentestStatus::Planned, None, 15, 15),
                (4, "Security Training", EventKind::NonPentest, PentestStatus::Planned, None, 21, 22),
            ],
            2 => &[
                (1, "Mobile Banking App", EventKind::Pentest, PentestStatus::InProgress, Some(2), 5, 9),
                (2, "Partner API", EventKind::Pentest, PentestStatus::OnHold, Some(4), 17, 18),
                (3, "Annual Leave", EventKind::Leave, PentestStatus::Planned, None, 19, 19),
                (4, "Industry Conference", EventKind::NonPentest, PentestStatus::Planned, None, 25, 25),
            ],
            _ => &[],
        };

        plan.iter()
            .filter(|(_, _, _, _, _, start_day, _)| *start_day <= last_day)
            .filter_map(|&(seq, title, kind, status, pentest_id, start_day, end_day)| {
                let start = at(year, month, start_day, 9, 0)?;
                let end = at(year, month, end_day.min(last_day), 17, 30)?;
                Some(CalendarEvent {
                    id: user_id * 100 + seq,
                    title: title.to_string(),
                    start,
                    end,
                    kind,
                    status,
                    pentest_id,
                    user_id,
                })
            })
            .collect()
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(hour, minute, 0)
        .map(|dt| dt.and_utc())
}

impl AuthService for MockApi {
    async fn login(&self, email: &str, password: &str) -> Result<AuthUser, ServiceError> {
        self.simulate_delay().await;
        if password.is_empty() {
            return Err(ServiceError::Rejected("Invalid email or password".to_string()));
        }

        // Known addresses map to the roster; anything else gets a role
        // derived from the address, matching the original mock backend.
        if let Some(user) = Self::roster().into_iter().find(|u| u.email == email) {
            return Ok(AuthUser {
                id: user.id,
                name: user.name,
                email: user.email,
                role: user.role,
            });
        }

        let role = if email.contains("ces") {
            Role::Ces
        } else if email.contains("manager") {
            Role::Manager
        } else {
            Role::Pentester
        };
        let name = email
            .split('@')
            .next()
            .unwrap_or("user")
            .replace(['.', '_'], " ");
        Ok(AuthUser {
            id: 1,
            name,
            email: email.to_string(),
            role,
        })
    }

    async fn logout(&self) -> Result<(), ServiceError> {
        self.simulate_delay().await;
        Ok(())
    }
}

impl UserDirectory for MockApi {
    async fn list_users(&self, role: Option<Role>) -> Result<Vec<User>, ServiceError> {
        self.simulate_delay().await;
        let users = Self::roster()
            .into_iter()
            .filter(|u| role.is_none_or(|r| u.role == r))
            .collect();
        Ok(users)
    }
}

impl CalendarData for MockApi {
    async fn events(
        &self,
        scope: UserScope,
        year: i32,
        month0: u32,
    ) -> Result<Vec<CalendarEvent>, ServiceError> {
        self.simulate_delay().await;
        if self.fail_events {
            return Err(ServiceError::Transport(
                "calendar service unavailable".to_string(),
            ));
        }
        let events = match scope {
            UserScope::User(id) => Self::month_events(id, year, month0),
            UserScope::AllPentesters => Self::roster()
                .iter()
                .filter(|u| u.role == Role::Pentester)
                .flat_map(|u| Self::month_events(u.id, year, month0))
                .collect(),
        };
        Ok(events)
    }

    async fn stats(
        &self,
        scope: UserScope,
        year: i32,
        month0: u32,
    ) -> Result<DashboardStats, ServiceError> {
        self.simulate_delay().await;
        if self.fail_stats {
            return Err(ServiceError::Transport(
                "stats service unavailable".to_string(),
            ));
        }
        let month = month0 % 12 + 1;
        let working = match year.checked_add((month0 / 12) as i32) {
            Some(year) => match (
                NaiveDate::from_ymd_opt(year, month, 1),
                last_day_of_month(year, month),
            ) {
                (Some(first), Some(last)) => working_days_between(first, last),
                _ => 0,
            },
            None => 0,
        };
        let stats = match scope {
            UserScope::User(_) => Self::scaled_stats(1, working),
            UserScope::AllPentesters => {
                let n = Self::pentester_count();
                Self::scaled_stats(n, working * n)
            }
        };
        Ok(stats)
    }
}

impl ManagerAggregation for MockApi {
    async fn global_stats(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DashboardStats, ServiceError> {
        self.simulate_delay().await;
        if self.fail_stats {
            return Err(ServiceError::Transport(
                "aggregation service unavailable".to_string(),
            ));
        }
        let n = Self::pentester_count();
        let working = working_days_between(start, end) * n;
        Ok(Self::scaled_stats(n, working))
    }

    async fn export_reports(
        &self,
        format: ExportFormat,
        filters: &ExportFilters,
    ) -> Result<Vec<u8>, ServiceError> {
        self.simulate_delay().await;
        match format {
            ExportFormat::Csv => {
                let names: std::collections::HashMap<i64, String> = Self::roster()
                    .into_iter()
                    .map(|u| (u.id, u.name))
                    .collect();
                let mut out = String::from("project,type,status,assignee,start,end,progress\n");
                for p in Self::pentest_roster() {
                    if filters.status.is_some_and(|s| s != p.status) {
                        continue;
                    }
                    // Keep pentests overlapping the filter range.
                    if p.end_date < filters.start || p.start_date > filters.end {
                        continue;
                    }
                    let assignee = names.get(&p.assigned_to).map(String::as_str).unwrap_or("");
                    out.push_str(&format!(
                        "{},{},{},{},{},{},{}%\n",
                        p.project_name,
                        p.kind.label(),
                        p.status.label(),
                        assignee,
                        p.start_date,
                        p.end_date,
                        p.progress,
                    ));
                }
                Ok(out.into_bytes())
            }
            // The original backend never implemented this path either.
            ExportFormat::Pdf => Err(ServiceError::Rejected(
                "PDF export is not available yet".to_string(),
            )),
        }
    }
}

impl ReportSubmission for MockApi {
    async fn submit_report(&self, report: &ReportSubmissionRequest) -> Result<(), ServiceError> {
        self.simulate_delay().await;
        let known = Self::pentest_roster().iter().any(|p| p.id == report.pentest_id);
        if !known {
            return Err(ServiceError::Rejected("Unknown pentest".to_string()));
        }
        self.submitted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(report.clone());
        Ok(())
    }
}

impl PentestDirectory for MockApi {
    async fn list_pentests(
        &self,
        status: Option<PentestStatus>,
    ) -> Result<Vec<Pentest>, ServiceError> {
        self.simulate_delay().await;
        let pentests = Self::pentest_roster()
            .into_iter()
            .filter(|p| status.is_none_or(|s| p.status == s))
            .collect();
        Ok(pentests)
    }
}
