//! Role-specific projection of the raw stats payload into display metrics.

use crate::models::role::Role;
use crate::models::stats::DashboardStats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

fn card(label: &'static str, value: u32) -> StatCard {
    StatCard {
        label,
        value: value.to_string(),
    }
}

fn percent_card(label: &'static str, numerator: u32, denominator: u32) -> StatCard {
    StatCard {
        label,
        value: format!("{}%", percent(numerator, denominator)),
    }
}

/// Integer percentage, rounded half-up. A zero denominator yields 0 rather
/// than an error; degenerate input is normal here, not a failure.
pub fn percent(numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    (numerator as f64 / denominator as f64 * 100.0).round() as u32
}

/// The role-specific stat cards, in display order.
///
/// `None` stats means the payload has not loaded yet; the projection is
/// empty and the caller renders a loading/empty state.
pub fn project(role: Role, stats: Option<&DashboardStats>) -> Vec<StatCard> {
    let Some(s) = stats else {
        return Vec::new();
    };
    match role {
        Role::Pentester => vec![
            card("Working Days", s.working_days),
            card("Pentest Days", s.pentest_days),
            card("Leave Days", s.leave_days),
            card("Non-Pentest Days", s.non_pentest_days),
        ],
        Role::Ces => vec![
            card("Total Pentests", s.total_pentests),
            card("Completed", s.completed_pentests),
            card("In Progress", s.in_progress_pentests),
            card("Planned", s.planned_pentests),
        ],
        Role::Manager => vec![
            card("Total Pentests", s.total_pentests),
            percent_card("Completion Rate", s.completed_pentests, s.total_pentests),
            card("Active Pentests", s.in_progress_pentests),
            percent_card("Team Utilization", s.pentest_days, s.working_days),
        ],
    }
}

/// One row of the manager's status-breakdown panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownRow {
    pub label: &'static str,
    pub count: u32,
    /// Share of `total_pentests`, zero-safe.
    pub percent: u32,
}

pub fn status_breakdown(s: &DashboardStats) -> Vec<BreakdownRow> {
    [
        ("Completed", s.completed_pentests),
        ("In Progress", s.in_progress_pentests),
        ("Planned", s.planned_pentests),
    ]
    .into_iter()
    .map(|(label, count)| BreakdownRow {
        label,
        count,
        percent: percent(count, s.total_pentests),
    })
    .collect()
}

/// The manager's monthly-overview rows (the per-day counters).
pub fn monthly_overview(s: &DashboardStats) -> Vec<StatCard> {
    vec![
        card("Working Days", s.working_days),
        card("Pentest Days", s.pentest_days),
        card("Leave Days", s.leave_days),
        card("Non-Pentest Days", s.non_pentest_days),
    ]
}
