//! Stat-card projection tests: per-role tables, rounding, degenerate input.

mod common;

use common::sample_stats;
use pentestops::models::dashboard::{monthly_overview, percent, project, status_breakdown};
use pentestops::models::role::Role;
use pentestops::models::stats::DashboardStats;

#[test]
fn test_pentester_cards() {
    let stats = sample_stats();
    let cards = project(Role::Pentester, Some(&stats));
    let pairs: Vec<(&str, &str)> = cards.iter().map(|c| (c.label, c.value.as_str())).collect();
    assert_eq!(
        pairs,
        vec![
            ("Working Days", "22"),
            ("Pentest Days", "15"),
            ("Leave Days", "2"),
            ("Non-Pentest Days", "5"),
        ]
    );
}

#[test]
fn test_ces_cards() {
    let stats = sample_stats();
    let cards = project(Role::Ces, Some(&stats));
    let pairs: Vec<(&str, &str)> = cards.iter().map(|c| (c.label, c.value.as_str())).collect();
    assert_eq!(
        pairs,
        vec![
            ("Total Pentests", "8"),
            ("Completed", "3"),
            ("In Progress", "2"),
            ("Planned", "3"),
        ]
    );
}

#[test]
fn test_manager_cards_with_derived_rates() {
    let stats = sample_stats();
    let cards = project(Role::Manager, Some(&stats));
    let pairs: Vec<(&str, &str)> = cards.iter().map(|c| (c.label, c.value.as_str())).collect();
    assert_eq!(
        pairs,
        vec![
            ("Total Pentests", "8"),
            ("Completion Rate", "38%"), // 3/8 = 37.5, rounds up
            ("Active Pentests", "2"),
            ("Team Utilization", "68%"), // 15/22 = 68.18
        ]
    );
}

#[test]
fn test_zeroed_stats_never_divide_by_zero() {
    let stats = DashboardStats {
        working_days: 0,
        pentest_days: 0,
        leave_days: 0,
        non_pentest_days: 0,
        total_pentests: 0,
        completed_pentests: 0,
        in_progress_pentests: 0,
        planned_pentests: 0,
        on_hold_pentests: 0,
        stopped_pentests: 0,
    };
    let cards = project(Role::Manager, Some(&stats));
    assert_eq!(cards[1].value, "0%");
    assert_eq!(cards[3].value, "0%");

    let rows = status_breakdown(&stats);
    assert!(rows.iter().all(|r| r.percent == 0));
}

#[test]
fn test_missing_stats_project_to_nothing() {
    for role in Role::ALL {
        assert!(project(role, None).is_empty());
    }
}

#[test]
fn test_projection_is_idempotent() {
    let stats = sample_stats();
    assert_eq!(
        project(Role::Manager, Some(&stats)),
        project(Role::Manager, Some(&stats))
    );
}

#[test]
fn test_percent_rounds_half_up() {
    assert_eq!(percent(1, 8), 13); // 12.5
    assert_eq!(percent(1, 3), 33);
    assert_eq!(percent(2, 3), 67);
    assert_eq!(percent(3, 8), 38);
    assert_eq!(percent(8, 8), 100);
    assert_eq!(percent(0, 5), 0);
    assert_eq!(percent(5, 0), 0);
}

#[test]
fn test_status_breakdown_rows() {
    let stats = sample_stats();
    let rows = status_breakdown(&stats);
    let triples: Vec<(&str, u32, u32)> =
        rows.iter().map(|r| (r.label, r.count, r.percent)).collect();
    assert_eq!(
        triples,
        vec![
            ("Completed", 3, 38),
            ("In Progress", 2, 25),
            ("Planned", 3, 38),
        ]
    );
}

#[test]
fn test_monthly_overview_rows() {
    let stats = sample_stats();
    let rows = monthly_overview(&stats);
    let labels: Vec<&str> = rows.iter().map(|r| r.label).collect();
    assert_eq!(
        labels,
        vec!["Working Days", "Pentest Days", "Leave Days", "Non-Pentest Days"]
    );
    assert_eq!(rows[0].value, "22");
}
