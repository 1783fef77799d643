//! Canned backend tests: roster lookups, deterministic month data, report
//! submission and export.

mod common;

use chrono::Datelike;
use common::date;
use pentestops::models::role::Role;
use pentestops::services::mock::MockApi;
use pentestops::services::{
    AuthService, CalendarData, ExportFilters, ExportFormat, ManagerAggregation, PentestDirectory,
    ReportSubmission, ReportSubmissionRequest, ServiceError, UserDirectory, UserScope,
};

#[tokio::test]
async fn test_login_matches_the_roster() {
    let api = MockApi::new();
    let user = api
        .login("sarah.manager@example.com", "secret")
        .await
        .expect("login ok");
    assert_eq!(user.id, 4);
    assert_eq!(user.name, "Sarah Chen");
    assert_eq!(user.role, Role::Manager);
}

#[tokio::test]
async fn test_login_derives_role_from_unknown_addresses() {
    let api = MockApi::new();

    let u = api.login("alice@corp.com", "pw").await.expect("login ok");
    assert_eq!(u.role, Role::Pentester);

    let u = api.login("lead.ces@corp.com", "pw").await.expect("login ok");
    assert_eq!(u.role, Role::Ces);

    let u = api.login("boss.manager@corp.com", "pw").await.expect("login ok");
    assert_eq!(u.role, Role::Manager);

    let u = api.login("bob.smith@corp.com", "pw").await.expect("login ok");
    assert_eq!(u.name, "bob smith");
}

#[tokio::test]
async fn test_login_rejects_empty_password() {
    let api = MockApi::new();
    let err = api.login("john@example.com", "").await.unwrap_err();
    assert!(matches!(err, ServiceError::Rejected(_)));
}

#[tokio::test]
async fn test_user_directory_filters_by_role() {
    let api = MockApi::new();
    let all = api.list_users(None).await.expect("list ok");
    assert_eq!(all.len(), 4);

    let pentesters = api.list_users(Some(Role::Pentester)).await.expect("list ok");
    assert_eq!(pentesters.len(), 2);
    assert!(pentesters.iter().all(|u| u.role == Role::Pentester));
}

#[tokio::test]
async fn test_events_scoped_to_one_user() {
    let api = MockApi::new();
    let events = api
        .events(UserScope::User(1), 2026, 7)
        .await
        .expect("events ok");
    assert_eq!(events.len(), 4);
    assert!(events.iter().all(|e| e.user_id == 1));
    assert!(events.iter().any(|e| e.title == "Acme Web Portal"));
}

#[tokio::test]
async fn test_events_for_all_pentesters() {
    let api = MockApi::new();
    let events = api
        .events(UserScope::AllPentesters, 2026, 7)
        .await
        .expect("events ok");
    assert_eq!(events.len(), 8);
    let for_user = |id: i64| events.iter().filter(|e| e.user_id == id).count();
    assert_eq!(for_user(1), 4);
    assert_eq!(for_user(2), 4);
}

#[tokio::test]
async fn test_events_stay_inside_short_months() {
    let api = MockApi::new();
    // February 2026 has 28 days.
    let events = api
        .events(UserScope::AllPentesters, 2026, 1)
        .await
        .expect("events ok");
    assert!(!events.is_empty());
    for e in &events {
        assert_eq!(e.start.date_naive().month(), 2);
        assert!(e.end.date_naive() <= date(2026, 2, 28));
    }
}

#[tokio::test]
async fn test_month_index_wraps_in_the_service_too() {
    let api = MockApi::new();
    // month0 19 of 2025 is August 2026.
    let wrapped = api
        .events(UserScope::User(1), 2025, 19)
        .await
        .expect("events ok");
    let direct = api
        .events(UserScope::User(1), 2026, 7)
        .await
        .expect("events ok");
    let key = |es: &[pentestops::models::calendar::CalendarEvent]| {
        es.iter().map(|e| (e.id, e.start, e.end)).collect::<Vec<_>>()
    };
    assert_eq!(key(&wrapped), key(&direct));
}

#[tokio::test]
async fn test_service_tolerates_out_of_range_months() {
    let api = MockApi::new();
    let events = api
        .events(UserScope::User(1), i32::MAX, 12)
        .await
        .expect("events ok");
    assert!(events.is_empty());

    let stats = api
        .stats(UserScope::User(1), i32::MAX, 12)
        .await
        .expect("stats ok");
    assert_eq!(stats.working_days, 0);
}

#[tokio::test]
async fn test_stats_scale_with_scope() {
    let api = MockApi::new();
    let own = api
        .stats(UserScope::User(1), 2026, 7)
        .await
        .expect("stats ok");
    assert_eq!(own.working_days, 21);
    assert_eq!(own.total_pentests, 8);

    let team = api
        .stats(UserScope::AllPentesters, 2026, 7)
        .await
        .expect("stats ok");
    assert_eq!(team.working_days, 42);
    assert_eq!(team.total_pentests, 16);

    // Status counts stay internally consistent.
    let sum = team.completed_pentests
        + team.in_progress_pentests
        + team.planned_pentests
        + team.on_hold_pentests
        + team.stopped_pentests;
    assert_eq!(sum, team.total_pentests);
}

#[tokio::test]
async fn test_global_stats_over_a_range() {
    let api = MockApi::new();
    let stats = api
        .global_stats(date(2026, 8, 1), date(2026, 8, 31))
        .await
        .expect("stats ok");
    assert_eq!(stats.working_days, 42);
}

#[tokio::test]
async fn test_pentest_directory_filters_by_status() {
    let api = MockApi::new();
    let all = api.list_pentests(None).await.expect("list ok");
    assert_eq!(all.len(), 5);

    use pentestops::models::pentest::PentestStatus;
    let in_progress = api
        .list_pentests(Some(PentestStatus::InProgress))
        .await
        .expect("list ok");
    assert_eq!(in_progress.len(), 2);
}

#[tokio::test]
async fn test_report_submission_is_recorded() {
    let api = MockApi::new();
    let report = ReportSubmissionRequest {
        pentest_id: 1,
        vulnerabilities: 3,
        remarks: "Two highs, one medium.".to_string(),
        start_date: date(2026, 8, 3),
        end_date: date(2026, 8, 7),
    };
    api.submit_report(&report).await.expect("submission ok");
    assert_eq!(api.submitted_reports(), vec![report]);
}

#[tokio::test]
async fn test_report_submission_rejects_unknown_pentests() {
    let api = MockApi::new();
    let report = ReportSubmissionRequest {
        pentest_id: 99,
        vulnerabilities: 0,
        remarks: "n/a".to_string(),
        start_date: date(2026, 8, 1),
        end_date: date(2026, 8, 2),
    };
    let err = api.submit_report(&report).await.unwrap_err();
    assert!(matches!(err, ServiceError::Rejected(_)));
    assert!(api.submitted_reports().is_empty());
}

#[tokio::test]
async fn test_csv_export_respects_the_filter_range() {
    let api = MockApi::new();
    let filters = ExportFilters {
        start: date(2026, 8, 1),
        end: date(2026, 8, 31),
        status: None,
    };
    let bytes = api
        .export_reports(ExportFormat::Csv, &filters)
        .await
        .expect("export ok");
    let csv = String::from_utf8(bytes).expect("utf-8 csv");

    assert!(csv.starts_with("project,type,status,assignee,start,end,progress\n"));
    assert!(csv.contains("Acme Web Portal,Web,In Progress,John Doe"));
    // July-only engagement falls outside the range.
    assert!(!csv.contains("Legacy Thick Client"));
}

#[tokio::test]
async fn test_csv_export_status_filter() {
    let api = MockApi::new();
    let filters = ExportFilters {
        start: date(2026, 7, 1),
        end: date(2026, 8, 31),
        status: Some(pentestops::models::pentest::PentestStatus::Completed),
    };
    let bytes = api
        .export_reports(ExportFormat::Csv, &filters)
        .await
        .expect("export ok");
    let csv = String::from_utf8(bytes).expect("utf-8 csv");
    assert!(csv.contains("Legacy Thick Client"));
    assert!(!csv.contains("Acme Web Portal"));
}

#[tokio::test]
async fn test_pdf_export_is_rejected() {
    let api = MockApi::new();
    let filters = ExportFilters {
        start: date(2026, 8, 1),
        end: date(2026, 8, 31),
        status: None,
    };
    let err = api
        .export_reports(ExportFormat::Pdf, &filters)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Rejected(_)));
}
