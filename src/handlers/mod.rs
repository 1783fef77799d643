pub mod auth_handlers;
pub mod calendar_handlers;
pub mod dashboard;
pub mod pentest_handlers;
pub mod report_handlers;
pub mod user_handlers;
