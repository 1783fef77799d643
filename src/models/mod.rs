pub mod calendar;
pub mod dashboard;
pub mod nav_item;
pub mod pentest;
pub mod role;
pub mod stats;
pub mod user;
