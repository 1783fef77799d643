//! PentestOps — role-based pentest-operations dashboard.
//!
//! Server-rendered actix-web application. Pages are composed from a mocked
//! service layer (`services::mock`) that sits behind the same trait
//! interfaces a real backend would implement.

pub mod auth;
pub mod composer;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod templates_structs;
pub mod validate;
