pub mod middleware;
pub mod session;
