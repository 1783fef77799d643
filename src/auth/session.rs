use actix_session::Session;
use std::str::FromStr;

use crate::errors::AppError;
use crate::models::role::Role;

/// The signed-in user as recorded in the session cookie. The session is the
/// only ambient state; everything else is passed explicitly.
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

pub fn current_user(session: &Session) -> Option<SessionUser> {
    let id = session.get::<i64>("user_id").unwrap_or(None)?;
    let name = session.get::<String>("username").unwrap_or(None)?;
    let role_str = session.get::<String>("role").unwrap_or(None)?;
    let role = Role::from_str(&role_str).ok()?;
    Some(SessionUser { id, name, role })
}

pub fn require_user(session: &Session) -> Result<SessionUser, AppError> {
    current_user(session).ok_or_else(|| AppError::Session("no signed-in user".to_string()))
}

/// Check the signed-in user holds one of the given roles.
pub fn require_any_role(session: &Session, allowed: &[Role]) -> Result<SessionUser, AppError> {
    let user = require_user(session)?;
    if allowed.contains(&user.role) {
        Ok(user)
    } else {
        Err(AppError::PermissionDenied(format!(
            "role {} not permitted",
            user.role
        )))
    }
}

pub fn require_role(session: &Session, role: Role) -> Result<SessionUser, AppError> {
    require_any_role(session, &[role])
}

pub fn set_flash(session: &Session, message: &str) {
    let _ = session.insert("flash", message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>("flash").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash");
    }
    flash
}
