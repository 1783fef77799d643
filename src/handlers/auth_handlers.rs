use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::errors::{AppError, render};
use crate::services::{AuthService, ServiceError};
use crate::templates_structs::{LoginTemplate, app_name};
use crate::validate;

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub async fn login_page(session: Session) -> Result<HttpResponse, AppError> {
    // If already logged in, redirect to dashboard
    if session.get::<i64>("user_id").unwrap_or(None).is_some() {
        return Ok(HttpResponse::SeeOther()
            .insert_header(("Location", "/dashboard"))
            .finish());
    }

    let tmpl = LoginTemplate {
        error: None,
        app_name: app_name(),
    };
    render(tmpl)
}

pub async fn login_submit<A>(
    api: web::Data<A>,
    session: Session,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError>
where
    A: AuthService + 'static,
{
    if let Some(msg) = validate::validate_email(&form.email) {
        let tmpl = LoginTemplate {
            error: Some(msg),
            app_name: app_name(),
        };
        return render(tmpl);
    }

    match api.login(form.email.trim(), &form.password).await {
        Ok(user) => {
            let _ = session.insert("user_id", user.id);
            let _ = session.insert("username", &user.name);
            let _ = session.insert("role", user.role.as_str());
            Ok(HttpResponse::SeeOther()
                .insert_header(("Location", "/dashboard"))
                .finish())
        }
        Err(ServiceError::Rejected(msg)) => {
            let tmpl = LoginTemplate {
                error: Some(msg),
                app_name: app_name(),
            };
            render(tmpl)
        }
        Err(ServiceError::Transport(msg)) => {
            log::warn!("login service unavailable: {msg}");
            let tmpl = LoginTemplate {
                error: Some("Login service is unavailable, please try again later".to_string()),
                app_name: app_name(),
            };
            render(tmpl)
        }
    }
}

pub async fn logout<A>(api: web::Data<A>, session: Session) -> Result<HttpResponse, AppError>
where
    A: AuthService + 'static,
{
    if let Err(e) = api.logout().await {
        log::warn!("logout call failed: {e}");
    }
    session.purge();
    Ok(HttpResponse::SeeOther()
        .insert_header(("Location", "/login"))
        .finish())
}
