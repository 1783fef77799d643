use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::session::require_role;
use crate::errors::{AppError, render};
use crate::models::role::Role;
use crate::services::UserDirectory;
use crate::templates_structs::{PageContext, UserListTemplate};

pub async fn list<A>(api: web::Data<A>, session: Session) -> Result<HttpResponse, AppError>
where
    A: UserDirectory + 'static,
{
    require_role(&session, Role::Manager)?;
    let ctx = PageContext::build(&session, "/users")?;

    let (users, error) = match api.list_users(None).await {
        Ok(users) => (users, None),
        Err(e) => (Vec::new(), Some(e.to_string())),
    };

    let tmpl = UserListTemplate { ctx, error, users };
    render(tmpl)
}
