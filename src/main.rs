use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use pentestops::composer::DashboardStore;
use pentestops::handlers;
use pentestops::services::mock::MockApi;

type Api = MockApi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    // Session encryption key — load from SESSION_KEY env var for persistent sessions across restarts
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need 64+) — generating random key",
                val.len()
            );
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set — generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    // The mocked backend, shared across workers behind the service traits.
    let api = web::Data::new(Api::with_latency());
    let store = web::Data::new(DashboardStore::default());

    let bind = std::env::var("PENTESTOPS_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("Starting server at http://{bind}");

    HttpServer::new(move || {
        let session_mw =
            SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                .cookie_secure(false)
                .cookie_http_only(true)
                .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(api.clone())
            .app_data(store.clone())
            // Public routes
            .route("/login", web::get().to(handlers::auth_handlers::login_page))
            .route(
                "/login",
                web::post().to(handlers::auth_handlers::login_submit::<Api>),
            )
            // Root redirect
            .route(
                "/",
                web::get().to(|| async {
                    actix_web::HttpResponse::SeeOther()
                        .insert_header(("Location", "/dashboard"))
                        .finish()
                }),
            )
            // Protected routes
            .service(
                web::scope("")
                    .wrap(actix_web::middleware::from_fn(
                        pentestops::auth::middleware::require_auth,
                    ))
                    .route("/logout", web::post().to(handlers::auth_handlers::logout::<Api>))
                    .route("/dashboard", web::get().to(handlers::dashboard::index::<Api>))
                    .route(
                        "/calendar",
                        web::get().to(handlers::calendar_handlers::index::<Api>),
                    )
                    .route(
                        "/calendar/api",
                        web::get().to(handlers::calendar_handlers::events_api::<Api>),
                    )
                    .route("/reports", web::get().to(handlers::report_handlers::form::<Api>))
                    .route(
                        "/reports",
                        web::post().to(handlers::report_handlers::submit::<Api>),
                    )
                    .route(
                        "/reports/export",
                        web::get().to(handlers::report_handlers::export::<Api>),
                    )
                    .route("/users", web::get().to(handlers::user_handlers::list::<Api>))
                    .route(
                        "/pentests",
                        web::get().to(handlers::pentest_handlers::list::<Api>),
                    ),
            )
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(bind)?
    .run()
    .await
}
