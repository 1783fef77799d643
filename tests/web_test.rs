//! HTTP-level smoke tests: login flow, session gating, role gating.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, cookie::Key, middleware, test, web};

use pentestops::composer::DashboardStore;
use pentestops::handlers;
use pentestops::services::mock::MockApi;

macro_rules! test_app {
    () => {
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(web::Data::new(MockApi::new()))
            .app_data(web::Data::new(DashboardStore::default()))
            .route("/login", web::get().to(handlers::auth_handlers::login_page))
            .route(
                "/login",
                web::post().to(handlers::auth_handlers::login_submit::<MockApi>),
            )
            // Writes a deliberately incomplete session, bypassing the login
            // handler, so tests can exercise the auth gate with corrupt state.
            .route(
                "/seed-partial-session",
                web::get().to(|session: actix_session::Session| async move {
                    let _ = session.insert("user_id", 1_i64);
                    let _ = session.insert("username", "ghost");
                    let _ = session.insert("role", "superuser");
                    actix_web::HttpResponse::Ok().finish()
                }),
            )
            .service(
                web::scope("")
                    .wrap(middleware::from_fn(pentestops::auth::middleware::require_auth))
                    .route(
                        "/logout",
                        web::post().to(handlers::auth_handlers::logout::<MockApi>),
                    )
                    .route(
                        "/dashboard",
                        web::get().to(handlers::dashboard::index::<MockApi>),
                    )
                    .route("/users", web::get().to(handlers::user_handlers::list::<MockApi>))
                    .route(
                        "/pentests",
                        web::get().to(handlers::pentest_handlers::list::<MockApi>),
                    ),
            )
    };
}

macro_rules! login {
    ($app:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/login")
            .set_form([("email", $email), ("password", "secret")])
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get("Location").and_then(|v| v.to_str().ok()),
            Some("/dashboard")
        );
        resp.response()
            .cookies()
            .next()
            .expect("session cookie set")
            .into_owned()
    }};
}

#[actix_rt::test]
async fn test_unauthenticated_requests_redirect_to_login() {
    let app = test::init_service(test_app!()).await;
    for uri in ["/dashboard", "/users", "/pentests"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get("Location").and_then(|v| v.to_str().ok()),
            Some("/login")
        );
    }
}

#[actix_rt::test]
async fn test_login_then_dashboard() {
    let app = test::init_service(test_app!()).await;
    let cookie = login!(&app, "sarah.manager@example.com");

    let req = test::TestRequest::get()
        .uri("/dashboard")
        .cookie(cookie)
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = std::str::from_utf8(&body).expect("utf-8 body");
    assert!(html.contains("Manager Dashboard"));
    assert!(html.contains("Completion Rate"));
    assert!(html.contains("User Management"));
}

#[actix_rt::test]
async fn test_pentester_dashboard_hides_manager_surface() {
    let app = test::init_service(test_app!()).await;
    let cookie = login!(&app, "john@example.com");

    let req = test::TestRequest::get()
        .uri("/dashboard")
        .cookie(cookie)
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = std::str::from_utf8(&body).expect("utf-8 body");
    assert!(html.contains("Pentester Dashboard"));
    assert!(html.contains("Working Days"));
    assert!(!html.contains("User Management"));
    assert!(!html.contains("Completion Rate"));
}

#[actix_rt::test]
async fn test_user_management_is_manager_only() {
    let app = test::init_service(test_app!()).await;
    let cookie = login!(&app, "john@example.com");

    let req = test::TestRequest::get()
        .uri("/users")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_pentests_page_for_ces() {
    let app = test::init_service(test_app!()).await;
    let cookie = login!(&app, "mike.ces@example.com");

    let req = test::TestRequest::get()
        .uri("/pentests")
        .cookie(cookie)
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = std::str::from_utf8(&body).expect("utf-8 body");
    assert!(html.contains("Acme Web Portal"));
    assert!(html.contains("Mobile Banking App"));
}

#[actix_rt::test]
async fn test_partial_session_is_bounced_at_the_gate() {
    // A session holding a user id but an unparseable role never reaches a
    // handler; the gate sends it back to login.
    let app = test::init_service(test_app!()).await;

    let req = test::TestRequest::get()
        .uri("/seed-partial-session")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = resp
        .response()
        .cookies()
        .next()
        .expect("session cookie set")
        .into_owned();

    let req = test::TestRequest::get()
        .uri("/dashboard")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get("Location").and_then(|v| v.to_str().ok()),
        Some("/login")
    );
}

#[actix_rt::test]
async fn test_dashboard_survives_degenerate_month_input() {
    let app = test::init_service(test_app!()).await;
    let cookie = login!(&app, "john@example.com");

    let req = test::TestRequest::get()
        .uri("/dashboard?year=2147483647&month=12")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
}

#[actix_rt::test]
async fn test_login_page_redirects_when_already_signed_in() {
    let app = test::init_service(test_app!()).await;
    let cookie = login!(&app, "john@example.com");

    let req = test::TestRequest::get().uri("/login").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get("Location").and_then(|v| v.to_str().ok()),
        Some("/dashboard")
    );
}

#[actix_rt::test]
async fn test_invalid_email_is_rejected_before_the_service_call() {
    let app = test::init_service(test_app!()).await;
    let req = test::TestRequest::post()
        .uri("/login")
        .set_form([("email", "not-an-address"), ("password", "secret")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).expect("utf-8 body");
    assert!(html.contains("Email must be a valid address"));
}

#[actix_rt::test]
async fn test_logout_redirects_to_login() {
    let app = test::init_service(test_app!()).await;
    let cookie = login!(&app, "john@example.com");

    let req = test::TestRequest::post()
        .uri("/logout")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get("Location").and_then(|v| v.to_str().ok()),
        Some("/login")
    );
}
