//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{MailerSettings, ServerConfig};

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::admin::{list_users, run_reminders, set_user_role};
use backend::inbound::http::auth::{login, logout, me, register};
use backend::inbound::http::certificates::{
    issue_certificate, list_certificates, verify_certificate,
};
use backend::inbound::http::courses::{
    add_lesson, course_detail, create_course, list_courses, list_own_courses, publish_course,
    update_course,
};
use backend::inbound::http::dashboard::dashboard_stats;
use backend::inbound::http::enrollments::{
    complete_course, enroll, list_enrollments, record_lesson_progress,
};
use backend::inbound::http::exams::{course_exam, submit_attempt};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::notifications::{list_notifications, mark_notification_read};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::webhook_signature::WebhookVerifier;
use backend::inbound::http::webhooks::payment_webhook;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    webhook_verifier: web::Data<WebhookVerifier>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        webhook_verifier,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(register)
        .service(login)
        .service(logout)
        .service(me)
        .service(list_courses)
        .service(course_detail)
        .service(create_course)
        .service(update_course)
        .service(publish_course)
        .service(add_lesson)
        .service(list_own_courses)
        .service(enroll)
        .service(list_enrollments)
        .service(record_lesson_progress)
        .service(complete_course)
        .service(course_exam)
        .service(submit_attempt)
        .service(issue_certificate)
        .service(list_certificates)
        .service(verify_certificate)
        .service(dashboard_stats)
        .service(list_notifications)
        .service(mark_notification_read)
        .service(list_users)
        .service(set_user_role)
        .service(run_reminders)
        .service(payment_webhook);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(webhook_verifier)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] with session, binding, webhook, and adapter settings.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when adapter construction, socket binding, or
/// server start fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let webhook_verifier = web::Data::new(WebhookVerifier::new(config.webhook_secret.clone()));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            webhook_verifier: webhook_verifier.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
