//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::Key;

use crate::domain::ports::{
    FixtureAuthCommand, FixtureCertification, FixtureCourseCommand, FixtureCourseQuery,
    FixtureDashboardQuery, FixtureEnrollmentCommand, FixtureEnrollmentQuery, FixtureExamination,
    FixtureNotificationFeed, FixtureProfileQuery, FixtureReminderDispatch, FixtureSubscriptionSync,
    FixtureUserAdmin,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Fixture-backed port bundle for handler tests that override only the
/// ports they exercise.
pub fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        auth: Arc::new(FixtureAuthCommand),
        profiles: Arc::new(FixtureProfileQuery),
        user_admin: Arc::new(FixtureUserAdmin),
        course_command: Arc::new(FixtureCourseCommand),
        course_query: Arc::new(FixtureCourseQuery),
        enrollment_command: Arc::new(FixtureEnrollmentCommand),
        enrollment_query: Arc::new(FixtureEnrollmentQuery),
        examination: Arc::new(FixtureExamination),
        certification: Arc::new(FixtureCertification),
        dashboard: Arc::new(FixtureDashboardQuery),
        notifications: Arc::new(FixtureNotificationFeed),
        reminders: Arc::new(FixtureReminderDispatch),
        subscription_sync: Arc::new(FixtureSubscriptionSync),
    }
}

/// Fixture-backed HTTP state.
pub fn fixture_state() -> HttpState {
    HttpState::new(fixture_ports())
}
