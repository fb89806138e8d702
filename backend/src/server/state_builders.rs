//! Builders selecting Diesel-backed or fixture ports for the HTTP state.

use std::sync::Arc;

use actix_web::web;

use backend::domain::ports::{
    FixtureAuthCommand, FixtureCertification, FixtureCourseCommand, FixtureCourseQuery,
    FixtureDashboardQuery, FixtureEnrollmentCommand, FixtureEnrollmentQuery, FixtureExamination,
    FixtureMailer, FixtureNotificationFeed, FixtureProfileQuery, FixtureReminderDispatch,
    FixtureSubscriptionSync, FixtureUserAdmin, Mailer,
};
use backend::domain::{
    AuthService, CertificateService, CourseService, DashboardService, EnrollmentService,
    ExamService, NotificationService, ReminderService, SubscriptionService,
};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::email::HttpMailer;
use backend::outbound::persistence::{
    DbPool, DieselCertificateRepository, DieselCourseRepository, DieselEnrollmentRepository,
    DieselExamRepository, DieselLessonProgressRepository, DieselLessonRepository,
    DieselNotificationRepository, DieselProfileRepository, DieselSubscriptionRepository,
};

use super::ServerConfig;

/// Build the reminder mailer from configuration.
///
/// Falls back to the fixture mailer when no provider is configured so that
/// reminder runs succeed without an outbound dependency.
fn build_mailer(config: &ServerConfig) -> std::io::Result<Arc<dyn Mailer>> {
    match &config.mailer {
        Some(settings) => {
            let mailer = HttpMailer::new(
                settings.endpoint.clone(),
                settings.api_key.clone(),
                settings.sender.clone(),
            )
            .map_err(|e| std::io::Error::other(format!("mail client construction failed: {e}")))?;
            Ok(Arc::new(mailer))
        }
        None => Ok(Arc::new(FixtureMailer)),
    }
}

/// Assemble HTTP ports over Diesel adapters sharing one pool.
fn build_diesel_ports(pool: &DbPool, mailer: Arc<dyn Mailer>) -> HttpStatePorts {
    let profiles = Arc::new(DieselProfileRepository::new(pool.clone()));
    let courses = Arc::new(DieselCourseRepository::new(pool.clone()));
    let lessons = Arc::new(DieselLessonRepository::new(pool.clone()));
    let enrollments = Arc::new(DieselEnrollmentRepository::new(pool.clone()));
    let lesson_progress = Arc::new(DieselLessonProgressRepository::new(pool.clone()));
    let exams = Arc::new(DieselExamRepository::new(pool.clone()));
    let certificates = Arc::new(DieselCertificateRepository::new(pool.clone()));
    let notifications = Arc::new(DieselNotificationRepository::new(pool.clone()));
    let subscriptions = Arc::new(DieselSubscriptionRepository::new(pool.clone()));

    let auth = Arc::new(AuthService::new(profiles.clone()));
    let course = Arc::new(CourseService::new(courses.clone(), lessons.clone()));
    let enrollment = Arc::new(EnrollmentService::new(
        courses.clone(),
        lessons,
        enrollments.clone(),
        lesson_progress,
        subscriptions.clone(),
        notifications.clone(),
    ));

    HttpStatePorts {
        auth: auth.clone(),
        profiles: auth.clone(),
        user_admin: auth,
        course_command: course.clone(),
        course_query: course,
        enrollment_command: enrollment.clone(),
        enrollment_query: enrollment,
        examination: Arc::new(ExamService::new(exams.clone(), enrollments.clone())),
        certification: Arc::new(CertificateService::new(
            certificates,
            enrollments.clone(),
            exams,
            notifications.clone(),
        )),
        dashboard: Arc::new(DashboardService::new(profiles.clone(), courses, enrollments)),
        notifications: Arc::new(NotificationService::new(notifications.clone())),
        reminders: Arc::new(ReminderService::new(notifications.clone(), profiles, mailer)),
        subscription_sync: Arc::new(SubscriptionService::new(subscriptions, notifications)),
    }
}

/// Fixture ports for runs without a database.
fn build_fixture_ports() -> HttpStatePorts {
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

/// Build the shared HTTP state from configured ports and fixture fallbacks.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let ports = match &config.db_pool {
        Some(pool) => {
            let mailer = build_mailer(config)?;
            build_diesel_ports(pool, mailer)
        }
        None => build_fixture_ports(),
    };
    Ok(web::Data::new(HttpState::new(ports)))
}
