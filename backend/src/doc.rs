//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST API: every
//! HTTP endpoint from the inbound layer, the request and response schemas
//! they exchange, and the session cookie security scheme. Swagger UI serves
//! the document in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{
    AnswerPayload, AttemptSubmission, CourseDetail, CoursePayload, CreateCourseRequest,
    CreateLessonRequest, DashboardStats, ExamQuestionView, ExamView, LessonPayload,
    LessonProgressUpdate, LoginRequest, NotificationPayload, ProgressSnapshot, RegisterRequest,
    ReminderFailure, ReminderRunReport, UpdateCourseRequest,
};
use crate::domain::{CourseLevel, Error, ErrorCode, LessonKind, Role, SubscriptionTier};
use crate::inbound::http::admin::SetRoleRequest;
use crate::inbound::http::auth::ProfilePayload;
use crate::inbound::http::certificates::CertificatePayload;
use crate::inbound::http::courses::PublishRequest;
use crate::inbound::http::exams::AttemptPayload;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Course platform backend API",
        description = "HTTP interface for course authoring, enrollment, \
                       examination, certification and platform administration."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::me,
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::course_detail,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::publish_course,
        crate::inbound::http::courses::add_lesson,
        crate::inbound::http::courses::list_own_courses,
        crate::inbound::http::enrollments::enroll,
        crate::inbound::http::enrollments::list_enrollments,
        crate::inbound::http::enrollments::record_lesson_progress,
        crate::inbound::http::enrollments::complete_course,
        crate::inbound::http::exams::course_exam,
        crate::inbound::http::exams::submit_attempt,
        crate::inbound::http::certificates::issue_certificate,
        crate::inbound::http::certificates::list_certificates,
        crate::inbound::http::certificates::verify_certificate,
        crate::inbound::http::dashboard::dashboard_stats,
        crate::inbound::http::notifications::list_notifications,
        crate::inbound::http::notifications::mark_notification_read,
        crate::inbound::http::admin::list_users,
        crate::inbound::http::admin::set_user_role,
        crate::inbound::http::admin::run_reminders,
        crate::inbound::http::webhooks::payment_webhook,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        CourseLevel,
        LessonKind,
        SubscriptionTier,
        RegisterRequest,
        LoginRequest,
        ProfilePayload,
        CoursePayload,
        LessonPayload,
        CourseDetail,
        CreateCourseRequest,
        UpdateCourseRequest,
        CreateLessonRequest,
        PublishRequest,
        ProgressSnapshot,
        LessonProgressUpdate,
        ExamView,
        ExamQuestionView,
        AnswerPayload,
        AttemptSubmission,
        AttemptPayload,
        CertificatePayload,
        DashboardStats,
        NotificationPayload,
        ReminderFailure,
        ReminderRunReport,
        SetRoleRequest,
    )),
    tags(
        (name = "auth", description = "Registration, login and session management"),
        (name = "courses", description = "Course catalogue and authoring"),
        (name = "enrollments", description = "Enrollment and lesson progress"),
        (name = "exams", description = "Final exams and attempt grading"),
        (name = "certificates", description = "Certificate issuance and verification"),
        (name = "dashboard", description = "Aggregate statistics"),
        (name = "notifications", description = "In-app notification feed"),
        (name = "admin", description = "User administration and maintenance jobs"),
        (name = "webhooks", description = "Payment processor callbacks"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::openapi::schema::Schema;
    use utoipa::openapi::RefOr;
    use utoipa::OpenApi;

    use super::*;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_has_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn profile_schema_uses_camel_case_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let profile_schema = schemas.get("ProfilePayload").expect("ProfilePayload schema");

        assert_object_schema_has_field(profile_schema, "displayName");
        assert_object_schema_has_field(profile_schema, "createdAt");
    }

    #[test]
    fn every_documented_path_is_under_known_prefixes() {
        let doc = ApiDoc::openapi();
        for path in doc.paths.paths.keys() {
            assert!(
                path.starts_with("/api/v1/") || path.starts_with("/health/"),
                "unexpected path prefix: {path}"
            );
        }
    }
}
