//! Enrollment and learning-progress API handlers.
//!
//! ```text
//! POST /api/v1/courses/{courseId}/enroll
//! GET  /api/v1/enrollments
//! PUT  /api/v1/lessons/{lessonId}/progress {"completed":true,"watchTimeSeconds":120}
//! POST /api/v1/courses/{courseId}/complete
//! ```

use actix_web::{get, post, put, web, HttpResponse};

use crate::domain::ports::{LessonProgressUpdate, ProgressSnapshot};
use crate::domain::Error;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_uuid, FieldName};
use crate::inbound::http::ApiResult;

const COURSE_ID_FIELD: FieldName = FieldName::new("courseId");
const LESSON_ID_FIELD: FieldName = FieldName::new("lessonId");

/// Enroll the caller in a published course.
#[utoipa::path(
    post,
    path = "/api/v1/courses/{courseId}/enroll",
    params(("courseId" = uuid::Uuid, Path, description = "Course identifier")),
    responses(
        (status = 201, description = "Enrolled", body = ProgressSnapshot),
        (status = 400, description = "Invalid course id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Subscription tier too low", body = Error),
        (status = 404, description = "Course not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "enroll"
)]
#[post("/courses/{course_id}/enroll")]
pub async fn enroll(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let course_id = parse_uuid(&path.into_inner(), COURSE_ID_FIELD)?;
    let snapshot = state.enrollment_command.enroll(user_id, course_id).await?;
    Ok(HttpResponse::Created().json(snapshot))
}

/// List the caller's enrollments with progress.
#[utoipa::path(
    get,
    path = "/api/v1/enrollments",
    responses(
        (status = 200, description = "Enrollments", body = [ProgressSnapshot]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "listEnrollments"
)]
#[get("/enrollments")]
pub async fn list_enrollments(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ProgressSnapshot>>> {
    let user_id = session.require_user_id()?;
    let snapshots = state.enrollment_query.list_enrollments(user_id).await?;
    Ok(web::Json(snapshots))
}

/// Record the caller's progress on one lesson.
#[utoipa::path(
    put,
    path = "/api/v1/lessons/{lessonId}/progress",
    params(("lessonId" = uuid::Uuid, Path, description = "Lesson identifier")),
    request_body = LessonProgressUpdate,
    responses(
        (status = 200, description = "Updated course progress", body = ProgressSnapshot),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not enrolled in the lesson's course", body = Error),
        (status = 404, description = "Lesson not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "recordLessonProgress"
)]
#[put("/lessons/{lesson_id}/progress")]
pub async fn record_lesson_progress(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<LessonProgressUpdate>,
) -> ApiResult<web::Json<ProgressSnapshot>> {
    let user_id = session.require_user_id()?;
    let lesson_id = parse_uuid(&path.into_inner(), LESSON_ID_FIELD)?;
    let snapshot = state
        .enrollment_command
        .record_lesson_progress(user_id, lesson_id, payload.into_inner())
        .await?;
    Ok(web::Json(snapshot))
}

/// Mark a fully-watched course as complete.
#[utoipa::path(
    post,
    path = "/api/v1/courses/{courseId}/complete",
    params(("courseId" = uuid::Uuid, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course completed", body = ProgressSnapshot),
        (status = 400, description = "Lessons remain incomplete", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not enrolled", body = Error),
        (status = 404, description = "Course not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "completeCourse"
)]
#[post("/courses/{course_id}/complete")]
pub async fn complete_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProgressSnapshot>> {
    let user_id = session.require_user_id()?;
    let course_id = parse_uuid(&path.into_inner(), COURSE_ID_FIELD)?;
    let snapshot = state
        .enrollment_command
        .complete_course(user_id, course_id)
        .await?;
    Ok(web::Json(snapshot))
}
