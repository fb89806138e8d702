//! Course catalogue and authoring API handlers.
//!
//! ```text
//! GET   /api/v1/courses?category=rust&level=beginner
//! GET   /api/v1/courses/{courseId}
//! POST  /api/v1/courses
//! PATCH /api/v1/courses/{courseId}
//! POST  /api/v1/courses/{courseId}/publish {"published":true}
//! POST  /api/v1/courses/{courseId}/lessons
//! GET   /api/v1/instructor/courses
//! ```
//!
//! Listing and detail are public; authoring requires an instructor or admin
//! session.

use actix_web::{get, patch, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::course::{CourseFilter, CourseLevel};
use crate::domain::ports::{
    CourseDetail, CoursePayload, CreateCourseRequest, CreateLessonRequest, LessonPayload,
    UpdateCourseRequest,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_uuid, FieldName};
use crate::inbound::http::ApiResult;

const COURSE_ID_FIELD: FieldName = FieldName::new("courseId");

/// Query parameters accepted by the catalogue listing.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListCoursesQuery {
    /// Restrict to one catalogue category.
    pub category: Option<String>,
    /// Restrict to one difficulty level.
    pub level: Option<CourseLevel>,
}

impl From<ListCoursesQuery> for CourseFilter {
    fn from(query: ListCoursesQuery) -> Self {
        Self {
            category: query.category,
            level: query.level,
        }
    }
}

/// Request body for publishing or unpublishing a course.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    /// Desired published state.
    pub published: bool,
}

/// Resolve the optional viewer for detail visibility checks.
///
/// An anonymous caller, or one whose account vanished, sees only published
/// courses.
async fn resolve_viewer(
    state: &HttpState,
    session: &SessionContext,
) -> Result<Option<(UserId, bool)>, Error> {
    let Some(user_id) = session.user_id()? else {
        return Ok(None);
    };
    match state.caller(user_id).await {
        Ok(profile) => Ok(Some((user_id, profile.role == crate::domain::Role::Admin))),
        Err(error) if matches!(error.code(), crate::domain::ErrorCode::Unauthorized) => Ok(None),
        Err(error) => Err(error),
    }
}

/// List published courses.
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    params(ListCoursesQuery),
    responses(
        (status = 200, description = "Published courses", body = [CoursePayload]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "listCourses",
    security([])
)]
#[get("/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    query: web::Query<ListCoursesQuery>,
) -> ApiResult<web::Json<Vec<CoursePayload>>> {
    let courses = state
        .course_query
        .list_published(query.into_inner().into())
        .await?;
    Ok(web::Json(courses))
}

/// Fetch one course with its lessons.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{courseId}",
    params(("courseId" = uuid::Uuid, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course detail", body = CourseDetail),
        (status = 400, description = "Invalid course id", body = Error),
        (status = 404, description = "Course not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "courseDetail",
    security([])
)]
#[get("/courses/{course_id}")]
pub async fn course_detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseDetail>> {
    let course_id = parse_uuid(&path.into_inner(), COURSE_ID_FIELD)?;
    let viewer = resolve_viewer(&state, &session).await?;
    let detail = state.course_query.detail(viewer, course_id).await?;
    Ok(web::Json(detail))
}

/// Create an unpublished course owned by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CoursePayload),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Instructor access required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateCourseRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    state.require_author(user_id).await?;
    let course = state
        .course_command
        .create(user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(course))
}

/// Update a course the caller owns.
#[utoipa::path(
    patch,
    path = "/api/v1/courses/{courseId}",
    params(("courseId" = uuid::Uuid, Path, description = "Course identifier")),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CoursePayload),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the course owner", body = Error),
        (status = 404, description = "Course not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[patch("/courses/{course_id}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateCourseRequest>,
) -> ApiResult<web::Json<CoursePayload>> {
    let user_id = session.require_user_id()?;
    let (_, is_admin) = state.require_author(user_id).await?;
    let course_id = parse_uuid(&path.into_inner(), COURSE_ID_FIELD)?;
    let course = state
        .course_command
        .update(user_id, is_admin, course_id, payload.into_inner())
        .await?;
    Ok(web::Json(course))
}

/// Publish or unpublish a course the caller owns.
#[utoipa::path(
    post,
    path = "/api/v1/courses/{courseId}/publish",
    params(("courseId" = uuid::Uuid, Path, description = "Course identifier")),
    request_body = PublishRequest,
    responses(
        (status = 200, description = "Published state changed", body = CoursePayload),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the course owner", body = Error),
        (status = 404, description = "Course not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "publishCourse"
)]
#[post("/courses/{course_id}/publish")]
pub async fn publish_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<PublishRequest>,
) -> ApiResult<web::Json<CoursePayload>> {
    let user_id = session.require_user_id()?;
    let (_, is_admin) = state.require_author(user_id).await?;
    let course_id = parse_uuid(&path.into_inner(), COURSE_ID_FIELD)?;
    let course = state
        .course_command
        .set_published(user_id, is_admin, course_id, payload.published)
        .await?;
    Ok(web::Json(course))
}

/// Append a lesson to a course the caller owns.
#[utoipa::path(
    post,
    path = "/api/v1/courses/{courseId}/lessons",
    params(("courseId" = uuid::Uuid, Path, description = "Course identifier")),
    request_body = CreateLessonRequest,
    responses(
        (status = 201, description = "Lesson added", body = LessonPayload),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the course owner", body = Error),
        (status = 404, description = "Course not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "addLesson"
)]
#[post("/courses/{course_id}/lessons")]
pub async fn add_lesson(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<CreateLessonRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let (_, is_admin) = state.require_author(user_id).await?;
    let course_id = parse_uuid(&path.into_inner(), COURSE_ID_FIELD)?;
    let lesson = state
        .course_command
        .add_lesson(user_id, is_admin, course_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(lesson))
}

/// List the caller's own courses, published or not.
#[utoipa::path(
    get,
    path = "/api/v1/instructor/courses",
    responses(
        (status = 200, description = "Own courses", body = [CoursePayload]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Instructor access required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["courses"],
    operation_id = "listOwnCourses"
)]
#[get("/instructor/courses")]
pub async fn list_own_courses(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CoursePayload>>> {
    let user_id = session.require_user_id()?;
    state.require_author(user_id).await?;
    let courses = state.course_query.list_for_instructor(user_id).await?;
    Ok(web::Json(courses))
}
