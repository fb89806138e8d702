//! Exam API handlers.
//!
//! ```text
//! GET  /api/v1/courses/{courseId}/exam
//! POST /api/v1/courses/{courseId}/exam/attempts {"answers":[...]}
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::exam::ExamAttempt;
use crate::domain::ports::{AttemptSubmission, ExamView};
use crate::domain::Error;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_uuid, FieldName};
use crate::inbound::http::ApiResult;

const COURSE_ID_FIELD: FieldName = FieldName::new("courseId");

/// Serializable grading result returned after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttemptPayload {
    pub id: uuid::Uuid,
    pub exam_id: uuid::Uuid,
    pub score: i32,
    pub percent: u8,
    pub passed: bool,
    pub submitted_at: DateTime<Utc>,
}

impl From<ExamAttempt> for AttemptPayload {
    fn from(attempt: ExamAttempt) -> Self {
        Self {
            id: attempt.id,
            exam_id: attempt.exam_id,
            score: attempt.score,
            percent: attempt.percent,
            passed: attempt.passed,
            submitted_at: attempt.submitted_at,
        }
    }
}

/// Fetch the exam for a course the caller is enrolled in.
///
/// The returned view strips correct answers.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{courseId}/exam",
    params(("courseId" = uuid::Uuid, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Exam questions", body = ExamView),
        (status = 400, description = "Invalid course id", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not enrolled", body = Error),
        (status = 404, description = "Course has no exam", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["exams"],
    operation_id = "courseExam"
)]
#[get("/courses/{course_id}/exam")]
pub async fn course_exam(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ExamView>> {
    let user_id = session.require_user_id()?;
    let course_id = parse_uuid(&path.into_inner(), COURSE_ID_FIELD)?;
    let view = state.examination.exam_for_course(user_id, course_id).await?;
    Ok(web::Json(view))
}

/// Submit exam answers for grading.
#[utoipa::path(
    post,
    path = "/api/v1/courses/{courseId}/exam/attempts",
    params(("courseId" = uuid::Uuid, Path, description = "Course identifier")),
    request_body = AttemptSubmission,
    responses(
        (status = 200, description = "Graded attempt", body = AttemptPayload),
        (status = 400, description = "Invalid submission", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not enrolled", body = Error),
        (status = 404, description = "Course has no exam", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["exams"],
    operation_id = "submitExamAttempt"
)]
#[post("/courses/{course_id}/exam/attempts")]
pub async fn submit_attempt(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AttemptSubmission>,
) -> ApiResult<web::Json<AttemptPayload>> {
    let user_id = session.require_user_id()?;
    let course_id = parse_uuid(&path.into_inner(), COURSE_ID_FIELD)?;
    let attempt = state
        .examination
        .submit_attempt(user_id, course_id, payload.into_inner())
        .await?;
    Ok(web::Json(AttemptPayload::from(attempt)))
}
