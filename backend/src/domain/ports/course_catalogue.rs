//! Driving ports for course authoring and the public catalogue.
//!
//! Instructors create and publish courses through [`CourseCommand`];
//! students browse published courses through [`CourseQuery`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::course::{Course, CourseFilter, CourseLevel};
use crate::domain::lesson::{Lesson, LessonKind};
use crate::domain::profile::UserId;
use crate::domain::subscription::SubscriptionTier;
use crate::domain::Error;

/// Serializable course projection for driving ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoursePayload {
    pub id: Uuid,
    #[schema(value_type = Uuid)]
    pub instructor_id: UserId,
    pub title: String,
    pub description: String,
    pub level: CourseLevel,
    pub category: String,
    pub tier: SubscriptionTier,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Course> for CoursePayload {
    fn from(course: Course) -> Self {
        Self {
            id: course.id(),
            instructor_id: course.instructor_id(),
            title: course.title().to_owned(),
            description: course.description().to_owned(),
            level: course.level(),
            category: course.category().to_owned(),
            tier: course.tier(),
            published: course.is_published(),
            created_at: course.created_at(),
        }
    }
}

/// Serializable lesson projection for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonPayload {
    pub id: Uuid,
    pub course_id: Uuid,
    pub position: i32,
    pub title: String,
    pub kind: LessonKind,
    pub duration_seconds: i32,
}

impl From<Lesson> for LessonPayload {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id(),
            course_id: lesson.course_id(),
            position: lesson.position(),
            title: lesson.title().to_owned(),
            kind: lesson.kind(),
            duration_seconds: lesson.duration_seconds(),
        }
    }
}

/// Course detail: the course plus its ordered lessons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    pub course: CoursePayload,
    pub lessons: Vec<LessonPayload>,
}

/// Fields accepted when creating a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    pub level: CourseLevel,
    pub category: String,
    pub tier: SubscriptionTier,
}

/// Fields accepted when updating a course. Absent fields are left as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<CourseLevel>,
    pub category: Option<String>,
    pub tier: Option<SubscriptionTier>,
}

/// Fields accepted when adding a lesson to a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonRequest {
    pub position: i32,
    pub title: String,
    pub kind: LessonKind,
    pub duration_seconds: i32,
}

/// Driving port for course authoring.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCommand: Send + Sync {
    /// Create an unpublished course owned by the caller.
    async fn create(
        &self,
        instructor_id: UserId,
        request: CreateCourseRequest,
    ) -> Result<CoursePayload, Error>;

    /// Update a course the caller owns (admins may edit any course).
    async fn update(
        &self,
        caller: UserId,
        is_admin: bool,
        course_id: Uuid,
        request: UpdateCourseRequest,
    ) -> Result<CoursePayload, Error>;

    /// Publish or unpublish a course the caller owns.
    async fn set_published(
        &self,
        caller: UserId,
        is_admin: bool,
        course_id: Uuid,
        published: bool,
    ) -> Result<CoursePayload, Error>;

    /// Append a lesson to a course the caller owns.
    async fn add_lesson(
        &self,
        caller: UserId,
        is_admin: bool,
        course_id: Uuid,
        request: CreateLessonRequest,
    ) -> Result<LessonPayload, Error>;
}

/// Driving port for catalogue reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseQuery: Send + Sync {
    /// List published courses, optionally filtered.
    async fn list_published(&self, filter: CourseFilter) -> Result<Vec<CoursePayload>, Error>;

    /// Fetch one course with its lessons.
    ///
    /// Unpublished courses are only visible to their owner and admins;
    /// `viewer` is `None` for anonymous callers.
    async fn detail(
        &self,
        viewer: Option<(UserId, bool)>,
        course_id: Uuid,
    ) -> Result<CourseDetail, Error>;

    /// List the caller's own courses, published or not.
    async fn list_for_instructor(
        &self,
        instructor_id: UserId,
    ) -> Result<Vec<CoursePayload>, Error>;
}

/// Fixture command that rejects every mutation.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseCommand;

#[async_trait]
impl CourseCommand for FixtureCourseCommand {
    async fn create(
        &self,
        _instructor_id: UserId,
        _request: CreateCourseRequest,
    ) -> Result<CoursePayload, Error> {
        Err(Error::service_unavailable("course store not configured"))
    }

    async fn update(
        &self,
        _caller: UserId,
        _is_admin: bool,
        _course_id: Uuid,
        _request: UpdateCourseRequest,
    ) -> Result<CoursePayload, Error> {
        Err(Error::not_found("course not found"))
    }

    async fn set_published(
        &self,
        _caller: UserId,
        _is_admin: bool,
        _course_id: Uuid,
        _published: bool,
    ) -> Result<CoursePayload, Error> {
        Err(Error::not_found("course not found"))
    }

    async fn add_lesson(
        &self,
        _caller: UserId,
        _is_admin: bool,
        _course_id: Uuid,
        _request: CreateLessonRequest,
    ) -> Result<LessonPayload, Error> {
        Err(Error::not_found("course not found"))
    }
}

/// Fixture query with an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseQuery;

#[async_trait]
impl CourseQuery for FixtureCourseQuery {
    async fn list_published(&self, _filter: CourseFilter) -> Result<Vec<CoursePayload>, Error> {
        Ok(Vec::new())
    }

    async fn detail(
        &self,
        _viewer: Option<(UserId, bool)>,
        _course_id: Uuid,
    ) -> Result<CourseDetail, Error> {
        Err(Error::not_found("course not found"))
    }

    async fn list_for_instructor(
        &self,
        _instructor_id: UserId,
    ) -> Result<Vec<CoursePayload>, Error> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;
    use crate::domain::course::CourseDraft;

    #[rstest]
    fn payload_reflects_course_fields() {
        let draft = CourseDraft {
            id: Uuid::new_v4(),
            instructor_id: UserId::random(),
            title: "Intro to Soldering".to_owned(),
            description: "Irons, flux, and joints.".to_owned(),
            level: CourseLevel::Beginner,
            category: "electronics".to_owned(),
            tier: SubscriptionTier::Basic,
            published: true,
            created_at: Utc::now(),
        };
        let course = Course::new(draft.clone()).expect("valid draft");

        let payload = CoursePayload::from(course);

        assert_eq!(payload.id, draft.id);
        assert_eq!(payload.title, draft.title);
        assert_eq!(payload.tier, SubscriptionTier::Basic);
        assert!(payload.published);
    }
}
