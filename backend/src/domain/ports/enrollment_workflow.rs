//! Driving ports for the enrollment and progress workflow.
//!
//! Inbound adapters enroll learners, record lesson completion, and read
//! progress snapshots through these ports without touching persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::profile::UserId;
use crate::domain::Error;

/// Progress projection for one enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    /// Course the snapshot describes.
    pub course_id: Uuid,
    /// Stored completion percentage in [0, 100].
    pub progress_percent: u8,
    /// Lessons the learner has completed.
    pub completed_lessons: u64,
    /// Lessons the course contains.
    pub total_lessons: u64,
    /// Completion timestamp, once progress first reaches 100.
    pub completed_at: Option<DateTime<Utc>>,
}

/// One lesson-progress update from a learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonProgressUpdate {
    /// Whether the lesson now counts as completed.
    pub completed: bool,
    /// Watch time reported for this session, in seconds.
    pub watch_time_seconds: i32,
}

/// Driving port for enrollment mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentCommand: Send + Sync {
    /// Enroll a learner in a course.
    ///
    /// Enrolling twice is a no-op that returns the existing snapshot.
    async fn enroll(&self, user_id: UserId, course_id: Uuid) -> Result<ProgressSnapshot, Error>;

    /// Record a lesson-progress update and recompute course progress.
    async fn record_lesson_progress(
        &self,
        user_id: UserId,
        lesson_id: Uuid,
        update: LessonProgressUpdate,
    ) -> Result<ProgressSnapshot, Error>;

    /// Explicitly complete a course whose lessons are all done.
    async fn complete_course(
        &self,
        user_id: UserId,
        course_id: Uuid,
    ) -> Result<ProgressSnapshot, Error>;
}

/// Driving port for enrollment reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentQuery: Send + Sync {
    /// List the caller's enrollments with progress.
    async fn list_enrollments(&self, user_id: UserId) -> Result<Vec<ProgressSnapshot>, Error>;
}

/// Fixture command that accepts every mutation at zero progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnrollmentCommand;

fn empty_snapshot(course_id: Uuid) -> ProgressSnapshot {
    ProgressSnapshot {
        course_id,
        progress_percent: 0,
        completed_lessons: 0,
        total_lessons: 0,
        completed_at: None,
    }
}

#[async_trait]
impl EnrollmentCommand for FixtureEnrollmentCommand {
    async fn enroll(&self, _user_id: UserId, course_id: Uuid) -> Result<ProgressSnapshot, Error> {
        Ok(empty_snapshot(course_id))
    }

    async fn record_lesson_progress(
        &self,
        _user_id: UserId,
        _lesson_id: Uuid,
        _update: LessonProgressUpdate,
    ) -> Result<ProgressSnapshot, Error> {
        Err(Error::not_found("lesson not found"))
    }

    async fn complete_course(
        &self,
        _user_id: UserId,
        _course_id: Uuid,
    ) -> Result<ProgressSnapshot, Error> {
        Err(Error::invalid_request("course is not fully completed"))
    }
}

/// Fixture query that reports no enrollments.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnrollmentQuery;

#[async_trait]
impl EnrollmentQuery for FixtureEnrollmentQuery {
    async fn list_enrollments(&self, _user_id: UserId) -> Result<Vec<ProgressSnapshot>, Error> {
        Ok(Vec::new())
    }
}
