//! Port for enrollment persistence and completion-rate reads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::enrollment::Enrollment;
use crate::domain::profile::UserId;
use crate::domain::Error;

/// Errors raised by enrollment repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrollmentRepositoryError {
    /// Repository connection could not be established.
    #[error("enrollment repository connection failed: {message}")]
    Connection {
        /// Adapter-provided detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("enrollment repository query failed: {message}")]
    Query {
        /// Adapter-provided detail.
        message: String,
    },
}

impl EnrollmentRepositoryError {
    /// Connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<EnrollmentRepositoryError> for Error {
    fn from(error: EnrollmentRepositoryError) -> Self {
        match error {
            EnrollmentRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("enrollment store unavailable: {message}"))
            }
            EnrollmentRepositoryError::Query { message } => {
                Self::internal(format!("enrollment store error: {message}"))
            }
        }
    }
}

/// Aggregate completion counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrollmentCounts {
    /// Total enrollment rows in scope.
    pub total: u64,
    /// Enrollments with `completed_at` set.
    pub completed: u64,
}

/// Port for reading and writing enrollments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Find the enrollment for one (user, course) pair.
    async fn find(
        &self,
        user_id: UserId,
        course_id: Uuid,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError>;

    /// Insert a fresh enrollment. The (user, course) pair is unique; a
    /// concurrent duplicate insert is absorbed by the adapter.
    async fn insert(&self, enrollment: &Enrollment) -> Result<(), EnrollmentRepositoryError>;

    /// Persist a recomputed progress percentage and completion timestamp.
    async fn update_progress(
        &self,
        user_id: UserId,
        course_id: Uuid,
        progress_percent: u8,
        completed_at: Option<DateTime<Utc>>,
    ) -> Result<(), EnrollmentRepositoryError>;

    /// List a user's enrollments, most recent first.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError>;

    /// Completion counts across all courses, or scoped to one instructor's
    /// courses when `instructor_id` is given.
    async fn completion_counts(
        &self,
        instructor_id: Option<UserId>,
    ) -> Result<EnrollmentCounts, EnrollmentRepositoryError>;
}

/// Fixture implementation for tests that do not exercise enrollment persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEnrollmentRepository;

#[async_trait]
impl EnrollmentRepository for FixtureEnrollmentRepository {
    async fn find(
        &self,
        _user_id: UserId,
        _course_id: Uuid,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _enrollment: &Enrollment) -> Result<(), EnrollmentRepositoryError> {
        Ok(())
    }

    async fn update_progress(
        &self,
        _user_id: UserId,
        _course_id: Uuid,
        _progress_percent: u8,
        _completed_at: Option<DateTime<Utc>>,
    ) -> Result<(), EnrollmentRepositoryError> {
        Ok(())
    }

    async fn list_for_user(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        Ok(Vec::new())
    }

    async fn completion_counts(
        &self,
        _instructor_id: Option<UserId>,
    ) -> Result<EnrollmentCounts, EnrollmentRepositoryError> {
        Ok(EnrollmentCounts::default())
    }
}
