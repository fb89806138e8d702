//! Port for per-lesson progress persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::enrollment::LessonProgress;
use crate::domain::profile::UserId;
use crate::domain::Error;

/// Errors raised by lesson progress repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LessonProgressRepositoryError {
    /// Repository connection could not be established.
    #[error("lesson progress repository connection failed: {message}")]
    Connection {
        /// Adapter-provided detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("lesson progress repository query failed: {message}")]
    Query {
        /// Adapter-provided detail.
        message: String,
    },
}

impl LessonProgressRepositoryError {
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

impl From<LessonProgressRepositoryError> for Error {
    fn from(error: LessonProgressRepositoryError) -> Self {
        match error {
            LessonProgressRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("lesson progress store unavailable: {message}"))
            }
            LessonProgressRepositoryError::Query { message } => {
                Self::internal(format!("lesson progress store error: {message}"))
            }
        }
    }
}

/// Port for upserting lesson progress and counting completions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonProgressRepository: Send + Sync {
    /// Insert or update the (user, lesson) progress record.
    ///
    /// A record that is already completed stays completed even when the
    /// update carries `completed == false`; watch time only accumulates
    /// upward.
    async fn upsert(&self, progress: &LessonProgress)
        -> Result<(), LessonProgressRepositoryError>;

    /// Count a user's completed lessons within one course.
    async fn count_completed(
        &self,
        user_id: UserId,
        course_id: Uuid,
    ) -> Result<u64, LessonProgressRepositoryError>;
}

/// Fixture implementation for tests that do not exercise lesson progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLessonProgressRepository;

#[async_trait]
impl LessonProgressRepository for FixtureLessonProgressRepository {
    async fn upsert(
        &self,
        _progress: &LessonProgress,
    ) -> Result<(), LessonProgressRepositoryError> {
        Ok(())
    }

    async fn count_completed(
        &self,
        _user_id: UserId,
        _course_id: Uuid,
    ) -> Result<u64, LessonProgressRepositoryError> {
        Ok(0)
    }
}
