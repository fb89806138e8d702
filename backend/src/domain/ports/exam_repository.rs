//! Port for exam and attempt persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::exam::{Exam, ExamAttempt};
use crate::domain::profile::UserId;
use crate::domain::Error;

/// Errors raised by exam repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExamRepositoryError {
    /// Repository connection could not be established.
    #[error("exam repository connection failed: {message}")]
    Connection {
        /// Adapter-provided detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("exam repository query failed: {message}")]
    Query {
        /// Adapter-provided detail.
        message: String,
    },
}

impl ExamRepositoryError {
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

impl From<ExamRepositoryError> for Error {
    fn from(error: ExamRepositoryError) -> Self {
        match error {
            ExamRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("exam store unavailable: {message}"))
            }
            ExamRepositoryError::Query { message } => {
                Self::internal(format!("exam store error: {message}"))
            }
        }
    }
}

/// Port for reading exams and recording attempts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExamRepository: Send + Sync {
    /// Find the exam attached to a course, if any.
    async fn find_for_course(&self, course_id: Uuid)
        -> Result<Option<Exam>, ExamRepositoryError>;

    /// Persist a graded attempt.
    async fn insert_attempt(&self, attempt: &ExamAttempt) -> Result<(), ExamRepositoryError>;

    /// Find a user's earliest passing attempt for a course's exam, if any.
    async fn find_passing_attempt(
        &self,
        user_id: UserId,
        course_id: Uuid,
    ) -> Result<Option<ExamAttempt>, ExamRepositoryError>;
}

/// Fixture implementation for tests that do not exercise exam persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureExamRepository;

#[async_trait]
impl ExamRepository for FixtureExamRepository {
    async fn find_for_course(
        &self,
        _course_id: Uuid,
    ) -> Result<Option<Exam>, ExamRepositoryError> {
        Ok(None)
    }

    async fn insert_attempt(&self, _attempt: &ExamAttempt) -> Result<(), ExamRepositoryError> {
        Ok(())
    }

    async fn find_passing_attempt(
        &self,
        _user_id: UserId,
        _course_id: Uuid,
    ) -> Result<Option<ExamAttempt>, ExamRepositoryError> {
        Ok(None)
    }
}
