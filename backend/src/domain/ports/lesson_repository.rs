//! Port for lesson persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::lesson::Lesson;
use crate::domain::Error;

/// Errors raised by lesson repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LessonRepositoryError {
    /// Repository connection could not be established.
    #[error("lesson repository connection failed: {message}")]
    Connection {
        /// Adapter-provided detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("lesson repository query failed: {message}")]
    Query {
        /// Adapter-provided detail.
        message: String,
    },
}

impl LessonRepositoryError {
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

impl From<LessonRepositoryError> for Error {
    fn from(error: LessonRepositoryError) -> Self {
        match error {
            LessonRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("lesson store unavailable: {message}"))
            }
            LessonRepositoryError::Query { message } => {
                Self::internal(format!("lesson store error: {message}"))
            }
        }
    }
}

/// Port for reading and writing lessons.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Insert a new lesson.
    async fn insert(&self, lesson: &Lesson) -> Result<(), LessonRepositoryError>;

    /// Find a lesson by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lesson>, LessonRepositoryError>;

    /// List a course's lessons ordered by position.
    async fn list_for_course(&self, course_id: Uuid)
        -> Result<Vec<Lesson>, LessonRepositoryError>;

    /// Count a course's lessons.
    async fn count_for_course(&self, course_id: Uuid) -> Result<u64, LessonRepositoryError>;
}

/// Fixture implementation for tests that do not exercise lesson persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLessonRepository;

#[async_trait]
impl LessonRepository for FixtureLessonRepository {
    async fn insert(&self, _lesson: &Lesson) -> Result<(), LessonRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Lesson>, LessonRepositoryError> {
        Ok(None)
    }

    async fn list_for_course(
        &self,
        _course_id: Uuid,
    ) -> Result<Vec<Lesson>, LessonRepositoryError> {
        Ok(Vec::new())
    }

    async fn count_for_course(&self, _course_id: Uuid) -> Result<u64, LessonRepositoryError> {
        Ok(0)
    }
}
