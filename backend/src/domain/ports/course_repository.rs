//! Port for course catalogue persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::course::{Course, CourseFilter};
use crate::domain::profile::UserId;
use crate::domain::Error;

/// Errors raised by course repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseRepositoryError {
    /// Repository connection could not be established.
    #[error("course repository connection failed: {message}")]
    Connection {
        /// Adapter-provided detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("course repository query failed: {message}")]
    Query {
        /// Adapter-provided detail.
        message: String,
    },
}

impl CourseRepositoryError {
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

impl From<CourseRepositoryError> for Error {
    fn from(error: CourseRepositoryError) -> Self {
        match error {
            CourseRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("course store unavailable: {message}"))
            }
            CourseRepositoryError::Query { message } => {
                Self::internal(format!("course store error: {message}"))
            }
        }
    }
}

/// Port for reading and writing courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert a new course.
    async fn insert(&self, course: &Course) -> Result<(), CourseRepositoryError>;

    /// Replace the mutable fields of an existing course.
    async fn update(&self, course: &Course) -> Result<(), CourseRepositoryError>;

    /// Find a course by id, published or not.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, CourseRepositoryError>;

    /// List published courses, newest first, optionally filtered.
    async fn list_published(
        &self,
        filter: &CourseFilter,
    ) -> Result<Vec<Course>, CourseRepositoryError>;

    /// List every course owned by an instructor, newest first.
    async fn list_by_instructor(
        &self,
        instructor_id: UserId,
    ) -> Result<Vec<Course>, CourseRepositoryError>;

    /// Flip the published flag. Returns false when the course does not exist.
    async fn set_published(&self, id: Uuid, published: bool)
        -> Result<bool, CourseRepositoryError>;

    /// Count all courses.
    async fn count_all(&self) -> Result<u64, CourseRepositoryError>;

    /// Count courses owned by an instructor.
    async fn count_by_instructor(
        &self,
        instructor_id: UserId,
    ) -> Result<u64, CourseRepositoryError>;
}

/// Fixture implementation for tests that do not exercise course persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseRepository;

#[async_trait]
impl CourseRepository for FixtureCourseRepository {
    async fn insert(&self, _course: &Course) -> Result<(), CourseRepositoryError> {
        Ok(())
    }

    async fn update(&self, _course: &Course) -> Result<(), CourseRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(None)
    }

    async fn list_published(
        &self,
        _filter: &CourseFilter,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_instructor(
        &self,
        _instructor_id: UserId,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        Ok(Vec::new())
    }

    async fn set_published(
        &self,
        _id: Uuid,
        _published: bool,
    ) -> Result<bool, CourseRepositoryError> {
        Ok(false)
    }

    async fn count_all(&self) -> Result<u64, CourseRepositoryError> {
        Ok(0)
    }

    async fn count_by_instructor(
        &self,
        _instructor_id: UserId,
    ) -> Result<u64, CourseRepositoryError> {
        Ok(0)
    }
}
