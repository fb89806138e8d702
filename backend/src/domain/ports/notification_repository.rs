//! Port for notification and reminder persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::notification::Notification;
use crate::domain::profile::UserId;
use crate::domain::Error;

/// Errors raised by notification repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationRepositoryError {
    /// Repository connection could not be established.
    #[error("notification repository connection failed: {message}")]
    Connection {
        /// Adapter-provided detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("notification repository query failed: {message}")]
    Query {
        /// Adapter-provided detail.
        message: String,
    },
}

impl NotificationRepositoryError {
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

impl From<NotificationRepositoryError> for Error {
    fn from(error: NotificationRepositoryError) -> Self {
        match error {
            NotificationRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("notification store unavailable: {message}"))
            }
            NotificationRepositoryError::Query { message } => {
                Self::internal(format!("notification store error: {message}"))
            }
        }
    }
}

/// Port for reading and writing notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Insert a notification.
    async fn insert(
        &self,
        notification: &Notification,
    ) -> Result<(), NotificationRepositoryError>;

    /// List a user's notifications, newest first.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Notification>, NotificationRepositoryError>;

    /// Mark one of the user's notifications as read.
    ///
    /// Returns false when the notification does not exist or belongs to
    /// someone else.
    async fn mark_read(
        &self,
        id: Uuid,
        user_id: UserId,
    ) -> Result<bool, NotificationRepositoryError>;

    /// List unsent reminders scheduled at or before `now`.
    async fn list_due(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Notification>, NotificationRepositoryError>;

    /// Flag a reminder as sent.
    async fn mark_sent(&self, id: Uuid) -> Result<(), NotificationRepositoryError>;
}

/// Fixture implementation for tests that do not exercise notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationRepository;

#[async_trait]
impl NotificationRepository for FixtureNotificationRepository {
    async fn insert(
        &self,
        _notification: &Notification,
    ) -> Result<(), NotificationRepositoryError> {
        Ok(())
    }

    async fn list_for_user(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        Ok(Vec::new())
    }

    async fn mark_read(
        &self,
        _id: Uuid,
        _user_id: UserId,
    ) -> Result<bool, NotificationRepositoryError> {
        Ok(false)
    }

    async fn list_due(
        &self,
        _now: DateTime<Utc>,
    ) -> Result<Vec<Notification>, NotificationRepositoryError> {
        Ok(Vec::new())
    }

    async fn mark_sent(&self, _id: Uuid) -> Result<(), NotificationRepositoryError> {
        Ok(())
    }
}
