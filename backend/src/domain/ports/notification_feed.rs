//! Driving port for the in-app notification feed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::notification::Notification;
use crate::domain::profile::UserId;
use crate::domain::Error;

/// Serializable notification projection for driving ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationPayload {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id,
            title: notification.title,
            body: notification.body,
            read: notification.read,
            created_at: notification.created_at,
        }
    }
}

/// Driving port for reading and acknowledging notifications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationFeed: Send + Sync {
    /// List the caller's notifications, newest first.
    async fn list(&self, user_id: UserId) -> Result<Vec<NotificationPayload>, Error>;

    /// Mark one of the caller's notifications as read.
    async fn mark_read(&self, user_id: UserId, notification_id: Uuid) -> Result<(), Error>;
}

/// Fixture feed with no notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationFeed;

#[async_trait]
impl NotificationFeed for FixtureNotificationFeed {
    async fn list(&self, _user_id: UserId) -> Result<Vec<NotificationPayload>, Error> {
        Ok(Vec::new())
    }

    async fn mark_read(&self, _user_id: UserId, _notification_id: Uuid) -> Result<(), Error> {
        Err(Error::not_found("notification not found"))
    }
}
