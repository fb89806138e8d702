//! User-addressed notifications and scheduled reminders.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::profile::UserId;

/// A message addressed to one user.
///
/// Rows with `scheduled_for <= now` and `sent == false` are due reminders;
/// the reminder dispatch sends them by email and flips `sent`.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Notification identifier.
    pub id: Uuid,
    /// Addressed user.
    pub user_id: UserId,
    /// Short headline.
    pub title: String,
    /// Message body.
    pub body: String,
    /// Whether the user has seen the notification in-app.
    pub read: bool,
    /// When set, the notification is a scheduled reminder.
    pub scheduled_for: Option<DateTime<Utc>>,
    /// Whether the reminder email has been sent.
    pub sent: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Immediate in-app notification (no email schedule).
    pub fn immediate(
        user_id: UserId,
        title: impl Into<String>,
        body: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            body: body.into(),
            read: false,
            scheduled_for: None,
            sent: false,
            created_at,
        }
    }

    /// Whether this row is a reminder due for email dispatch.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.sent && self.scheduled_for.is_some_and(|at| at <= now)
    }
}
