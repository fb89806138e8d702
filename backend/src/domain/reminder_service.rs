//! Reminder email dispatch service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::domain::ports::{
    EmailMessage, Mailer, NotificationRepository, ProfileRepository, ReminderDispatch,
    ReminderFailure, ReminderRunReport,
};
use crate::domain::Error;

/// Repository-backed implementation of the reminder dispatch port.
///
/// Delivery failures never abort the run: the failed row stays unsent for
/// the next run and is reported in the run outcome.
#[derive(Clone)]
pub struct ReminderService {
    notifications: Arc<dyn NotificationRepository>,
    profiles: Arc<dyn ProfileRepository>,
    mailer: Arc<dyn Mailer>,
}

impl ReminderService {
    /// Create a new service over the notification store and the mailer.
    pub fn new(
        notifications: Arc<dyn NotificationRepository>,
        profiles: Arc<dyn ProfileRepository>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            notifications,
            profiles,
            mailer,
        }
    }
}

#[async_trait]
impl ReminderDispatch for ReminderService {
    async fn send_due(&self, now: DateTime<Utc>) -> Result<ReminderRunReport, Error> {
        let due = self.notifications.list_due(now).await?;
        let mut report = ReminderRunReport::default();

        for notification in due {
            let recipient = match self.profiles.find_by_id(notification.user_id).await {
                Ok(Some(profile)) => profile,
                Ok(None) => {
                    warn!(notification_id = %notification.id, "reminder addressee no longer exists");
                    report.failed.push(ReminderFailure {
                        notification_id: notification.id,
                        message: "addressee no longer exists".to_owned(),
                    });
                    continue;
                }
                Err(err) => {
                    report.failed.push(ReminderFailure {
                        notification_id: notification.id,
                        message: err.to_string(),
                    });
                    continue;
                }
            };

            let message = EmailMessage {
                to: recipient.email.as_ref().to_owned(),
                subject: notification.title.clone(),
                body: notification.body.clone(),
            };
            match self.mailer.send(&message).await {
                Ok(()) => {
                    self.notifications.mark_sent(notification.id).await?;
                    report.sent += 1;
                }
                Err(err) => {
                    warn!(notification_id = %notification.id, error = %err, "reminder delivery failed");
                    report.failed.push(ReminderFailure {
                        notification_id: notification.id,
                        message: err.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}
