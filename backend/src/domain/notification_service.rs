//! Notification feed service.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    NotificationFeed, NotificationPayload, NotificationRepository,
};
use crate::domain::profile::UserId;
use crate::domain::Error;

/// Repository-backed implementation of the notification feed port.
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    /// Create a new service over the notification store.
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }
}

#[async_trait]
impl NotificationFeed for NotificationService {
    async fn list(&self, user_id: UserId) -> Result<Vec<NotificationPayload>, Error> {
        let rows = self.notifications.list_for_user(user_id).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn mark_read(&self, user_id: UserId, notification_id: Uuid) -> Result<(), Error> {
        let changed = self.notifications.mark_read(notification_id, user_id).await?;
        if !changed {
            return Err(Error::not_found(format!(
                "notification {notification_id} not found"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::Utc;
    use mockall::predicate::eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::notification::Notification;
    use crate::domain::ports::MockNotificationRepository;
    use crate::domain::ErrorCode;

    #[rstest]
    #[tokio::test]
    async fn the_feed_lists_stored_rows() {
        let user = UserId::random();
        let row = Notification::immediate(user, "Course completed", "Well done!", Utc::now());
        let row_id = row.id;

        let mut repo = MockNotificationRepository::new();
        repo.expect_list_for_user()
            .with(eq(user))
            .returning(move |_| Ok(vec![row.clone()]));

        let service = NotificationService::new(Arc::new(repo));
        let feed = service.list(user).await.expect("listing succeeds");

        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].id, row_id);
        assert!(!feed[0].read);
    }

    #[rstest]
    #[tokio::test]
    async fn marking_someone_elses_notification_is_not_found() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_mark_read().returning(|_, _| Ok(false));

        let service = NotificationService::new(Arc::new(repo));
        let err = service
            .mark_read(UserId::random(), Uuid::new_v4())
            .await
            .expect_err("foreign notification is hidden");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
