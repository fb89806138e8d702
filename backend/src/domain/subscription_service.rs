//! Subscription state synchronisation from payment webhooks.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::domain::notification::Notification;
use crate::domain::ports::{NotificationRepository, SubscriptionRepository, SubscriptionSync};
use crate::domain::subscription::{PaymentEvent, Subscription, SubscriptionStatus};
use crate::domain::Error;

/// Repository-backed implementation of the subscription sync port.
#[derive(Clone)]
pub struct SubscriptionService {
    subscriptions: Arc<dyn SubscriptionRepository>,
    notifications: Arc<dyn NotificationRepository>,
}

impl SubscriptionService {
    /// Create a new service over the subscription and notification stores.
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            subscriptions,
            notifications,
        }
    }
}

#[async_trait]
impl SubscriptionSync for SubscriptionService {
    async fn apply(&self, event: PaymentEvent) -> Result<(), Error> {
        match event {
            PaymentEvent::SubscriptionUpserted {
                user_id,
                tier,
                current_period_end,
            } => {
                info!(user_id = %user_id, tier = %tier, "subscription upserted");
                self.subscriptions
                    .upsert(&Subscription {
                        user_id,
                        tier,
                        status: SubscriptionStatus::Active,
                        current_period_end,
                    })
                    .await?;
            }
            PaymentEvent::SubscriptionDeleted { user_id } => {
                info!(user_id = %user_id, "subscription deleted");
                // Deleting a subscription that never existed is a no-op,
                // the same way the processor retries deliveries.
                self.subscriptions
                    .set_status(user_id, SubscriptionStatus::Canceled)
                    .await?;
            }
            PaymentEvent::PaymentSucceeded { user_id } => {
                self.subscriptions
                    .set_status(user_id, SubscriptionStatus::Active)
                    .await?;
            }
            PaymentEvent::PaymentFailed { user_id } => {
                let changed = self
                    .subscriptions
                    .set_status(user_id, SubscriptionStatus::PastDue)
                    .await?;
                if changed {
                    self.notifications
                        .insert(&Notification::immediate(
                            user_id,
                            "Payment failed",
                            "Your last subscription payment failed. Please update your \
                             payment details to keep your access.",
                            Utc::now(),
                        ))
                        .await?;
                }
            }
        }
        Ok(())
    }
}
