//! Driving port for applying payment-processor webhook events.

use async_trait::async_trait;

use crate::domain::subscription::PaymentEvent;
use crate::domain::Error;

/// Driving port that folds payment events into subscription state.
///
/// Signature verification happens in the inbound adapter before this port
/// is reached; events arriving here are authenticated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionSync: Send + Sync {
    /// Apply one decoded event.
    async fn apply(&self, event: PaymentEvent) -> Result<(), Error>;
}

/// Fixture sync that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSubscriptionSync;

#[async_trait]
impl SubscriptionSync for FixtureSubscriptionSync {
    async fn apply(&self, _event: PaymentEvent) -> Result<(), Error> {
        Ok(())
    }
}
