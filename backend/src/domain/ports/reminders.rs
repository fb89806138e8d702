//! Driving port for the reminder email batch.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Error;

/// One reminder that could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderFailure {
    /// Notification row that failed.
    pub notification_id: Uuid,
    /// Delivery error detail.
    pub message: String,
}

/// Outcome of one dispatch run.
///
/// A failed delivery leaves its row unsent so the next run retries it; the
/// run itself still succeeds and reports the failure here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRunReport {
    /// Reminders delivered and marked sent.
    pub sent: u64,
    /// Reminders that failed to deliver.
    pub failed: Vec<ReminderFailure>,
}

/// Driving port for reminder dispatch.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReminderDispatch: Send + Sync {
    /// Send every reminder due at or before `now`.
    async fn send_due(&self, now: DateTime<Utc>) -> Result<ReminderRunReport, Error>;
}

/// Fixture dispatch that finds nothing to send.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReminderDispatch;

#[async_trait]
impl ReminderDispatch for FixtureReminderDispatch {
    async fn send_due(&self, _now: DateTime<Utc>) -> Result<ReminderRunReport, Error> {
        Ok(ReminderRunReport::default())
    }
}
