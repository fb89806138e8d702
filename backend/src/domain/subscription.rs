//! Subscription tiers and payment-processor events.
//!
//! Tiers gate course enrollment: a caller may only enroll in a course whose
//! tier is at or below their own. The ordering is `free < basic < premium`.
//! Subscription rows are written exclusively by the payment webhook.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profile::UserId;

/// Ranked access level. Ordering is significant: `Free < Basic < Premium`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    /// No paid subscription.
    Free,
    /// Entry paid tier.
    Basic,
    /// Top tier; unlocks every course.
    Premium,
}

impl SubscriptionTier {
    /// Stable string form used in the database and over the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Basic => "basic",
            Self::Premium => "premium",
        }
    }

    /// Whether this tier grants access to content gated at `required`.
    pub fn allows(self, required: Self) -> bool {
        self >= required
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionTier {
    type Err = SubscriptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "basic" => Ok(Self::Basic),
            "premium" => Ok(Self::Premium),
            other => Err(SubscriptionParseError::UnknownTier(other.to_owned())),
        }
    }
}

/// Billing status mirrored from the payment processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Paid up; tier benefits apply.
    Active,
    /// Last invoice failed; benefits still apply until the period ends.
    PastDue,
    /// Subscription ended; caller falls back to the free tier.
    Canceled,
}

impl SubscriptionStatus {
    /// Stable string form used in the database.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::PastDue => "past_due",
            Self::Canceled => "canceled",
        }
    }
}

impl FromStr for SubscriptionStatus {
    type Err = SubscriptionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "past_due" => Ok(Self::PastDue),
            "canceled" => Ok(Self::Canceled),
            other => Err(SubscriptionParseError::UnknownStatus(other.to_owned())),
        }
    }
}

/// Parse failures for persisted subscription fields and webhook payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionParseError {
    /// Tier string is not free/basic/premium.
    #[error("unknown subscription tier: {0}")]
    UnknownTier(String),
    /// Status string is not a known billing status.
    #[error("unknown subscription status: {0}")]
    UnknownStatus(String),
    /// Webhook event type string is not recognised.
    #[error("unknown payment event type: {0}")]
    UnknownEventType(String),
}

/// Subscription state for one user. Absence of a row means [`SubscriptionTier::Free`].
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    /// Owning user.
    pub user_id: UserId,
    /// Purchased tier.
    pub tier: SubscriptionTier,
    /// Billing status.
    pub status: SubscriptionStatus,
    /// End of the current billing period, when known.
    pub current_period_end: Option<DateTime<Utc>>,
}

impl Subscription {
    /// Tier that actually applies given the billing status.
    ///
    /// Canceled subscriptions no longer grant their tier.
    pub fn effective_tier(&self) -> SubscriptionTier {
        match self.status {
            SubscriptionStatus::Canceled => SubscriptionTier::Free,
            SubscriptionStatus::Active | SubscriptionStatus::PastDue => self.tier,
        }
    }
}

/// Payment-processor webhook event, decoded from the JSON body.
///
/// The wire format is `{"type": "...", "data": {...}}` with camelCase data
/// fields, matching the processor's event envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentEvent {
    /// `customer.subscription.created` / `customer.subscription.updated`.
    SubscriptionUpserted {
        /// Affected user.
        user_id: UserId,
        /// Purchased tier.
        tier: SubscriptionTier,
        /// End of the current billing period.
        current_period_end: Option<DateTime<Utc>>,
    },
    /// `customer.subscription.deleted`.
    SubscriptionDeleted {
        /// Affected user.
        user_id: UserId,
    },
    /// `invoice.payment_succeeded`.
    PaymentSucceeded {
        /// Affected user.
        user_id: UserId,
    },
    /// `invoice.payment_failed`.
    PaymentFailed {
        /// Affected user.
        user_id: UserId,
    },
}

/// Raw webhook envelope used for serde decoding.
#[derive(Debug, Deserialize)]
pub struct PaymentEventEnvelope {
    /// Event type discriminator, e.g. `customer.subscription.created`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event payload.
    pub data: PaymentEventData,
}

/// Data object carried inside the webhook envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEventData {
    /// Affected user.
    pub user_id: UserId,
    /// Purchased tier; present on subscription events.
    #[serde(default)]
    pub tier: Option<SubscriptionTier>,
    /// End of the current billing period.
    #[serde(default)]
    pub current_period_end: Option<DateTime<Utc>>,
}

impl PaymentEvent {
    /// Decode an envelope into a typed event.
    ///
    /// Subscription upserts default to the free tier when the processor
    /// omits the tier field.
    pub fn from_envelope(envelope: PaymentEventEnvelope) -> Result<Self, SubscriptionParseError> {
        let PaymentEventEnvelope { event_type, data } = envelope;
        match event_type.as_str() {
            "customer.subscription.created" | "customer.subscription.updated" => {
                Ok(Self::SubscriptionUpserted {
                    user_id: data.user_id,
                    tier: data.tier.unwrap_or(SubscriptionTier::Free),
                    current_period_end: data.current_period_end,
                })
            }
            "customer.subscription.deleted" => Ok(Self::SubscriptionDeleted {
                user_id: data.user_id,
            }),
            "invoice.payment_succeeded" => Ok(Self::PaymentSucceeded {
                user_id: data.user_id,
            }),
            "invoice.payment_failed" => Ok(Self::PaymentFailed {
                user_id: data.user_id,
            }),
            other => Err(SubscriptionParseError::UnknownEventType(other.to_owned())),
        }
    }
}
