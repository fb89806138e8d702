//! Port for subscription persistence.

use async_trait::async_trait;

use crate::domain::profile::UserId;
use crate::domain::subscription::{Subscription, SubscriptionStatus};
use crate::domain::Error;

/// Errors raised by subscription repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionRepositoryError {
    /// Repository connection could not be established.
    #[error("subscription repository connection failed: {message}")]
    Connection {
        /// Adapter-provided detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("subscription repository query failed: {message}")]
    Query {
        /// Adapter-provided detail.
        message: String,
    },
}

impl SubscriptionRepositoryError {
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

impl From<SubscriptionRepositoryError> for Error {
    fn from(error: SubscriptionRepositoryError) -> Self {
        match error {
            SubscriptionRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("subscription store unavailable: {message}"))
            }
            SubscriptionRepositoryError::Query { message } => {
                Self::internal(format!("subscription store error: {message}"))
            }
        }
    }
}

/// Port for reading and writing subscription records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Look up the subscription for a user, if any.
    async fn find_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError>;

    /// Insert or replace the subscription keyed by user.
    async fn upsert(&self, subscription: &Subscription)
        -> Result<(), SubscriptionRepositoryError>;

    /// Update only the status of an existing subscription.
    ///
    /// Returns false when the user has no subscription row.
    async fn set_status(
        &self,
        user_id: UserId,
        status: SubscriptionStatus,
    ) -> Result<bool, SubscriptionRepositoryError>;
}

/// Fixture implementation that reports no subscriptions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSubscriptionRepository;

#[async_trait]
impl SubscriptionRepository for FixtureSubscriptionRepository {
    async fn find_for_user(
        &self,
        _user_id: UserId,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError> {
        Ok(None)
    }

    async fn upsert(
        &self,
        _subscription: &Subscription,
    ) -> Result<(), SubscriptionRepositoryError> {
        Ok(())
    }

    async fn set_status(
        &self,
        _user_id: UserId,
        _status: SubscriptionStatus,
    ) -> Result<bool, SubscriptionRepositoryError> {
        Ok(false)
    }
}
