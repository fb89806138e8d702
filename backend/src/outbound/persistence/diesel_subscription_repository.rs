//! PostgreSQL-backed `SubscriptionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SubscriptionRepository, SubscriptionRepositoryError};
use crate::domain::{Subscription, SubscriptionStatus, SubscriptionTier, UserId};

use super::error_mapping;
use super::models::{NewSubscriptionRow, SubscriptionRow};
use super::pool::{DbPool, PoolError};
use super::schema::subscriptions;

/// Diesel-backed implementation of the `SubscriptionRepository` port.
#[derive(Clone)]
pub struct DieselSubscriptionRepository {
    pool: DbPool,
}

impl DieselSubscriptionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SubscriptionRepositoryError {
    error_mapping::map_pool_error(error, SubscriptionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SubscriptionRepositoryError {
    error_mapping::map_diesel_error(
        error,
        SubscriptionRepositoryError::query,
        SubscriptionRepositoryError::connection,
    )
}

fn row_to_subscription(row: SubscriptionRow) -> Result<Subscription, SubscriptionRepositoryError> {
    let tier: SubscriptionTier = row
        .tier
        .parse()
        .map_err(|err| SubscriptionRepositoryError::query(format!("stored tier invalid: {err}")))?;
    let status: SubscriptionStatus = row.status.parse().map_err(|err| {
        SubscriptionRepositoryError::query(format!("stored status invalid: {err}"))
    })?;

    Ok(Subscription {
        user_id: UserId::from_uuid(row.user_id),
        tier,
        status,
        current_period_end: row.current_period_end,
    })
}

#[async_trait]
impl SubscriptionRepository for DieselSubscriptionRepository {
    async fn find_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<Subscription>, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<SubscriptionRow> = subscriptions::table
            .find(user_id.as_uuid())
            .select(SubscriptionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_subscription).transpose()
    }

    async fn upsert(&self, subscription: &Subscription) -> Result<(), SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewSubscriptionRow {
            user_id: *subscription.user_id.as_uuid(),
            tier: subscription.tier.as_str(),
            status: subscription.status.as_str(),
            current_period_end: subscription.current_period_end,
        };

        diesel::insert_into(subscriptions::table)
            .values(&new_row)
            .on_conflict(subscriptions::user_id)
            .do_update()
            .set(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn set_status(
        &self,
        user_id: UserId,
        status: SubscriptionStatus,
    ) -> Result<bool, SubscriptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(subscriptions::table.find(user_id.as_uuid()))
            .set(subscriptions::status.eq(status.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }
}
