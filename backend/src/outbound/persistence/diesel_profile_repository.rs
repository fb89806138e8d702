//! PostgreSQL-backed `ProfileRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError, StoredProfile};
use crate::domain::{DisplayName, EmailAddress, Profile, Role, UserId};

use super::error_mapping::{self, is_unique_violation};
use super::models::{NewProfileRow, ProfileRow};
use super::pool::{DbPool, PoolError};
use super::schema::profiles;

/// Diesel-backed implementation of the `ProfileRepository` port.
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ProfileRepositoryError {
    error_mapping::map_pool_error(error, ProfileRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ProfileRepositoryError {
    error_mapping::map_diesel_error(
        error,
        ProfileRepositoryError::query,
        ProfileRepositoryError::connection,
    )
}

/// Convert a database row to a domain profile.
///
/// Rows only enter the table through the domain's validating constructors,
/// so a failure here means the stored data was mutated out of band.
fn row_to_profile(row: &ProfileRow) -> Result<Profile, ProfileRepositoryError> {
    let email = EmailAddress::new(row.email.clone())
        .map_err(|err| ProfileRepositoryError::query(format!("stored email invalid: {err}")))?;
    let display_name = DisplayName::new(row.display_name.clone()).map_err(|err| {
        ProfileRepositoryError::query(format!("stored display name invalid: {err}"))
    })?;
    let role: Role = row
        .role
        .parse()
        .map_err(|err| ProfileRepositoryError::query(format!("stored role invalid: {err}")))?;

    Ok(Profile {
        id: UserId::from_uuid(row.id),
        email,
        display_name,
        role,
        created_at: row.created_at,
    })
}

fn row_to_stored_profile(row: ProfileRow) -> Result<StoredProfile, ProfileRepositoryError> {
    let profile = row_to_profile(&row)?;
    Ok(StoredProfile {
        profile,
        password_hash: row.password_hash,
    })
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn insert(&self, stored: &StoredProfile) -> Result<(), ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewProfileRow {
            id: *stored.profile.id.as_uuid(),
            email: stored.profile.email.as_ref(),
            display_name: stored.profile.display_name.as_ref(),
            role: stored.profile.role.as_str(),
            password_hash: &stored.password_hash,
            created_at: stored.profile.created_at,
        };

        diesel::insert_into(profiles::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    ProfileRepositoryError::DuplicateEmail
                } else {
                    map_diesel_error(err)
                }
            })
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ProfileRow> = profiles::table
            .filter(profiles::id.eq(id.as_uuid()))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.as_ref().map(row_to_profile).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredProfile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ProfileRow> = profiles::table
            .filter(profiles::email.eq(email.as_ref()))
            .select(ProfileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_stored_profile).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProfileRow> = profiles::table
            .order(profiles::created_at.desc())
            .select(ProfileRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.iter().map(row_to_profile).collect()
    }

    async fn update_role(&self, id: UserId, role: Role) -> Result<bool, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(profiles::table.filter(profiles::id.eq(id.as_uuid())))
            .set(profiles::role.eq(role.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn count_all(&self) -> Result<u64, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let count: i64 = profiles::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(count.unsigned_abs())
    }
}
