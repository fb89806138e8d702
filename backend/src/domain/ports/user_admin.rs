//! Driving ports for profile reads and admin user management.

use async_trait::async_trait;

use crate::domain::profile::{Profile, Role, UserId};
use crate::domain::Error;

/// Driving port for reading profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// Fetch the profile behind a session.
    async fn get(&self, user_id: UserId) -> Result<Profile, Error>;
}

/// Driving port for admin-only user management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserAdmin: Send + Sync {
    /// List every registered profile.
    async fn list_users(&self) -> Result<Vec<Profile>, Error>;

    /// Change a user's role.
    async fn set_role(&self, user_id: UserId, role: Role) -> Result<Profile, Error>;
}

/// Fixture profile query that knows no profiles.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileQuery;

#[async_trait]
impl ProfileQuery for FixtureProfileQuery {
    async fn get(&self, _user_id: UserId) -> Result<Profile, Error> {
        Err(Error::not_found("profile not found"))
    }
}

/// Fixture admin port with an empty user table.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserAdmin;

#[async_trait]
impl UserAdmin for FixtureUserAdmin {
    async fn list_users(&self) -> Result<Vec<Profile>, Error> {
        Ok(Vec::new())
    }

    async fn set_role(&self, _user_id: UserId, _role: Role) -> Result<Profile, Error> {
        Err(Error::not_found("profile not found"))
    }
}
