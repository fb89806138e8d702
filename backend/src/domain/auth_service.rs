//! Account lifecycle services.
//!
//! [`AuthService`] implements registration, login, profile reads, and the
//! admin user-management port on top of the profile repository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::credentials::PasswordHash;
use crate::domain::ports::{
    AuthCommand, LoginRequest, ProfileQuery, ProfileRepository, RegisterRequest, StoredProfile,
    UserAdmin,
};
use crate::domain::profile::{DisplayName, EmailAddress, Profile, Role, UserId};
use crate::domain::Error;

/// Minimum accepted password length.
pub const PASSWORD_MIN: usize = 8;

/// Profile-repository-backed implementation of the account ports.
#[derive(Clone)]
pub struct AuthService {
    profiles: Arc<dyn ProfileRepository>,
}

impl AuthService {
    /// Create a new service over the profile repository.
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl AuthCommand for AuthService {
    async fn register(&self, request: RegisterRequest) -> Result<Profile, Error> {
        let email = EmailAddress::new(&request.email)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let display_name = DisplayName::new(&request.display_name)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        if request.password.chars().count() < PASSWORD_MIN {
            return Err(Error::invalid_request(format!(
                "password must be at least {PASSWORD_MIN} characters"
            )));
        }

        let hash = PasswordHash::derive(&request.password)
            .map_err(|err| Error::internal(format!("password hashing failed: {err}")))?;

        let profile = Profile {
            id: UserId::random(),
            email,
            display_name,
            role: Role::Student,
            created_at: chrono::Utc::now(),
        };
        self.profiles
            .insert(&StoredProfile {
                profile: profile.clone(),
                password_hash: hash.as_str().to_owned(),
            })
            .await?;

        Ok(profile)
    }

    async fn login(&self, request: LoginRequest) -> Result<Profile, Error> {
        let email = EmailAddress::new(&request.email)
            .map_err(|_| Error::unauthorized("invalid credentials"))?;
        let Some(stored) = self.profiles.find_by_email(&email).await? else {
            // Hash anyway so a missing account costs the same as a wrong
            // password.
            let _ = PasswordHash::derive(&request.password);
            return Err(Error::unauthorized("invalid credentials"));
        };

        let matches = PasswordHash::from_stored(&stored.password_hash)
            .verify(&request.password)
            .map_err(|err| Error::internal(format!("password verification failed: {err}")))?;
        if !matches {
            return Err(Error::unauthorized("invalid credentials"));
        }

        Ok(stored.profile)
    }
}

#[async_trait]
impl ProfileQuery for AuthService {
    async fn get(&self, user_id: UserId) -> Result<Profile, Error> {
        self.profiles
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("profile {user_id} not found")))
    }
}

#[async_trait]
impl UserAdmin for AuthService {
    async fn list_users(&self) -> Result<Vec<Profile>, Error> {
        Ok(self.profiles.list_all().await?)
    }

    async fn set_role(&self, user_id: UserId, role: Role) -> Result<Profile, Error> {
        let updated = self.profiles.update_role(user_id, role).await?;
        if !updated {
            return Err(Error::not_found(format!("profile {user_id} not found")));
        }
        self.profiles
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("profile {user_id} not found")))
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
