//! Driving port for registration and authentication use-cases.
//!
//! Inbound adapters call this port to create accounts and check credentials
//! without importing the backing persistence or hashing machinery.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::profile::{DisplayName, EmailAddress, Profile, Role, UserId};
use crate::domain::Error;

/// Request to create a new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// Request to authenticate an existing account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Domain use-case port for account lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthCommand: Send + Sync {
    /// Create an account with the student role and return its profile.
    async fn register(&self, request: RegisterRequest) -> Result<Profile, Error>;

    /// Validate credentials and return the matching profile.
    async fn login(&self, request: LoginRequest) -> Result<Profile, Error>;
}

/// In-memory authenticator used until persistence is wired.
///
/// `admin@example.com` / `password` authenticates as an admin with a fixed
/// user id; registration echoes the request back as a student profile.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthCommand;

const FIXTURE_ADMIN_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

#[async_trait]
impl AuthCommand for FixtureAuthCommand {
    async fn register(&self, request: RegisterRequest) -> Result<Profile, Error> {
        let email = EmailAddress::new(&request.email)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let display_name = DisplayName::new(&request.display_name)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(Profile {
            id: UserId::random(),
            email,
            display_name,
            role: Role::Student,
            created_at: Utc::now(),
        })
    }

    async fn login(&self, request: LoginRequest) -> Result<Profile, Error> {
        if request.email == "admin@example.com" && request.password == "password" {
            let id: UserId = FIXTURE_ADMIN_ID
                .parse()
                .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))?;
            let email = EmailAddress::new("admin@example.com")
                .map_err(|err| Error::internal(format!("invalid fixture email: {err}")))?;
            let display_name = DisplayName::new("Admin")
                .map_err(|err| Error::internal(format!("invalid fixture name: {err}")))?;
            Ok(Profile {
                id,
                email,
                display_name,
                role: Role::Admin,
                created_at: Utc::now(),
            })
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
