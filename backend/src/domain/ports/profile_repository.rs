//! Port for profile persistence.

use async_trait::async_trait;

use crate::domain::profile::{Profile, Role, UserId};
use crate::domain::{Error, EmailAddress};

/// Errors raised by profile repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileRepositoryError {
    /// Repository connection could not be established.
    #[error("profile repository connection failed: {message}")]
    Connection {
        /// Adapter-provided detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("profile repository query failed: {message}")]
    Query {
        /// Adapter-provided detail.
        message: String,
    },
    /// A profile with the same email already exists.
    #[error("a profile with this email already exists")]
    DuplicateEmail,
}

impl ProfileRepositoryError {
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

impl From<ProfileRepositoryError> for Error {
    fn from(error: ProfileRepositoryError) -> Self {
        match error {
            ProfileRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("profile store unavailable: {message}"))
            }
            ProfileRepositoryError::Query { message } => {
                Self::internal(format!("profile store error: {message}"))
            }
            ProfileRepositoryError::DuplicateEmail => {
                Self::conflict("a profile with this email already exists")
            }
        }
    }
}

/// Stored profile plus its password hash, for credential verification.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredProfile {
    /// The profile itself.
    pub profile: Profile,
    /// Password hash in `salt:key` storage form.
    pub password_hash: String,
}

/// Port for reading and writing profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert a new profile with its password hash.
    async fn insert(&self, stored: &StoredProfile) -> Result<(), ProfileRepositoryError>;

    /// Find a profile by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Find a profile plus credentials by email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredProfile>, ProfileRepositoryError>;

    /// List every profile, newest first.
    async fn list_all(&self) -> Result<Vec<Profile>, ProfileRepositoryError>;

    /// Set a user's role. Returns false when the user does not exist.
    async fn update_role(&self, id: UserId, role: Role) -> Result<bool, ProfileRepositoryError>;

    /// Count all profiles.
    async fn count_all(&self) -> Result<u64, ProfileRepositoryError>;
}

/// Fixture implementation for tests that do not exercise profile persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileRepository;

#[async_trait]
impl ProfileRepository for FixtureProfileRepository {
    async fn insert(&self, _stored: &StoredProfile) -> Result<(), ProfileRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: UserId) -> Result<Option<Profile>, ProfileRepositoryError> {
        Ok(None)
    }

    async fn find_by_email(
        &self,
        _email: &EmailAddress,
    ) -> Result<Option<StoredProfile>, ProfileRepositoryError> {
        Ok(None)
    }

    async fn list_all(&self) -> Result<Vec<Profile>, ProfileRepositoryError> {
        Ok(Vec::new())
    }

    async fn update_role(&self, _id: UserId, _role: Role) -> Result<bool, ProfileRepositoryError> {
        Ok(false)
    }

    async fn count_all(&self) -> Result<u64, ProfileRepositoryError> {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    fn connection_errors_map_to_service_unavailable() {
        let err: Error = ProfileRepositoryError::connection("refused").into();
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
        assert!(err.message().contains("refused"));
    }

    #[rstest]
    fn duplicate_email_maps_to_conflict() {
        let err: Error = ProfileRepositoryError::DuplicateEmail.into();
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_lookups_return_nothing() {
        let repo = FixtureProfileRepository;
        assert!(repo.find_by_id(UserId::random()).await.expect("ok").is_none());
        assert!(repo.list_all().await.expect("ok").is_empty());
    }
}
