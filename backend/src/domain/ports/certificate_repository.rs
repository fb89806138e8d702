//! Port for certificate persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::certificate::{Certificate, CertificateNumber};
use crate::domain::profile::UserId;
use crate::domain::Error;

/// Errors raised by certificate repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CertificateRepositoryError {
    /// Repository connection could not be established.
    #[error("certificate repository connection failed: {message}")]
    Connection {
        /// Adapter-provided detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("certificate repository query failed: {message}")]
    Query {
        /// Adapter-provided detail.
        message: String,
    },
    /// A certificate already exists for this (user, course) pair.
    ///
    /// Raised when a concurrent issue slips past the service's existence
    /// check and hits the unique index.
    #[error("certificate already issued for this user and course")]
    AlreadyIssued,
}

impl CertificateRepositoryError {
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

impl From<CertificateRepositoryError> for Error {
    fn from(error: CertificateRepositoryError) -> Self {
        match error {
            CertificateRepositoryError::Connection { message } => {
                Self::service_unavailable(format!("certificate store unavailable: {message}"))
            }
            CertificateRepositoryError::Query { message } => {
                Self::internal(format!("certificate store error: {message}"))
            }
            CertificateRepositoryError::AlreadyIssued => {
                Self::conflict("certificate already issued for this user and course")
            }
        }
    }
}

/// Port for reading and writing certificates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CertificateRepository: Send + Sync {
    /// Find the certificate for one (user, course) pair.
    async fn find_for_user_course(
        &self,
        user_id: UserId,
        course_id: Uuid,
    ) -> Result<Option<Certificate>, CertificateRepositoryError>;

    /// Public verification lookup by number.
    async fn find_by_number(
        &self,
        number: &CertificateNumber,
    ) -> Result<Option<Certificate>, CertificateRepositoryError>;

    /// Insert a freshly issued certificate.
    async fn insert(&self, certificate: &Certificate)
        -> Result<(), CertificateRepositoryError>;

    /// List a user's certificates, newest first.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Certificate>, CertificateRepositoryError>;

    /// Count certificates held by a user.
    async fn count_for_user(&self, user_id: UserId)
        -> Result<u64, CertificateRepositoryError>;
}

/// Fixture implementation for tests that do not exercise certificates.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCertificateRepository;

#[async_trait]
impl CertificateRepository for FixtureCertificateRepository {
    async fn find_for_user_course(
        &self,
        _user_id: UserId,
        _course_id: Uuid,
    ) -> Result<Option<Certificate>, CertificateRepositoryError> {
        Ok(None)
    }

    async fn find_by_number(
        &self,
        _number: &CertificateNumber,
    ) -> Result<Option<Certificate>, CertificateRepositoryError> {
        Ok(None)
    }

    async fn insert(
        &self,
        _certificate: &Certificate,
    ) -> Result<(), CertificateRepositoryError> {
        Ok(())
    }

    async fn list_for_user(
        &self,
        _user_id: UserId,
    ) -> Result<Vec<Certificate>, CertificateRepositoryError> {
        Ok(Vec::new())
    }

    async fn count_for_user(
        &self,
        _user_id: UserId,
    ) -> Result<u64, CertificateRepositoryError> {
        Ok(0)
    }
}
