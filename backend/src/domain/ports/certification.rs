//! Driving port for certificate issuance and public verification.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::certificate::Certificate;
use crate::domain::profile::UserId;
use crate::domain::Error;

/// Driving port for certificate use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Certification: Send + Sync {
    /// Issue a certificate for a completed course.
    ///
    /// Issuance is idempotent: a second call for the same (user, course)
    /// pair returns the certificate issued the first time.
    async fn issue(&self, user_id: UserId, course_id: Uuid) -> Result<Certificate, Error>;

    /// Look up a certificate by its public number.
    async fn verify(&self, certificate_number: &str) -> Result<Certificate, Error>;

    /// List the caller's certificates, newest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Certificate>, Error>;
}

/// Fixture certification port that knows no certificates.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCertification;

#[async_trait]
impl Certification for FixtureCertification {
    async fn issue(&self, _user_id: UserId, _course_id: Uuid) -> Result<Certificate, Error> {
        Err(Error::invalid_request("course is not completed"))
    }

    async fn verify(&self, _certificate_number: &str) -> Result<Certificate, Error> {
        Err(Error::not_found("certificate not found"))
    }

    async fn list_for_user(&self, _user_id: UserId) -> Result<Vec<Certificate>, Error> {
        Ok(Vec::new())
    }
}
