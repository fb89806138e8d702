//! Port for outbound email delivery.

use async_trait::async_trait;

use crate::domain::Error;

/// A single email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Errors raised by mailer adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MailerError {
    /// The delivery provider could not be reached.
    #[error("mail provider unreachable: {message}")]
    Unreachable {
        /// Adapter-provided detail.
        message: String,
    },
    /// The provider rejected the message.
    #[error("mail provider rejected message: {message}")]
    Rejected {
        /// Adapter-provided detail.
        message: String,
    },
}

impl MailerError {
    /// Provider-unreachable error with the given message.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::Unreachable {
            message: message.into(),
        }
    }

    /// Rejected-message error with the given message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

impl From<MailerError> for Error {
    fn from(error: MailerError) -> Self {
        match error {
            MailerError::Unreachable { message } => {
                Self::service_unavailable(format!("mail delivery unavailable: {message}"))
            }
            MailerError::Rejected { message } => {
                Self::internal(format!("mail delivery failed: {message}"))
            }
        }
    }
}

/// Port for sending email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a single message.
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError>;
}

/// Fixture mailer that drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMailer;

#[async_trait]
impl Mailer for FixtureMailer {
    async fn send(&self, _message: &EmailMessage) -> Result<(), MailerError> {
        Ok(())
    }
}
