//! Reqwest-backed mailer adapter.
//!
//! This adapter owns transport details only: request serialisation against a
//! JSON delivery API, timeout handling and HTTP error mapping. Message
//! content is composed by the domain services.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use tracing::debug;

use crate::domain::ports::{EmailMessage, Mailer, MailerError};

const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire payload accepted by the delivery provider.
#[derive(Debug, Serialize)]
struct DeliveryRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Mailer adapter that POSTs messages to an HTTP delivery API.
pub struct HttpMailer {
    client: Client,
    endpoint: Url,
    api_key: String,
    sender: String,
}

impl HttpMailer {
    /// Build a mailer with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        sender: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        Self::with_timeout(endpoint, api_key, sender, DEFAULT_SEND_TIMEOUT)
    }

    /// Build a mailer with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(
        endpoint: Url,
        api_key: impl Into<String>,
        sender: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.into(),
            sender: sender.into(),
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> MailerError {
    MailerError::unreachable(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MailerError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    if status.is_client_error() {
        MailerError::rejected(message)
    } else {
        MailerError::unreachable(message)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        let payload = DeliveryRequest {
            from: &self.sender,
            to: &message.to,
            subject: &message.subject,
            text: &message.body,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.map_err(map_transport_error)?;
            return Err(map_status_error(status, body.as_ref()));
        }

        debug!(to = %message.to, "email accepted for delivery");
        Ok(())
    }
}
