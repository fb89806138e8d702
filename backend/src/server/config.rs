//! HTTP server configuration object and helpers.

use actix_web::cookie::{Key, SameSite};
use backend::outbound::persistence::DbPool;
use reqwest::Url;
use std::net::SocketAddr;

/// Settings for the outbound HTTP mail provider.
#[derive(Clone)]
pub struct MailerSettings {
    pub endpoint: Url,
    pub api_key: String,
    pub sender: String,
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) webhook_secret: String,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) mailer: Option<MailerSettings>,
}

impl ServerConfig {
    /// Construct a server configuration from session and binding settings.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        webhook_secret: impl Into<String>,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            webhook_secret: webhook_secret.into(),
            db_pool: None,
            mailer: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses Diesel-backed implementations for every
    /// port; otherwise fixtures serve the routes.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach outbound mail settings for reminder delivery.
    ///
    /// Without settings the reminder dispatcher drops messages, which keeps
    /// local and test runs from contacting a mail provider.
    #[must_use]
    pub fn with_mailer(mut self, settings: MailerSettings) -> Self {
        self.mailer = Some(settings);
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(
            dead_code,
            reason = "Exercised by integration tests; retained for fixture access"
        )
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
