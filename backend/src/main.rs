//! Backend entry-point: wires REST endpoints, persistence, and OpenAPI docs.

mod server;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use std::env;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};
use server::{MailerSettings, ServerConfig, create_server};

/// Load the session signing key, generating an ephemeral one in dev builds.
fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

/// Load the payment webhook signing secret shared with the provider.
fn load_webhook_secret() -> std::io::Result<String> {
    match env::var("PAYMENT_WEBHOOK_SECRET") {
        Ok(secret) if !secret.is_empty() => Ok(secret),
        _ => {
            if cfg!(debug_assertions) {
                warn!("PAYMENT_WEBHOOK_SECRET unset; payment webhooks will reject (dev only)");
                Ok("whsec_dev_placeholder".into())
            } else {
                Err(std::io::Error::other(
                    "PAYMENT_WEBHOOK_SECRET must be set in release builds",
                ))
            }
        }
    }
}

/// Read mail provider settings when fully configured.
fn load_mailer_settings() -> Option<MailerSettings> {
    let endpoint = env::var("MAIL_ENDPOINT").ok()?;
    let api_key = env::var("MAIL_API_KEY").ok()?;
    let sender = env::var("MAIL_SENDER").ok()?;
    match endpoint.parse() {
        Ok(endpoint) => Some(MailerSettings {
            endpoint,
            api_key,
            sender,
        }),
        Err(e) => {
            warn!(error = %e, "MAIL_ENDPOINT is not a valid URL; reminders will not be emailed");
            None
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key = load_session_key()?;
    let webhook_secret = load_webhook_secret()?;

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let mut config = ServerConfig::new(
        key,
        cookie_secure,
        SameSite::Lax,
        std::net::SocketAddr::from(([0, 0, 0, 0], 8080)),
        webhook_secret,
    );

    if let Ok(database_url) = env::var("DATABASE_URL") {
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|e| std::io::Error::other(format!("database pool construction failed: {e}")))?;
        config = config.with_db_pool(pool);
    } else {
        warn!("DATABASE_URL unset; serving fixture data only");
    }

    if let Some(settings) = load_mailer_settings() {
        config = config.with_mailer(settings);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
