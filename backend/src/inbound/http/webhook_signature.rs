//! Payment webhook signature verification.
//!
//! The payment processor signs each delivery with HMAC-SHA256 over
//! `<timestamp>.<body>` and sends the result in the `Payment-Signature`
//! header as `t=<timestamp>,v1=<hex digest>`. Verification runs on the raw
//! body before any JSON decoding.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// HTTP header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "Payment-Signature";

/// Signature verification failure. Deliberately carries no detail about
/// which part of the check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("webhook signature verification failed")]
pub struct SignatureError;

/// Shared-secret verifier for payment webhook deliveries.
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: String,
}

impl WebhookVerifier {
    /// Construct a verifier from the processor's signing secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Verify a delivery against its signature header.
    pub fn verify(&self, payload: &[u8], signature_header: &str) -> Result<(), SignatureError> {
        let mut timestamp = None;
        let mut signature = None;
        for part in signature_header.split(',') {
            match part.split_once('=') {
                Some(("t", value)) => timestamp = Some(value),
                Some(("v1", value)) => signature = Some(value),
                _ => {}
            }
        }
        let timestamp = timestamp.ok_or(SignatureError)?;
        let signature = signature.ok_or(SignatureError)?;

        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|_| SignatureError)?;
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        let expected = hex::encode(mac.finalize().into_bytes());

        if subtle::ConstantTimeEq::ct_eq(expected.as_bytes(), signature.as_bytes()).into() {
            Ok(())
        } else {
            Err(SignatureError)
        }
    }
}

#[cfg(test)]
pub(crate) fn sign(secret: &str, timestamp: &str, payload: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("hmac accepts any key");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(payload);
    format!("t={timestamp},v1={}", hex::encode(mac.finalize().into_bytes()))
}
