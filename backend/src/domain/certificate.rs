//! Certificates issued on course completion.
//!
//! Certificate numbers follow `CERT-<base36 millis>-<6 base36 chars>` and
//! are unique per (user, course); issuance is idempotent.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::profile::UserId;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const RANDOM_SUFFIX_LEN: usize = 6;

static NUMBER_RE: OnceLock<Regex> = OnceLock::new();

fn number_regex() -> &'static Regex {
    NUMBER_RE.get_or_init(|| {
        Regex::new(r"^CERT-[0-9A-Z]+-[0-9A-Z]{6}$")
            .unwrap_or_else(|error| panic!("certificate regex failed to compile: {error}"))
    })
}

/// Errors raised while constructing a certificate number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("certificate number does not match the CERT-<ts>-<suffix> pattern: {0}")]
pub struct CertificateNumberError(pub String);

/// Unique, human-verifiable certificate number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CertificateNumber(String);

impl CertificateNumber {
    /// Generate a fresh number from the issue timestamp plus random entropy.
    pub fn generate(issued_at: DateTime<Utc>) -> Self {
        let millis = issued_at.timestamp_millis().max(0) as u64;
        let mut rng = rand::thread_rng();
        let suffix: String = (0..RANDOM_SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        Self(format!("CERT-{}-{suffix}", base36(millis)))
    }

    /// Validate a number loaded from storage or a URL path.
    pub fn parse(raw: impl Into<String>) -> Result<Self, CertificateNumberError> {
        let raw = raw.into();
        if number_regex().is_match(&raw) {
            Ok(Self(raw))
        } else {
            Err(CertificateNumberError(raw))
        }
    }
}

impl AsRef<str> for CertificateNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CertificateNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<CertificateNumber> for String {
    fn from(value: CertificateNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for CertificateNumber {
    type Error = CertificateNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

fn base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    // Digits come from the BASE36 table, so the bytes are valid ASCII.
    String::from_utf8(digits).unwrap_or_default()
}

/// A certificate awarded to a learner for a course.
#[derive(Debug, Clone, PartialEq)]
pub struct Certificate {
    /// Certificate identifier.
    pub id: Uuid,
    /// Awarded learner.
    pub user_id: UserId,
    /// Completed course.
    pub course_id: Uuid,
    /// Passing exam attempt backing the award, when the course has an exam.
    pub exam_attempt_id: Option<Uuid>,
    /// Public verification number.
    pub certificate_number: CertificateNumber,
    /// Issue timestamp.
    pub issued_at: DateTime<Utc>,
}

impl Certificate {
    /// Issue a new certificate with a freshly generated number.
    pub fn issue(
        user_id: UserId,
        course_id: Uuid,
        exam_attempt_id: Option<Uuid>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            course_id,
            exam_attempt_id,
            certificate_number: CertificateNumber::generate(issued_at),
            issued_at,
        }
    }
}
