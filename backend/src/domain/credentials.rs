//! Password hashing for the credentials column.
//!
//! Uses scrypt (N=16384, r=16, p=1, dkLen=64) with a random 16-byte salt.
//! Stored format: `hex(salt):hex(key)`.

use rand::RngCore;
use scrypt::{Params, scrypt};
use subtle::ConstantTimeEq;

/// Errors raised while deriving or verifying a password hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The stored hash is not in `salt:key` hex form.
    #[error("stored password hash has an invalid format")]
    InvalidFormat,
    /// Key derivation failed.
    #[error("password key derivation failed: {0}")]
    Derivation(String),
}

const SALT_BYTES: usize = 16;
const KEY_BYTES: usize = 64;

/// Derived password hash in storage form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a password with a fresh random salt.
    pub fn derive(password: &str) -> Result<Self, PasswordHashError> {
        let mut salt = [0u8; SALT_BYTES];
        rand::thread_rng().fill_bytes(&mut salt);
        let salt_hex = hex::encode(salt);
        let key = derive_key(password, &salt_hex)?;
        Ok(Self(format!("{salt_hex}:{}", hex::encode(key))))
    }

    /// Wrap a hash loaded from storage.
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    /// Verify a candidate password against this hash in constant time.
    pub fn verify(&self, password: &str) -> Result<bool, PasswordHashError> {
        let (salt_hex, key_hex) = self
            .0
            .split_once(':')
            .ok_or(PasswordHashError::InvalidFormat)?;
        let expected = hex::decode(key_hex).map_err(|_| PasswordHashError::InvalidFormat)?;
        let derived = derive_key(password, salt_hex)?;
        Ok(derived.ct_eq(expected.as_slice()).into())
    }

    /// Storage form of the hash.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn derive_key(password: &str, salt_hex: &str) -> Result<Vec<u8>, PasswordHashError> {
    // N=16384 -> log2(N)=14, r=16, p=1, dkLen=64
    let params = Params::new(14, 16, 1, KEY_BYTES)
        .map_err(|err| PasswordHashError::Derivation(err.to_string()))?;
    let mut output = vec![0u8; KEY_BYTES];
    scrypt(
        password.as_bytes(),
        salt_hex.as_bytes(),
        &params,
        &mut output,
    )
    .map_err(|err| PasswordHashError::Derivation(err.to_string()))?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_then_verify_accepts_the_password() {
        let hash = PasswordHash::derive("correct horse").expect("derive");
        assert!(hash.verify("correct horse").expect("verify"));
    }

    #[test]
    fn verify_rejects_a_wrong_password() {
        let hash = PasswordHash::derive("correct horse").expect("derive");
        assert!(!hash.verify("battery staple").expect("verify"));
    }

    #[test]
    fn stored_form_has_salt_and_key_parts() {
        let hash = PasswordHash::derive("pw").expect("derive");
        let (salt, key) = hash.as_str().split_once(':').expect("two parts");
        assert_eq!(salt.len(), SALT_BYTES * 2);
        assert_eq!(key.len(), KEY_BYTES * 2);
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        let hash = PasswordHash::from_stored("not-a-hash");
        assert_eq!(hash.verify("pw"), Err(PasswordHashError::InvalidFormat));
    }
}
