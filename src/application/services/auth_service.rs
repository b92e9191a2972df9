//! Credential check for the write path.

use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Checks HTTP Basic credentials against the configured user and password.
///
/// Credentials are compared as HMAC-SHA256 tags keyed with a random
/// per-process key, so the comparison runs in constant time and the plain
/// password is not kept in memory after construction.
pub struct AuthService {
    key: [u8; 32],
    expected: Vec<u8>,
}

impl AuthService {
    /// Creates the service for a single user.
    ///
    /// # Errors
    ///
    /// Returns an error if the system random number generator fails.
    pub fn new(user: &str, password: &str) -> Result<Self, getrandom::Error> {
        let mut key = [0u8; 32];
        getrandom::fill(&mut key)?;

        let expected = tag(&key, user, password).finalize().into_bytes().to_vec();

        Ok(Self { key, expected })
    }

    /// Accepts the request if `user`/`password` match.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on mismatch.
    pub fn authenticate(&self, user: &str, password: &str) -> Result<(), AppError> {
        tag(&self.key, user, password)
            .verify_slice(&self.expected)
            .map_err(|_| {
                tracing::warn!(user, "rejected credentials");
                AppError::unauthorized("Unauthorized", json!({ "reason": "Invalid credentials" }))
            })
    }
}

/// MAC over the length-prefixed user followed by the password.
fn tag(key: &[u8], user: &str, password: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(&(user.len() as u64).to_be_bytes());
    mac.update(user.as_bytes());
    mac.update(password.as_bytes());
    mac
}
