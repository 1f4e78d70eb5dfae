// API token wrapper, comparison and fingerprinting

use secrecy::{ExposeSecret, Secret};
use sha2::{Digest, Sha256};
use std::fmt;
use subtle::ConstantTimeEq;

/// Hex characters of the SHA-256 digest kept in a fingerprint
const FINGERPRINT_LEN: usize = 12;

/// Short SHA-256 fingerprint of a presented token
///
/// Lets rejected tokens be correlated in logs without writing the token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenFingerprint(String);

impl TokenFingerprint {
    pub fn of(token: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        let mut digest = hex::encode(hasher.finalize());
        digest.truncate(FINGERPRINT_LEN);
        Self(digest)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The configured API token
///
/// Uses `secrecy::Secret` so the token never ends up in Debug output.
pub struct ApiToken(Secret<String>);

impl ApiToken {
    pub fn new(token: &str) -> Self {
        Self(Secret::new(token.to_string()))
    }

    /// Exact match against a presented token, in constant time
    pub fn matches(&self, presented: &str) -> bool {
        self.0
            .expose_secret()
            .as_bytes()
            .ct_eq(presented.as_bytes())
            .into()
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl Clone for ApiToken {
    fn clone(&self) -> Self {
        Self::new(self.0.expose_secret())
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiToken").field(&"<REDACTED>").finish()
    }
}
