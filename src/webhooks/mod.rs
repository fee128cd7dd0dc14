//! Webhook verification.
//!
//! Mailgun signs every callback with an HMAC-SHA256 over `timestamp` and
//! `token`, keyed with the account's API key. The hex digest arrives in the
//! `signature` field.

use crate::observability::Redacted;
use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::Sha256;
use tracing::{debug, warn};

type HmacSha256 = Hmac<Sha256>;

/// Signature fields carried by every webhook payload
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebhookSignature {
    /// Seconds since the epoch, as sent
    pub timestamp: String,
    /// Random token
    pub token: String,
    /// Hex HMAC-SHA256 of `timestamp` + `token`
    pub signature: String,
}

/// Check a webhook signature.
///
/// Returns `true` only when `signature` is the lowercase hex HMAC-SHA256 of
/// `timestamp` followed by `token`, keyed with `api_key`. The comparison
/// runs in constant time.
pub fn verify(timestamp: &str, token: &str, signature: &str, api_key: &str) -> bool {
    match compute_signature(timestamp, token, api_key) {
        Some(expected) => constant_time_eq(signature.as_bytes(), expected.as_bytes()),
        None => false,
    }
}

/// Hex HMAC-SHA256 of `timestamp` + `token`
pub fn compute_signature(timestamp: &str, token: &str, api_key: &str) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(api_key.as_bytes()).ok()?;
    mac.update(timestamp.as_bytes());
    mac.update(token.as_bytes());
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Webhook signature verifier holding the API key
#[derive(Clone)]
pub struct SignatureVerifier {
    api_key: SecretString,
}

impl SignatureVerifier {
    /// Create a new verifier with the API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
        }
    }

    /// Verify the signature fields of a webhook payload
    pub fn verify(&self, payload: &WebhookSignature) -> bool {
        self.verify_parts(&payload.timestamp, &payload.token, &payload.signature)
    }

    /// Verify raw signature fields
    pub fn verify_parts(&self, timestamp: &str, token: &str, signature: &str) -> bool {
        let valid = verify(timestamp, token, signature, self.api_key.expose_secret());
        if valid {
            debug!(timestamp, "Webhook signature verified");
        } else {
            warn!(timestamp, "Webhook signature verification failed");
        }
        valid
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("api_key", &Redacted::new(&self.api_key))
            .finish()
    }
}
