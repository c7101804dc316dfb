//! Webhook signature verification using HMAC-SHA256.
//!
//! GitHub signs each delivery body with the shared webhook secret and sends the
//! result in `X-Hub-Signature-256` as `sha256=<hex>`. Deliveries are verified
//! before anything in them is parsed.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Why a delivery failed verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("delivery is not signed")]
    Missing,

    #[error("signature header is not of the form sha256=<hex>")]
    Malformed,

    #[error("signature does not match payload")]
    Mismatch,
}

/// The shared secret configured on the GitHub webhook.
#[derive(Clone)]
pub struct WebhookSecret(Vec<u8>);

impl WebhookSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        WebhookSecret(secret.into())
    }

    /// Checks `signature_header` against `payload` in constant time.
    pub fn verify(&self, payload: &[u8], signature_header: &str) -> Result<(), SignatureError> {
        let expected = parse_signature_header(signature_header).ok_or(SignatureError::Malformed)?;
        let mut mac = self.mac().ok_or(SignatureError::Mismatch)?;
        mac.update(payload);
        mac.verify_slice(&expected)
            .map_err(|_| SignatureError::Mismatch)
    }

    /// Computes the `X-Hub-Signature-256` value GitHub would send for `payload`.
    pub fn sign(&self, payload: &[u8]) -> Option<String> {
        let mut mac = self.mac()?;
        mac.update(payload);
        Some(format!("sha256={}", hex::encode(mac.finalize().into_bytes())))
    }

    fn mac(&self) -> Option<HmacSha256> {
        HmacSha256::new_from_slice(&self.0).ok()
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret(<redacted>)")
    }
}

/// Parses a signature header (`sha256=<hex>`) into raw bytes.
///
/// Returns `None` for a missing prefix, another algorithm or bad hex.
pub fn parse_signature_header(header: &str) -> Option<Vec<u8>> {
    hex::decode(header.strip_prefix("sha256=")?).ok()
}
