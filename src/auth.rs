//! Admin gate: password check and token issue for the admin page.
//!
//! Tokens are `admin_<unix-millis>`. They are predictable and never expire.
//! The server only checks them on writes when `REQUIRE_ADMIN_TOKEN` is on;
//! otherwise the admin page treats a stored token as "logged in" by itself.

use std::collections::HashSet;
use std::sync::Mutex;

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::util;

fn digest(value: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"iptvusca-admin-v1:");
    hasher.update(value.as_bytes());
    hasher.finalize().into()
}

pub struct AdminGate {
    /// Digest of the secret, so comparisons are fixed-length whatever is submitted
    secret_digest: [u8; 32],
    /// Issued tokens, kept only when writes are token-checked
    issued: Option<Mutex<HashSet<String>>>,
}

impl AdminGate {
    pub fn new(secret: impl AsRef<str>) -> Self {
        Self {
            secret_digest: digest(secret.as_ref()),
            issued: None,
        }
    }

    /// Remember issued tokens so `verify` can accept them.
    pub fn tracking_tokens(mut self) -> Self {
        self.issued = Some(Mutex::new(HashSet::new()));
        self
    }

    /// Check `submitted` against the configured secret and issue a token on match.
    pub fn login(&self, submitted: &str) -> Option<String> {
        let matches: bool = digest(submitted)[..].ct_eq(&self.secret_digest[..]).into();
        if !matches {
            tracing::warn!("Admin login rejected");
            return None;
        }

        let token = format!("admin_{}", util::now().timestamp_millis());
        if let Some(Ok(mut issued)) = self.issued.as_ref().map(|issued| issued.lock()) {
            issued.insert(token.clone());
        }
        tracing::info!("Admin login succeeded");
        Some(token)
    }

    /// Whether `token` was issued by this process. Always false without token tracking.
    pub fn verify(&self, token: &str) -> bool {
        self.issued
            .as_ref()
            .and_then(|issued| issued.lock().ok())
            .map(|issued| issued.contains(token))
            .unwrap_or(false)
    }
}
