//! Keyed hashing of original values for the audit log

use crate::anonymization::config::AuditConfig;
use anyhow::Result;
use hmac::{Hmac, Mac};
use rand::RngCore;
use secrecy::ExposeSecret;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const RANDOM_KEY_LEN: usize = 32;

/// HMAC-SHA256 over original PII values.
///
/// Without the key, low-entropy values such as SSNs cannot be recovered by
/// enumerating candidates against the logged digests.
#[derive(Clone)]
pub struct ValueHasher {
    mac: HmacSha256,
}

impl ValueHasher {
    /// Hasher keyed with the given bytes
    pub fn new(key: &[u8]) -> Result<Self> {
        if key.is_empty() {
            anyhow::bail!("Audit hash key must not be empty");
        }
        let mac = HmacSha256::new_from_slice(key)
            .map_err(|e| anyhow::anyhow!("Invalid audit hash key: {e}"))?;
        Ok(Self { mac })
    }

    /// Hasher keyed with fresh random bytes; digests only correlate within
    /// the lifetime of this hasher
    pub fn random() -> Result<Self> {
        let mut key = [0u8; RANDOM_KEY_LEN];
        rand::thread_rng().fill_bytes(&mut key);
        Self::new(&key)
    }

    /// Configured key if present, otherwise a per-run random key
    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        match &config.hash_key {
            Some(key) => Self::new(key.expose_secret().as_bytes()),
            None => {
                tracing::debug!("No audit hash key configured, using a per-run random key");
                Self::random()
            }
        }
    }

    /// Lowercase hex digest of `value`
    pub fn hash(&self, value: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(value.as_bytes());
        format!("{:x}", mac.finalize().into_bytes())
    }
}
