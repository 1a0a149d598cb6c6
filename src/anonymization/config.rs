//! Anonymization configuration

use crate::anonymization::rules::RuleOptions;
use crate::config::{secret_string, SecretString};
use secrecy::ExposeSecret;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Anonymization engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Dry-run mode (match rules and report, don't change values)
    #[serde(default)]
    pub dry_run: bool,

    /// Generate e-mail shaped values for `_Type="Email"` contact points.
    ///
    /// Off by default: e-mail contact values receive the same `555` digit
    /// string as phones and faxes, matching the documents downstream
    /// fixtures were built from.
    #[serde(default)]
    pub realistic_emails: bool,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

impl AnonymizationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.audit
            .validate()
            .context("Invalid audit configuration")?;
        Ok(())
    }

    /// Rule-table options derived from this configuration
    pub fn rule_options(&self) -> RuleOptions {
        RuleOptions {
            realistic_emails: self.realistic_emails,
        }
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("MISMO_ANON_ANONYMIZATION_DRY_RUN") {
            self.dry_run = val
                .parse()
                .context("Invalid MISMO_ANON_ANONYMIZATION_DRY_RUN value")?;
        }

        if let Ok(val) = std::env::var("MISMO_ANON_ANONYMIZATION_REALISTIC_EMAILS") {
            self.realistic_emails = val
                .parse()
                .context("Invalid MISMO_ANON_ANONYMIZATION_REALISTIC_EMAILS value")?;
        }

        self.audit.apply_env_overrides()?;

        Ok(())
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,

    /// HMAC key for original-value hashes. Without one a random key is
    /// drawn per run and hashes only correlate within that run.
    #[serde(default, skip_serializing)]
    pub hash_key: Option<SecretString>,
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/anonymization.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
            hash_key: None,
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            anyhow::bail!("Audit logging enabled but log_path is empty");
        }
        if self
            .hash_key
            .as_ref()
            .is_some_and(|key| key.expose_secret().is_empty())
        {
            anyhow::bail!("Audit hash_key must not be empty when set");
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("MISMO_ANON_AUDIT_ENABLED") {
            self.enabled = val
                .parse()
                .context("Invalid MISMO_ANON_AUDIT_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("MISMO_ANON_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("MISMO_ANON_AUDIT_HASH_KEY") {
            self.hash_key = Some(secret_string(val));
        }

        if let Ok(val) = std::env::var("MISMO_ANON_AUDIT_JSON_FORMAT") {
            self.json_format = val
                .parse()
                .context("Invalid MISMO_ANON_AUDIT_JSON_FORMAT value")?;
        }

        Ok(())
    }
}
