//! Configuration management for mismo-anon.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Configuration files support:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `MISMO_ANON_<SECTION>_<KEY>` environment overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mismo_anon::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("mismo-anon.toml")?;
//!
//! println!("Output subfolder: {}", config.batch.output_subfolder);
//! println!("Dry run: {}", config.anonymization.dry_run);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`AnonymizationConfig`](crate::anonymization::AnonymizationConfig) - Dry run, e-mail mode, audit log
//! - [`BatchConfig`] - Folder processing (output subfolder, parallelism)
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [anonymization]
//! dry_run = false
//! realistic_emails = false
//!
//! [anonymization.audit]
//! enabled = true
//! log_path = "${MISMO_ANON_AUDIT_DIR}/anonymization.log"
//! hash_key = "${MISMO_ANON_AUDIT_KEY}"
//!
//! [batch]
//! output_subfolder = "anon"
//! max_parallel_files = 4
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, DEFAULT_CONFIG_PATH};
pub use schema::{ApplicationConfig, BatchConfig, LoggingConfig, MismoAnonConfig};
pub use secret::{secret_string, SecretString, SecretValue};
