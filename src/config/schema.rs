//! Configuration schema types
//!
//! This module defines the configuration structure for mismo-anon.

use crate::anonymization::AnonymizationConfig;
use serde::{Deserialize, Serialize};

/// Main mismo-anon configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional; missing sections take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MismoAnonConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Anonymization engine settings
    #[serde(default)]
    pub anonymization: AnonymizationConfig,

    /// Folder batch settings
    #[serde(default)]
    pub batch: BatchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MismoAnonConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.anonymization
            .validate()
            .map_err(|e| format!("{e:#}"))?;
        self.batch.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Folder batch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Name of the subfolder anonymized files are written to
    #[serde(default = "default_output_subfolder")]
    pub output_subfolder: String,

    /// Maximum number of files anonymized concurrently
    #[serde(default = "default_max_parallel_files")]
    pub max_parallel_files: usize,

    /// Replace files already present in the output subfolder
    #[serde(default = "default_true")]
    pub overwrite: bool,
}

impl BatchConfig {
    fn validate(&self) -> Result<(), String> {
        let name = self.output_subfolder.as_str();
        if name.is_empty() || name == "." || name == ".." {
            return Err(format!("Invalid batch.output_subfolder '{name}'"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(format!(
                "batch.output_subfolder '{name}' must be a single folder name"
            ));
        }

        if self.max_parallel_files == 0 {
            return Err("batch.max_parallel_files must be > 0".to_string());
        }
        if self.max_parallel_files > 64 {
            return Err("batch.max_parallel_files must be <= 64".to_string());
        }

        Ok(())
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            output_subfolder: default_output_subfolder(),
            max_parallel_files: default_max_parallel_files(),
            overwrite: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path must be set when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_output_subfolder() -> String {
    "anon".to_string()
}

fn default_max_parallel_files() -> usize {
    4
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
