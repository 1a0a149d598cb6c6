//! Domain error types
//!
//! This module defines the error hierarchy for the anonymizer. Callers only
//! need to distinguish two kinds at the boundary: [`AnonError::Validation`]
//! (the input could not become a document tree) and everything else, which
//! is reported as an unexpected failure with the original message kept.

use thiserror::Error;

/// Main anonymizer error type
#[derive(Debug, Error)]
pub enum AnonError {
    /// Input could not be parsed into a document tree
    #[error("Validation error: {0}")]
    Validation(String),

    /// Failure during traversal, mutation or serialization of a valid tree
    #[error("Unexpected error: {0}")]
    Unexpected(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AnonError {
    /// Whether the error was caused by the caller's input rather than by us
    pub fn is_validation(&self) -> bool {
        matches!(self, AnonError::Validation(_))
    }

    /// Process exit code used by the CLI for this error kind
    pub fn exit_code(&self) -> i32 {
        match self {
            AnonError::Validation(_) | AnonError::Configuration(_) => 2,
            _ => 5,
        }
    }
}

impl From<std::io::Error> for AnonError {
    fn from(err: std::io::Error) -> Self {
        AnonError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AnonError {
    fn from(err: serde_json::Error) -> Self {
        AnonError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for AnonError {
    fn from(err: toml::de::Error) -> Self {
        AnonError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<quick_xml::Error> for AnonError {
    fn from(err: quick_xml::Error) -> Self {
        AnonError::Validation(format!("Error parsing XML: {err}"))
    }
}
