//! Logging and observability
//!
//! Structured logging with:
//! - Configurable log levels
//! - Console output on stderr
//! - Optional JSON file logging with rotation
//!
//! Original attribute values never reach the logs.
//!
//! # Example
//!
//! ```no_run
//! use mismo_anon::logging::init_logging;
//! use mismo_anon::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a document anonymization
///
/// # Example
///
/// ```no_run
/// use mismo_anon::log_document_start;
///
/// log_document_start!("loan-001.xml");
/// ```
#[macro_export]
macro_rules! log_document_start {
    ($document_id:expr) => {
        tracing::debug!(document_id = %$document_id, "Anonymizing document");
    };
}

/// Log the completion of a document anonymization
///
/// # Example
///
/// ```no_run
/// use mismo_anon::log_document_complete;
/// use std::time::Duration;
///
/// log_document_complete!("loan-001.xml", 12, Duration::from_millis(4));
/// ```
#[macro_export]
macro_rules! log_document_complete {
    ($document_id:expr, $replacements:expr, $duration:expr) => {
        tracing::info!(
            document_id = %$document_id,
            replacements = $replacements,
            duration_ms = $duration.as_millis() as u64,
            "Document anonymized"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use mismo_anon::log_error_with_context;
/// use mismo_anon::domain::AnonError;
///
/// let error = AnonError::Validation("Error parsing XML".to_string());
/// log_error_with_context!(&error, "loan-001.xml");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}

/// Log folder batch progress
///
/// # Example
///
/// ```no_run
/// use mismo_anon::log_batch_progress;
///
/// log_batch_progress!(10, 40);
/// ```
#[macro_export]
macro_rules! log_batch_progress {
    ($current:expr, $total:expr) => {
        tracing::debug!(
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / $total as f64 * 100.0),
            "Processing folder"
        );
    };
}
