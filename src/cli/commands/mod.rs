//! CLI command implementations
//!
//! Each command returns a process exit code: 0 success, 1 partial batch
//! failure, 2 validation or configuration error, 5 fatal error.

pub mod anonymize;
pub mod folder;
pub mod init;
pub mod text;
pub mod validate;

use crate::anonymization::{AnonymizationEngine, AnonymizedDocument, DryRunReport};
use crate::config::MismoAnonConfig;
use crate::domain::AnonError;

/// Build the engine, applying a `--dry-run` flag
fn build_engine(config: &MismoAnonConfig, dry_run: bool) -> anyhow::Result<AnonymizationEngine> {
    let mut anonymization = config.anonymization.clone();
    anonymization.dry_run |= dry_run;
    AnonymizationEngine::new(anonymization)
}

/// Report an anonymization error on stderr and map it to an exit code
fn report_error(error: &AnonError) -> i32 {
    tracing::error!(error = %error, "Anonymization failed");
    eprintln!("❌ {error}");
    error.exit_code()
}

/// Print the dry-run report for a single document
fn print_dry_run(document: &AnonymizedDocument) {
    let mut report = DryRunReport::new();
    report.add_document(document);
    print!("{}", report.format_console());
}
