//! Folder batch summary and reporting
//!
//! The summary serializes to the JSON printed by the `folder` command.

use crate::anonymization::DryRunReport;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Overall batch outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    /// Every file was processed (or there were none)
    Success,
    /// Some files failed, some succeeded
    Partial,
    /// Every file failed
    Failed,
}

/// A processed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedFile {
    /// Input file name
    pub original: String,

    /// Output path relative to the input folder, absent in dry-run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymized: Option<String>,
}

/// A file that could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileError {
    /// Input file name
    pub file: String,

    /// Error message
    pub error: String,
}

/// Summary of a folder batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Overall outcome
    pub status: BatchStatus,

    /// Human-readable outcome
    pub message: String,

    /// Input folder
    pub folder: String,

    /// Output folder
    pub output_folder: String,

    /// Number of files processed successfully
    pub processed: usize,

    /// Number of files that failed
    pub failed: usize,

    /// Whether values were left untouched
    pub dry_run: bool,

    /// Processed files, sorted by name
    pub files: Vec<ProcessedFile>,

    /// Failed files, sorted by name
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<FileError>,

    /// Rule matches across the folder, dry-run only
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub report: Option<DryRunReport>,

    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl BatchSummary {
    /// Create an empty summary for a folder
    pub fn new(folder: impl Into<String>, output_folder: impl Into<String>, dry_run: bool) -> Self {
        Self {
            status: BatchStatus::Success,
            message: String::new(),
            folder: folder.into(),
            output_folder: output_folder.into(),
            processed: 0,
            failed: 0,
            dry_run,
            files: Vec::new(),
            errors: Vec::new(),
            report: None,
            duration_ms: 0,
        }
    }

    /// Record a processed file
    pub fn add_file(&mut self, original: impl Into<String>, anonymized: Option<String>) {
        self.processed += 1;
        self.files.push(ProcessedFile {
            original: original.into(),
            anonymized,
        });
    }

    /// Record a failed file
    pub fn add_error(&mut self, file: impl Into<String>, error: impl Into<String>) {
        self.failed += 1;
        self.errors.push(FileError {
            file: file.into(),
            error: error.into(),
        });
    }

    /// Settle status, message and ordering once every file is accounted for
    pub fn finish(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis() as u64;
        self.files.sort_by(|a, b| a.original.cmp(&b.original));
        self.errors.sort_by(|a, b| a.file.cmp(&b.file));

        self.status = match (self.processed, self.failed) {
            (_, 0) => BatchStatus::Success,
            (0, _) => BatchStatus::Failed,
            _ => BatchStatus::Partial,
        };

        self.message = if self.processed == 0 && self.failed == 0 {
            "No XML files found in folder".to_string()
        } else if self.dry_run {
            format!("Dry run scanned {} files", self.processed)
        } else if self.failed == 0 {
            format!("Processed {} files successfully", self.processed)
        } else {
            format!(
                "Processed {} files successfully, {} failed",
                self.processed, self.failed
            )
        };

        self
    }

    /// Check if the batch had no failures
    pub fn is_successful(&self) -> bool {
        self.failed == 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            folder = %self.folder,
            processed = self.processed,
            failed = self.failed,
            dry_run = self.dry_run,
            duration_ms = self.duration_ms,
            "Folder batch completed"
        );

        for error in &self.errors {
            tracing::warn!(file = %error.file, error = %error.error, "File failed");
        }
    }
}
