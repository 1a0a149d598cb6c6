//! Folder batch processor
//!
//! Anonymizes every `*.xml` file directly inside a folder and writes the
//! results to an output subfolder. Files are independent: each runs on a
//! blocking worker, bounded by a semaphore, and a failing file is recorded
//! in the summary without stopping the others.

use super::summary::BatchSummary;
use crate::anonymization::{AnonymizationEngine, AnonymizedDocument, DryRunReport};
use crate::config::BatchConfig;
use crate::domain::{AnonError, Result};
use crate::{log_batch_progress, log_document_complete, log_document_start, log_error_with_context};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// Processes a folder of MISMO XML files
pub struct FolderProcessor {
    engine: Arc<AnonymizationEngine>,
    config: BatchConfig,
}

/// Per-file job settings shared by workers
#[derive(Debug, Clone)]
struct FileJob {
    path: PathBuf,
    file_name: String,
    output_folder: PathBuf,
    output_subfolder: String,
    overwrite: bool,
    dry_run: bool,
}

/// A successfully processed file
struct FileOutcome {
    file_name: String,
    anonymized: Option<String>,
    document: AnonymizedDocument,
}

impl FolderProcessor {
    /// Create a new folder processor
    pub fn new(engine: Arc<AnonymizationEngine>, config: BatchConfig) -> Self {
        Self { engine, config }
    }

    /// Anonymize all XML files in `folder`
    ///
    /// # Errors
    ///
    /// Returns [`AnonError::Validation`] if `folder` is missing or not a
    /// directory, and [`AnonError::Io`] if it cannot be listed or the
    /// output subfolder cannot be created. Failures of individual files are
    /// reported in the summary instead.
    pub async fn process_folder(&self, folder: &Path) -> Result<BatchSummary> {
        let start = Instant::now();
        let dry_run = self.engine.is_dry_run();

        if !folder.exists() {
            return Err(AnonError::Validation(format!(
                "Folder does not exist: {}",
                folder.display()
            )));
        }
        if !folder.is_dir() {
            return Err(AnonError::Validation(format!(
                "Path is not a directory: {}",
                folder.display()
            )));
        }

        let output_folder = folder.join(&self.config.output_subfolder);
        let mut summary = BatchSummary::new(
            folder.display().to_string(),
            output_folder.display().to_string(),
            dry_run,
        );

        let files = collect_xml_files(folder)?;
        if files.is_empty() {
            tracing::info!(folder = %folder.display(), "No XML files found in folder");
            return Ok(summary.finish(start.elapsed()));
        }

        if !dry_run {
            std::fs::create_dir_all(&output_folder)?;
        }

        tracing::info!(
            folder = %folder.display(),
            files = files.len(),
            max_parallel = self.config.max_parallel_files,
            "Processing XML files"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_parallel_files.max(1)));
        let mut handles = Vec::with_capacity(files.len());

        for path in files {
            let file_name = file_name_of(&path);
            let job = FileJob {
                path,
                file_name: file_name.clone(),
                output_folder: output_folder.clone(),
                output_subfolder: self.config.output_subfolder.clone(),
                overwrite: self.config.overwrite,
                dry_run,
            };

            let permit = Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|e| AnonError::Unexpected(format!("Worker pool closed: {}", e)))?;
            let engine = Arc::clone(&self.engine);

            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                process_file(&engine, &job)
            });
            handles.push((file_name, handle));
        }

        let total = handles.len();
        let mut report = dry_run.then(DryRunReport::new);

        for (done, (file_name, handle)) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(Ok(outcome)) => {
                    if let Some(report) = report.as_mut() {
                        report.add_document(&outcome.document);
                    }
                    summary.add_file(outcome.file_name, outcome.anonymized);
                }
                Ok(Err(e)) => {
                    log_error_with_context!(&e, &file_name);
                    if let Some(report) = report.as_mut() {
                        report.add_warning(format!("{}: {}", file_name, e));
                    }
                    summary.add_error(file_name, e.to_string());
                }
                Err(e) => {
                    tracing::error!(file = %file_name, error = %e, "Worker task failed");
                    summary.add_error(file_name, format!("Worker task failed: {}", e));
                }
            }
            log_batch_progress!(done + 1, total);
        }

        summary.report = report;
        let summary = summary.finish(start.elapsed());
        summary.log_summary();

        Ok(summary)
    }
}

/// List `*.xml` files directly inside `folder`, sorted by name
///
/// The extension check ignores case. Subdirectories, including the output
/// subfolder, are never descended into.
pub fn collect_xml_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type()?.is_file() {
            continue;
        }

        let is_xml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("xml"));
        if is_xml {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn process_file(engine: &AnonymizationEngine, job: &FileJob) -> Result<FileOutcome> {
    let start = Instant::now();
    log_document_start!(&job.file_name);

    let bytes = std::fs::read(&job.path)?;
    let xml = String::from_utf8(bytes).map_err(|e| {
        AnonError::Validation(format!("File is not valid UTF-8: {}", e.utf8_error()))
    })?;

    let document = engine.anonymize_xml(&job.file_name, &xml)?;

    let anonymized = if job.dry_run {
        None
    } else {
        let output_path = job.output_folder.join(&job.file_name);
        if !job.overwrite && output_path.exists() {
            return Err(AnonError::Io(format!(
                "Output file already exists: {}",
                output_path.display()
            )));
        }
        std::fs::write(&output_path, &document.xml)?;
        Some(format!("{}/{}", job.output_subfolder, job.file_name))
    };

    log_document_complete!(&job.file_name, document.total_replacements(), start.elapsed());

    Ok(FileOutcome {
        file_name: job.file_name.clone(),
        anonymized,
        document,
    })
}
