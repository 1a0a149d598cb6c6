//! Folder command implementation
//!
//! Anonymizes every XML file in a folder and prints the JSON batch summary.

use super::{build_engine, report_error};
use crate::config::MismoAnonConfig;
use crate::core::batch::FolderProcessor;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the folder command
#[derive(Args, Debug)]
pub struct FolderArgs {
    /// Folder containing the XML files
    pub folder: PathBuf,

    /// Override the output subfolder name
    #[arg(long)]
    pub output_subfolder: Option<String>,

    /// Override the number of files processed concurrently
    #[arg(long)]
    pub max_parallel: Option<usize>,

    /// Report what would be replaced without writing files
    #[arg(long)]
    pub dry_run: bool,
}

impl FolderArgs {
    /// Execute the folder command
    pub async fn execute(&self, config: &MismoAnonConfig) -> anyhow::Result<i32> {
        tracing::info!(folder = %self.folder.display(), "Starting folder command");

        let mut config = config.clone();
        if let Some(subfolder) = &self.output_subfolder {
            tracing::info!(output_subfolder = %subfolder, "Overriding output subfolder from CLI");
            config.batch.output_subfolder = subfolder.clone();
        }
        if let Some(max_parallel) = self.max_parallel {
            tracing::info!(max_parallel, "Overriding parallelism from CLI");
            config.batch.max_parallel_files = max_parallel;
        }
        if let Err(e) = config.validate() {
            eprintln!("❌ Invalid options: {e}");
            return Ok(2);
        }

        let engine = Arc::new(build_engine(&config, self.dry_run)?);
        let processor = FolderProcessor::new(engine, config.batch.clone());

        let summary = match processor.process_folder(&self.folder).await {
            Ok(summary) => summary,
            Err(e) => return Ok(report_error(&e)),
        };

        println!("{}", serde_json::to_string_pretty(&summary)?);

        if let Some(report) = &summary.report {
            eprint!("{}", report.format_console());
        }

        Ok(if summary.is_successful() { 0 } else { 1 })
    }
}
