//! Anonymize command implementation
//!
//! Anonymizes a single XML file, writing the result to `--output` or stdout.

use super::{build_engine, print_dry_run, report_error};
use crate::config::MismoAnonConfig;
use crate::domain::AnonError;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// XML file to anonymize
    pub file: PathBuf,

    /// Write the anonymized document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report what would be replaced without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, config: &MismoAnonConfig) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file.display(), "Starting anonymize command");

        let xml = match read_xml_file(&self.file) {
            Ok(xml) => xml,
            Err(e) => return Ok(report_error(&e)),
        };

        let engine = build_engine(config, self.dry_run)?;
        let document_id = self
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.display().to_string());

        let result = match engine.anonymize_xml(&document_id, &xml) {
            Ok(result) => result,
            Err(e) => return Ok(report_error(&e)),
        };

        if result.dry_run {
            print_dry_run(&result);
            return Ok(0);
        }

        match &self.output {
            Some(path) => {
                if let Err(e) = fs::write(path, &result.xml) {
                    eprintln!("❌ Failed to write {}: {}", path.display(), e);
                    return Ok(5);
                }
                eprintln!(
                    "✅ Anonymized {} -> {} ({} values replaced)",
                    self.file.display(),
                    path.display(),
                    result.total_replacements()
                );
            }
            None => print!("{}", result.xml),
        }

        Ok(0)
    }
}

/// Read an input file, requiring an `.xml` extension and UTF-8 content
pub fn read_xml_file(path: &Path) -> Result<String, AnonError> {
    let is_xml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xml"));
    if !is_xml {
        return Err(AnonError::Validation("File must be an XML file".to_string()));
    }

    if !path.is_file() {
        return Err(AnonError::Validation(format!(
            "File does not exist: {}",
            path.display()
        )));
    }

    let bytes = fs::read(path)?;
    String::from_utf8(bytes).map_err(|e| {
        AnonError::Validation(format!("File is not valid UTF-8: {}", e.utf8_error()))
    })
}
