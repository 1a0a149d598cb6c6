//! Anonymize-text command implementation
//!
//! Anonymizes XML passed as an argument, or read from stdin when omitted,
//! and prints the result.

use super::{build_engine, print_dry_run, report_error};
use crate::config::MismoAnonConfig;
use clap::Args;
use std::io::Read;

/// Document id used for text input in logs and audit entries
const TEXT_DOCUMENT_ID: &str = "text";

/// Arguments for the anonymize-text command
#[derive(Args, Debug)]
pub struct AnonymizeTextArgs {
    /// XML content; read from stdin when omitted
    pub text: Option<String>,

    /// Report what would be replaced without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl AnonymizeTextArgs {
    /// Execute the anonymize-text command
    pub async fn execute(&self, config: &MismoAnonConfig) -> anyhow::Result<i32> {
        tracing::info!("Processing XML text");

        let xml = match &self.text {
            Some(text) => text.clone(),
            None => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };

        let engine = build_engine(config, self.dry_run)?;

        match engine.anonymize_xml(TEXT_DOCUMENT_ID, &xml) {
            Ok(result) if result.dry_run => {
                print_dry_run(&result);
                Ok(0)
            }
            Ok(result) => {
                print!("{}", result.xml);
                Ok(0)
            }
            Err(e) => Ok(report_error(&e)),
        }
    }
}
