//! Audit logger for anonymization operations

use crate::anonymization::models::{AnonymizedDocument, ReplacedField};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry<'a> {
    timestamp: String,
    document_id: &'a str,
    dry_run: bool,
    replacements_count: usize,
    elements_modified: usize,
    processing_time_ms: u64,
    by_category: BTreeMap<&'static str, usize>,
    fields: Vec<AuditField<'a>>,
}

/// Audit field entry (with hashed original value)
#[derive(Debug, Serialize)]
struct AuditField<'a> {
    rule: &'a str,
    tag: &'a str,
    attribute: &'a str,
    /// HMAC-SHA256 of the original value under the run's audit key
    value_hash: &'a str,
}

/// Append-only audit logger, one entry per document
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    // Serializes appends from concurrent batch workers
    write_lock: Mutex<()>,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool) -> Result<Self> {
        if let Some(parent) = log_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create audit log directory: {}", parent.display())
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            write_lock: Mutex::new(()),
        })
    }

    /// Log an anonymized document
    pub fn log_anonymization(&self, document: &AnonymizedDocument) -> Result<()> {
        let mut by_category = BTreeMap::new();
        for (category, count) in &document.stats.by_category {
            by_category.insert(category.label(), *count);
        }

        let entry = AuditLogEntry {
            timestamp: document.timestamp.to_rfc3339(),
            document_id: &document.document_id,
            dry_run: document.dry_run,
            replacements_count: document.total_replacements(),
            elements_modified: document.stats.elements_modified,
            processing_time_ms: document.processing_time_ms,
            by_category,
            fields: document.stats.fields.iter().map(audit_field).collect(),
        };

        self.write_entry(&entry)
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry<'_>) -> Result<()> {
        let line = if self.json_format {
            serde_json::to_string(entry).context("Failed to serialize audit entry")?
        } else {
            format!(
                "[{}] Document: {} | Replacements: {} | Elements: {} | Dry run: {} | Time: {}ms",
                entry.timestamp,
                entry.document_id,
                entry.replacements_count,
                entry.elements_modified,
                entry.dry_run,
                entry.processing_time_ms
            )
        };

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("Audit log lock poisoned"))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("Failed to open audit log: {}", self.log_path.display()))?;

        writeln!(file, "{line}").context("Failed to write audit entry")?;

        Ok(())
    }
}

fn audit_field(field: &ReplacedField) -> AuditField<'_> {
    AuditField {
        rule: &field.rule,
        tag: &field.tag,
        attribute: &field.attribute,
        value_hash: &field.original_hash,
    }
}
