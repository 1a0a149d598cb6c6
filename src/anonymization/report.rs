//! Dry-run reporting for anonymization
//!
//! Summarizes which rules would fire across a set of documents, without
//! showing any original value.

use crate::anonymization::models::{AnonymizedDocument, FieldCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of samples kept in a report
const MAX_SAMPLES: usize = 20;

/// Samples taken from each document
const SAMPLES_PER_DOCUMENT: usize = 3;

/// Dry-run report with replacement statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DryRunReport {
    /// Total documents analyzed
    pub total_documents: usize,

    /// Total attribute values matched
    pub total_replacements: usize,

    /// Matches by category
    pub replacements_by_category: BTreeMap<FieldCategory, usize>,

    /// Matches by rule name
    pub replacements_by_rule: BTreeMap<String, usize>,

    /// Sample locations (where a rule fired, never the value)
    pub samples: Vec<ReplacementSample>,

    /// Warnings, e.g. documents that failed to parse
    pub warnings: Vec<String>,

    /// Processing statistics
    pub stats: ProcessingStats,
}

/// Where a rule matched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacementSample {
    /// Document identifier
    pub document_id: String,

    /// Rule name
    pub rule: String,

    /// Field category
    pub category: FieldCategory,

    /// Element tag
    pub tag: String,

    /// Attribute name
    pub attribute: String,
}

/// Processing statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessingStats {
    /// Average processing time per document (ms)
    pub avg_processing_time_ms: u64,

    /// Total processing time (ms)
    pub total_processing_time_ms: u64,

    /// Documents with at least one match
    pub documents_with_pii: usize,

    /// Documents with no match
    pub documents_without_pii: usize,
}

impl DryRunReport {
    /// Create a new empty dry-run report
    pub fn new() -> Self {
        Self {
            total_documents: 0,
            total_replacements: 0,
            replacements_by_category: BTreeMap::new(),
            replacements_by_rule: BTreeMap::new(),
            samples: Vec::new(),
            warnings: Vec::new(),
            stats: ProcessingStats::default(),
        }
    }

    /// Add results from one document
    pub fn add_document(&mut self, document: &AnonymizedDocument) {
        self.total_documents += 1;
        self.stats.total_processing_time_ms += document.processing_time_ms;

        let stats = &document.stats;
        if stats.has_replacements() {
            self.stats.documents_with_pii += 1;
            self.total_replacements += stats.total_replacements();

            for (category, count) in &stats.by_category {
                *self.replacements_by_category.entry(*category).or_insert(0) += count;
            }
            for (rule, count) in &stats.by_rule {
                *self.replacements_by_rule.entry(rule.clone()).or_insert(0) += count;
            }

            for field in stats.fields.iter().take(SAMPLES_PER_DOCUMENT) {
                if self.samples.len() >= MAX_SAMPLES {
                    break;
                }
                self.samples.push(ReplacementSample {
                    document_id: document.document_id.clone(),
                    rule: field.rule.clone(),
                    category: field.category,
                    tag: field.tag.clone(),
                    attribute: field.attribute.clone(),
                });
            }
        } else {
            self.stats.documents_without_pii += 1;
        }

        self.stats.avg_processing_time_ms =
            self.stats.total_processing_time_ms / self.total_documents as u64;
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();
        let rule = "───────────────────────────────────────────────────────────────\n";
        let banner = "═══════════════════════════════════════════════════════════════\n";

        output.push('\n');
        output.push_str(banner);
        output.push_str("                 ANONYMIZATION DRY-RUN REPORT                  \n");
        output.push_str(banner);
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str(rule);
        output.push_str(&format!(
            "  Total Documents Analyzed:    {}\n",
            self.total_documents
        ));
        output.push_str(&format!(
            "  Documents with PII:          {}\n",
            self.stats.documents_with_pii
        ));
        output.push_str(&format!(
            "  Documents without PII:       {}\n",
            self.stats.documents_without_pii
        ));
        output.push_str(&format!(
            "  Total Values To Replace:     {}\n",
            self.total_replacements
        ));
        output.push_str(&format!(
            "  Avg Processing Time:         {} ms\n",
            self.stats.avg_processing_time_ms
        ));
        output.push('\n');

        if !self.replacements_by_category.is_empty() {
            output.push_str("🔍 MATCHES BY CATEGORY\n");
            output.push_str(rule);

            let mut categories: Vec<_> = self.replacements_by_category.iter().collect();
            categories.sort_by(|a, b| b.1.cmp(a.1));

            for (category, count) in categories {
                output.push_str(&format!("  {:30} {:>5}\n", category.label(), count));
            }
            output.push('\n');
        }

        if !self.samples.is_empty() {
            output.push_str("📝 SAMPLE MATCHES\n");
            output.push_str(rule);

            for (i, sample) in self.samples.iter().take(10).enumerate() {
                output.push_str(&format!("\n  Sample #{}\n", i + 1));
                output.push_str(&format!("    Document:   {}\n", sample.document_id));
                output.push_str(&format!("    Rule:       {}\n", sample.rule));
                output.push_str(&format!("    Category:   {}\n", sample.category.label()));
                output.push_str(&format!(
                    "    Field:      {}@{}\n",
                    sample.tag, sample.attribute
                ));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str(rule);
            for warning in &self.warnings {
                output.push_str(&format!("  • {}\n", warning));
            }
            output.push('\n');
        }

        output.push_str(banner);
        output.push('\n');

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for DryRunReport {
    fn default() -> Self {
        Self::new()
    }
}
