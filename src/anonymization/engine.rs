//! Main anonymization engine
//!
//! This module provides the [`AnonymizationEngine`] that applies the field
//! rule table to MISMO loan document trees.
//!
//! # Architecture
//!
//! The engine coordinates three components:
//! - **Rules**: an ordered [`RuleSet`] recognizing PII-bearing elements
//! - **Generators**: pool-backed substitute values, drawn per element
//! - **Audit Logger**: records replacements with hashed original values
//!
//! Every rule is a separate pre-order pass over the whole tree. Passes key
//! off disjoint attributes, so their order does not change the result shape.
//!
//! # Examples
//!
//! ```no_run
//! use mismo_anon::anonymization::{AnonymizationEngine, AnonymizationConfig};
//!
//! # fn example() -> anyhow::Result<()> {
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//! let result = engine.anonymize_xml(
//!     "loan.xml",
//!     r#"<LOAN><BORROWER _FirstName="Ann" _LastName="Lee" _SSN="123456789"/></LOAN>"#,
//! )?;
//! println!("Replaced {} values", result.total_replacements());
//! # Ok(())
//! # }
//! ```

use crate::anonymization::{
    audit::{AuditLogger, ValueHasher},
    config::AnonymizationConfig,
    models::{AnonymizationStats, AnonymizedDocument, ReplacedField},
    rules::{FieldRule, RuleSet},
};
use crate::document::{parse_document, write_document, Element};
use crate::domain::{AnonError, Result as AnonResult};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rand::Rng;
use std::collections::HashSet;
use std::time::Instant;

/// Main anonymization engine
///
/// Holds no per-document state: the rule table and pools are immutable, so
/// one engine can be shared across threads behind an `Arc`.
pub struct AnonymizationEngine {
    config: AnonymizationConfig,
    rules: RuleSet,
    hasher: ValueHasher,
    audit_logger: Option<AuditLogger>,
}

impl AnonymizationEngine {
    /// Create a new anonymization engine with the standard rule table
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the audit log
    /// cannot be prepared.
    pub fn new(config: AnonymizationConfig) -> Result<Self> {
        let rules = RuleSet::standard(&config.rule_options());
        Self::with_rules(config, rules)
    }

    /// Create an engine with an explicit rule table
    pub fn with_rules(config: AnonymizationConfig, rules: RuleSet) -> Result<Self> {
        config
            .validate()
            .context("Invalid anonymization configuration")?;

        let hasher = ValueHasher::from_config(&config.audit)?;

        let audit_logger = if config.audit.enabled {
            Some(AuditLogger::new(
                config.audit.log_path.clone(),
                config.audit.json_format,
            )?)
        } else {
            None
        };

        Ok(Self {
            config,
            rules,
            hasher,
            audit_logger,
        })
    }

    /// Anonymize a tree in place and return the same root
    ///
    /// Uses the thread-local RNG and today's local date. Values are not
    /// reproducible between calls.
    pub fn anonymize<'a>(&self, root: &'a mut Element) -> &'a mut Element {
        self.anonymize_document(root);
        root
    }

    /// Anonymize a tree in place and report what was replaced
    pub fn anonymize_document(&self, root: &mut Element) -> AnonymizationStats {
        let mut rng = rand::thread_rng();
        self.anonymize_with_rng(root, &mut rng, Local::now().date_naive())
    }

    /// Run every rule over the tree with the given RNG and reference date
    pub fn anonymize_with_rng<R: Rng + ?Sized>(
        &self,
        root: &mut Element,
        rng: &mut R,
        today: NaiveDate,
    ) -> AnonymizationStats {
        let mut stats = AnonymizationStats {
            elements_visited: root.element_count(),
            ..Default::default()
        };
        let mut modified = HashSet::new();

        for rule in self.rules.rules() {
            let mut position = 0usize;
            root.walk_mut(&mut |element: &mut Element| {
                let index = position;
                position += 1;

                if !rule.matches(element) {
                    return;
                }

                let changes = rule.apply(element, &mut *rng, today);
                if !changes.is_empty() {
                    modified.insert(index);
                }
                for change in changes {
                    stats.record(replaced_field(
                        &self.hasher,
                        rule,
                        &element.tag,
                        change.attribute,
                        &change.previous,
                        Some(change.value),
                    ));
                }
            });
        }

        stats.elements_modified = modified.len();
        stats
    }

    /// Count what the rules would replace without touching the tree
    pub fn scan(&self, root: &Element) -> AnonymizationStats {
        let mut stats = AnonymizationStats {
            elements_visited: root.element_count(),
            ..Default::default()
        };
        let mut modified = HashSet::new();

        for rule in self.rules.rules() {
            let mut position = 0usize;
            root.walk(&mut |element: &Element| {
                let index = position;
                position += 1;

                if !rule.matches(element) {
                    return;
                }

                let targets = rule.target_attributes(element);
                if !targets.is_empty() {
                    modified.insert(index);
                }
                for (attribute, value) in targets {
                    stats.record(replaced_field(
                        &self.hasher,
                        rule,
                        &element.tag,
                        attribute,
                        value,
                        None,
                    ));
                }
            });
        }

        stats.elements_modified = modified.len();
        stats
    }

    /// Parse, anonymize and serialize one XML document
    ///
    /// In dry-run mode the input text is returned unchanged and the stats
    /// describe what would have been replaced.
    ///
    /// # Errors
    ///
    /// - [`AnonError::Validation`] if the text cannot be parsed into a tree
    /// - [`AnonError::Unexpected`] if serialization or audit logging fails
    pub fn anonymize_xml(&self, document_id: &str, xml: &str) -> AnonResult<AnonymizedDocument> {
        let start = Instant::now();

        let mut document = parse_document(xml)?;

        let (output, stats) = if self.config.dry_run {
            let stats = self.scan(&document.root);
            (xml.to_string(), stats)
        } else {
            let stats = self.anonymize_document(&mut document.root);
            (write_document(&document)?, stats)
        };

        let processing_time = start.elapsed().as_millis() as u64;

        let result = AnonymizedDocument::new(
            document_id.to_string(),
            output,
            stats,
            self.config.dry_run,
            processing_time,
        );

        tracing::debug!(
            document_id = %document_id,
            replacements = result.total_replacements(),
            elements_modified = result.stats.elements_modified,
            dry_run = result.dry_run,
            duration_ms = processing_time,
            "Document anonymized"
        );

        if let Some(ref logger) = self.audit_logger {
            logger
                .log_anonymization(&result)
                .map_err(|e| AnonError::Unexpected(format!("Failed to write audit log: {e:#}")))?;
        }

        Ok(result)
    }

    /// Active rule table
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Keyed hasher used for `original_hash` values
    pub fn value_hasher(&self) -> &ValueHasher {
        &self.hasher
    }

    /// Check if in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.config.dry_run
    }
}

fn replaced_field(
    hasher: &ValueHasher,
    rule: &FieldRule,
    tag: &str,
    attribute: &str,
    original: &str,
    replacement: Option<String>,
) -> ReplacedField {
    ReplacedField {
        rule: rule.name.to_string(),
        category: rule.category,
        tag: tag.to_string(),
        attribute: attribute.to_string(),
        original_hash: hasher.hash(original),
        replacement,
    }
}
