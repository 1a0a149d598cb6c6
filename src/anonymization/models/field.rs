//! Field category and anonymization result models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Category of PII a rule recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldCategory {
    /// First, middle, last and unparsed person names
    Name,
    /// Social Security Numbers
    Ssn,
    /// Dates of birth
    BirthDate,
    /// Age in years
    Age,
    /// Street, city, state and postal code
    Address,
    /// Creditor and requesting-party organization names
    Organization,
    /// Phone, fax and e-mail contact values
    Contact,
    /// Account identifiers
    AccountIdentifier,
    /// Lender case numbers, internal account numbers and requester user names
    InternalIdentifier,
}

impl FieldCategory {
    /// Get human-readable label for the category
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "PERSON",
            Self::Ssn => "SSN",
            Self::BirthDate => "BIRTH_DATE",
            Self::Age => "AGE",
            Self::Address => "ADDRESS",
            Self::Organization => "ORGANIZATION",
            Self::Contact => "CONTACT",
            Self::AccountIdentifier => "ACCOUNT",
            Self::InternalIdentifier => "INTERNAL_ID",
        }
    }
}

/// One attribute value replaced (or, in dry-run, matched) by a rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacedField {
    /// Rule that matched
    pub rule: String,
    /// Category of the rule
    pub category: FieldCategory,
    /// Tag of the element holding the attribute
    pub tag: String,
    /// Attribute name
    pub attribute: String,
    /// Keyed HMAC-SHA256 of the original value; plaintext is never retained
    pub original_hash: String,
    /// Substitute value, `None` in dry-run
    pub replacement: Option<String>,
}

/// Counters for a single anonymization call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnonymizationStats {
    /// Elements in the tree
    pub elements_visited: usize,
    /// Distinct elements that had at least one attribute matched
    pub elements_modified: usize,
    /// Every matched attribute, in pass order
    pub fields: Vec<ReplacedField>,
    /// Matched attributes per category
    pub by_category: HashMap<FieldCategory, usize>,
    /// Matched attributes per rule name
    pub by_rule: BTreeMap<String, usize>,
}

impl AnonymizationStats {
    /// Record one matched attribute
    pub fn record(&mut self, field: ReplacedField) {
        *self.by_category.entry(field.category).or_insert(0) += 1;
        *self.by_rule.entry(field.rule.clone()).or_insert(0) += 1;
        self.fields.push(field);
    }

    /// Total matched attributes
    pub fn total_replacements(&self) -> usize {
        self.fields.len()
    }

    /// Whether any attribute matched
    pub fn has_replacements(&self) -> bool {
        !self.fields.is_empty()
    }
}

/// Result of anonymizing one XML document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizedDocument {
    /// Caller-supplied identifier (usually the file name)
    pub document_id: String,
    /// Serialized output; the unchanged input in dry-run
    pub xml: String,
    /// What the rules matched
    pub stats: AnonymizationStats,
    /// Whether values were left untouched
    pub dry_run: bool,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Timestamp of anonymization
    pub timestamp: DateTime<Utc>,
}

impl AnonymizedDocument {
    /// Create a new anonymized document result
    pub fn new(
        document_id: String,
        xml: String,
        stats: AnonymizationStats,
        dry_run: bool,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            document_id,
            xml,
            stats,
            dry_run,
            processing_time_ms,
            timestamp: Utc::now(),
        }
    }

    /// Get total number of replaced attributes
    pub fn total_replacements(&self) -> usize {
        self.stats.total_replacements()
    }
}
