//! Anonymization of MISMO loan documents
//!
//! Replaces personally identifiable attribute values with synthetic but
//! well-formed substitutes, leaving the document shape untouched.
//!
//! # Architecture
//!
//! - **Rules**: a data-driven table of field recognition rules
//! - **Generators**: static value pools and format generators
//! - **Engine**: one pre-order pass per rule over the tree
//! - **Audit**: JSON-lines log with hashed original values
//!
//! # Usage
//!
//! ```rust,ignore
//! use mismo_anon::anonymization::{AnonymizationEngine, AnonymizationConfig};
//! use mismo_anon::document::parse_root;
//!
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//! let mut root = parse_root(xml)?;
//! engine.anonymize(&mut root);
//! ```

pub mod audit;
pub mod config;
pub mod engine;
pub mod generators;
pub mod models;
pub mod report;
pub mod rules;

// Re-export main types
pub use config::AnonymizationConfig;
pub use engine::AnonymizationEngine;
pub use models::{AnonymizationStats, AnonymizedDocument, FieldCategory, ReplacedField};
pub use report::DryRunReport;
pub use rules::{FieldRule, RuleOptions, RuleSet};
