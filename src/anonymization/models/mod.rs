//! Anonymization data models

pub mod field;

pub use field::{AnonymizationStats, AnonymizedDocument, FieldCategory, ReplacedField};
