// mismo-anon - MISMO Loan Document Anonymizer
// Copyright (c) 2025 mismo-anon Contributors
// Licensed under the MIT License

//! # mismo-anon - MISMO Loan Document Anonymizer
//!
//! mismo-anon replaces personally identifiable information in MISMO loan
//! document XML with synthetic, well-formed substitutes. Document shape is
//! preserved so validators, fixtures and demos built on the originals keep
//! working.
//!
//! ## Overview
//!
//! - **Parsing** loan XML with best-effort recovery from malformed markup
//! - **Anonymizing** names, SSNs, birth dates, addresses, organizations,
//!   contact points and identifiers through a data-driven rule table
//! - **Serializing** the result as indented XML with a declaration
//! - **Batch processing** whole folders into an output subfolder
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Folder batch orchestration
//! - [`anonymization`] - Rule table, generators, engine and audit log
//! - [`document`] - XML tree, parser and writer
//! - [`domain`] - Error and result types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mismo_anon::anonymization::{AnonymizationConfig, AnonymizationEngine};
//! use mismo_anon::document::{parse_document, write_document};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default())?;
//!
//! let mut document = parse_document(
//!     r#"<LOAN><BORROWER _FirstName="Ann" _LastName="Lee" _SSN="123456789"/></LOAN>"#,
//! )?;
//! engine.anonymize(&mut document.root);
//!
//! println!("{}", write_document(&document)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::AnonError`]. Input that cannot be
//! parsed is a `Validation` error; anything else is reported with its
//! original message:
//!
//! ```rust
//! use mismo_anon::anonymization::{AnonymizationConfig, AnonymizationEngine};
//!
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default()).unwrap();
//! let err = engine.anonymize_xml("empty.xml", "").unwrap_err();
//! assert!(err.is_validation());
//! ```

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod core;
pub mod document;
pub mod domain;
pub mod logging;
