//! Core orchestration for mismo-anon.
//!
//! # Modules
//!
//! - [`batch`] - Folder batch processing with bounded parallelism
//!
//! # Example
//!
//! ```rust,no_run
//! use mismo_anon::anonymization::AnonymizationEngine;
//! use mismo_anon::config::load_config_or_default;
//! use mismo_anon::core::batch::FolderProcessor;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default(None)?;
//! let engine = Arc::new(AnonymizationEngine::new(config.anonymization.clone())?);
//!
//! let processor = FolderProcessor::new(engine, config.batch.clone());
//! let summary = processor.process_folder(Path::new("./loans")).await?;
//!
//! println!("Processed: {}", summary.processed);
//! println!("Failed: {}", summary.failed);
//! # Ok(())
//! # }
//! ```

pub mod batch;
