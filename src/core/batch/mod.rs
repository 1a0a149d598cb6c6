//! Folder batch processing
//!
//! This module handles anonymizing a whole folder of XML files into an
//! output subfolder, with per-file failure isolation.

pub mod processor;
pub mod summary;

pub use processor::{collect_xml_files, FolderProcessor};
pub use summary::{BatchStatus, BatchSummary, FileError, ProcessedFile};
