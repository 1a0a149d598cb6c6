//! Audit logging for anonymization operations
//!
//! Records what was replaced in each document without ever writing the
//! original values; only keyed HMAC-SHA256 digests reach the log.

pub mod hasher;
pub mod logger;

pub use hasher::ValueHasher;
pub use logger::AuditLogger;
