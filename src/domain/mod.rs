//! Domain types shared across the anonymizer.
//!
//! - **Error type** ([`AnonError`])
//! - **Result type alias** ([`Result`])
//!
//! ```rust
//! use mismo_anon::domain::{AnonError, Result};
//!
//! fn example(payload: &str) -> Result<()> {
//!     if payload.trim().is_empty() {
//!         return Err(AnonError::Validation("empty payload".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;

pub use errors::AnonError;
pub use result::Result;
