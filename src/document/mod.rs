//! XML document capability
//!
//! Parse-with-recovery, attribute access, pre-order traversal and
//! pretty-printed serialization for MISMO documents. The anonymization engine
//! only ever sees the [`Element`] tree defined here.
//!
//! ```rust
//! use mismo_anon::document::{parse_document, write_document};
//!
//! # fn example() -> mismo_anon::domain::Result<()> {
//! let mut doc = parse_document(r#"<LOAN _SSN="123456789"/>"#)?;
//! doc.root.set_attribute("_SSN", "000000000");
//! let xml = write_document(&doc)?;
//! assert!(xml.contains(r#"_SSN="000000000""#));
//! # Ok(())
//! # }
//! ```

pub mod node;
pub mod parser;
pub mod writer;

pub use node::{Attribute, Document, Element, Node};
pub use parser::{parse_document, parse_root};
pub use writer::{write_document, write_root};
