//! Recovering XML parser
//!
//! Builds a [`Document`] from XML text with quick-xml. Whitespace-only text
//! between elements is dropped; any other text is kept verbatim, padding
//! included. Markup problems that leave the element structure recoverable
//! are repaired instead of rejected:
//!
//! - a mismatched end tag closes every open element up to the one it names
//! - an end tag that names no open element is ignored
//! - elements still open at end of input are closed implicitly
//! - elements after the root has closed are dropped
//!
//! Anything the tokenizer cannot get past (unterminated markup, broken
//! attribute syntax, unknown entities) and input without a root element is a
//! [`AnonError::Validation`].

use super::node::{Attribute, Document, Element, Node};
use crate::domain::{AnonError, Result};
use quick_xml::errors::IllFormedError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parse XML text into a document tree, recovering where possible
pub fn parse_document(xml: &str) -> Result<Document> {
    if xml.trim().is_empty() {
        return Err(AnonError::Validation(
            "Error parsing XML: document is empty".to_string(),
        ));
    }

    let mut reader = Reader::from_str(xml);
    {
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
    }

    let mut builder = TreeBuilder::default();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(quick_xml::Error::IllFormed(IllFormedError::MissingEndTag(tag))) => {
                tracing::warn!(tag = %tag, "Input ended inside an open element, recovering");
                break;
            }
            Err(e) => {
                return Err(AnonError::Validation(format!(
                    "Error parsing XML at position {}: {}",
                    reader.error_position(),
                    e
                )));
            }
        };

        match event {
            Event::Start(start) => {
                let element = element_from_start(&start)?;
                builder.open(element);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                builder.attach(element);
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                builder.close(&name);
            }
            Event::Text(text) => {
                // Indentation only; the writer re-indents
                if text.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }
                let text = text.unescape().map_err(AnonError::from)?;
                builder.content(Node::Text(text.into_owned()));
            }
            Event::CData(cdata) => {
                builder.content(Node::CData(String::from_utf8_lossy(&cdata).into_owned()));
            }
            Event::Comment(comment) => {
                builder.content(Node::Comment(
                    String::from_utf8_lossy(&comment).into_owned(),
                ));
            }
            Event::PI(pi) => {
                builder.content(Node::ProcessingInstruction(
                    String::from_utf8_lossy(&pi).into_owned(),
                ));
            }
            Event::DocType(doctype) => {
                builder.content(Node::DocType(
                    String::from_utf8_lossy(&doctype).into_owned(),
                ));
            }
            Event::Eof => break,
            // The writer always emits its own UTF-8 declaration
            _ => {}
        }
    }

    builder.finish()
}

/// Parse XML text and return only the root element
pub fn parse_root(xml: &str) -> Result<Element> {
    parse_document(xml).map(|doc| doc.root)
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(tag);

    for attr in start.attributes().with_checks(false) {
        let attr = attr.map_err(|e| {
            AnonError::Validation(format!(
                "Error parsing XML: invalid attribute in <{}>: {}",
                element.tag, e
            ))
        })?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(AnonError::from)?;
        element.attributes.push(Attribute::new(name, value.into_owned()));
    }

    Ok(element)
}

/// Stack of open elements plus everything already completed
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Element>,
    prolog: Vec<Node>,
    root: Option<Element>,
    dropped_trailing: usize,
}

impl TreeBuilder {
    fn open(&mut self, element: Element) {
        self.stack.push(element);
    }

    fn attach(&mut self, element: Element) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(Node::Element(element));
        } else if self.root.is_none() {
            self.root = Some(element);
        } else {
            self.dropped_trailing += 1;
        }
    }

    fn content(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        } else if self.root.is_none() {
            // Text before the root is not well-formed; keep markup only
            if !matches!(node, Node::Text(_) | Node::CData(_)) {
                self.prolog.push(node);
            }
        }
    }

    fn close(&mut self, name: &str) {
        let Some(position) = self.stack.iter().rposition(|e| e.tag == name) else {
            tracing::warn!(tag = %name, "Ignoring end tag with no matching open element");
            return;
        };

        let unclosed = self.stack.len() - position - 1;
        if unclosed > 0 {
            tracing::warn!(
                tag = %name,
                unclosed,
                "Mismatched end tag, closing inner elements"
            );
        }

        while self.stack.len() > position {
            if let Some(element) = self.stack.pop() {
                self.attach(element);
            }
        }
    }

    fn finish(mut self) -> Result<Document> {
        if !self.stack.is_empty() {
            tracing::warn!(
                unclosed = self.stack.len(),
                "Input ended with open elements, closing them"
            );
            while let Some(element) = self.stack.pop() {
                self.attach(element);
            }
        }

        if self.dropped_trailing > 0 {
            tracing::warn!(
                dropped = self.dropped_trailing,
                "Dropped elements found after the root element"
            );
        }

        let root = self.root.ok_or_else(|| {
            AnonError::Validation("Error parsing XML: no root element found".to_string())
        })?;

        Ok(Document {
            prolog: self.prolog,
            root,
        })
    }
}
