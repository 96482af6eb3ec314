//! A validating JSON parser that builds a value tree of byte spans.
//!
//! [`parse`] checks a complete buffer against the JSON grammar and returns a
//! [`JsonValue`] tree. Scalars keep only their [`Span`] into the buffer and
//! are decoded on demand, so parsing never copies string or number text
//! except for object keys. Containers are assembled by an explicit stack
//! rather than recursion: nesting depth is bounded by memory, not by the call
//! stack.
//!
//! ```rust
//! use jsonspan::{Document, ErrorKind};
//!
//! let doc = Document::parse(br#"{"a": 1, "b": [1, 2, 3]}"#).unwrap();
//! assert_eq!(doc.raw(doc.pointer("/b/2").unwrap()), "3");
//!
//! let err = jsonspan::parse(br#"{"a": 1, "a": 2}"#).unwrap_err();
//! assert_eq!(err.kind(), &ErrorKind::DuplicateKey("a".into()));
//! assert_eq!(err.offset(), 9);
//! ```
//!
//! `\uXXXX` escapes decode to one code point each; surrogate pairs are not
//! combined. See [`unescape()`].

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod document;
mod error;
mod options;
mod parser;
mod path;
mod span;
mod unescape;
mod value;

#[cfg(test)]
mod tests;

pub use document::Document;
pub use error::{ErrorKind, ParseError};
pub use options::ParserOptions;
pub use parser::NumberLexeme;
pub use path::PathItem;
pub use span::Span;
pub use unescape::unescape;
pub use value::{JsonValue, ValueKind};

use log::debug;

/// Parses a complete JSON text with default options.
///
/// The returned tree's spans index into `text`; keep the buffer around (or
/// use [`Document`]) to read scalar contents.
///
/// # Errors
///
/// The first grammar violation, with the byte offset where it was detected.
pub fn parse(text: &[u8]) -> Result<JsonValue, ParseError> {
    parse_with_options(text, ParserOptions::default())
}

/// Parses a complete JSON text with the given options.
///
/// # Errors
///
/// The first grammar violation, with the byte offset where it was detected.
pub fn parse_with_options(text: &[u8], options: ParserOptions) -> Result<JsonValue, ParseError> {
    parser::TreeBuilder::new(text, options)
        .build()
        .inspect(|root| debug!("parsed {} from {} bytes", root.kind(), text.len()))
        .inspect_err(|err| debug!("parse failed: {err}"))
}
