use alloc::borrow::Cow;

use bstr::BStr;

use crate::{
    error::ParseError, options::ParserOptions, parse_with_options, parser::NumberLexeme,
    value::JsonValue,
};

/// A parsed tree together with the buffer its spans point into.
///
/// The tree itself stores offsets only; `Document` keeps the borrow of the
/// input alive for as long as the spans are read, so accessors do not need
/// the buffer passed in again.
///
/// Dropping and comparing are iterative, as for [`JsonValue`]; `Clone` and
/// `Debug` recurse, so avoid them on documents nested tens of thousands of
/// levels deep.
///
/// # Examples
///
/// ```
/// use jsonspan::{Document, NumberLexeme};
///
/// let doc = Document::parse(br#"{"id": 7, "tag": "x\ty"}"#).unwrap();
/// let id = doc.pointer("/id").unwrap();
/// assert_eq!(doc.number(id), Some(NumberLexeme::Integer("7")));
/// assert_eq!(doc.str(doc.pointer("/tag").unwrap()).unwrap().unwrap(), "x\ty");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'src> {
    text: &'src [u8],
    root: JsonValue,
}

impl<'src> Document<'src> {
    /// Parses `text` with default options.
    ///
    /// # Errors
    ///
    /// Any [`ParseError`] from [`crate::parse`].
    pub fn parse(text: &'src [u8]) -> Result<Self, ParseError> {
        Self::parse_with_options(text, ParserOptions::default())
    }

    /// Parses `text` with the given options.
    ///
    /// # Errors
    ///
    /// Any [`ParseError`] from [`crate::parse_with_options`].
    pub fn parse_with_options(
        text: &'src [u8],
        options: ParserOptions,
    ) -> Result<Self, ParseError> {
        let root = parse_with_options(text, options)?;
        Ok(Self { text, root })
    }

    /// The parsed buffer.
    #[must_use]
    pub fn text(&self) -> &'src [u8] {
        self.text
    }

    /// The root value.
    #[must_use]
    pub fn root(&self) -> &JsonValue {
        &self.root
    }

    /// Releases the tree, ending the borrow of the buffer.
    #[must_use]
    pub fn into_root(self) -> JsonValue {
        self.root
    }

    /// Looks up a value by JSON Pointer from the root.
    #[must_use]
    pub fn pointer(&self, pointer: &str) -> Option<&JsonValue> {
        self.root.pointer(pointer)
    }

    /// The text of `value`, which must belong to this document.
    #[must_use]
    pub fn raw(&self, value: &JsonValue) -> &'src BStr {
        value.raw(self.text)
    }

    /// The decoded contents of a string `value`; `Ok(None)` for non-strings.
    ///
    /// # Errors
    ///
    /// `InvalidUtf8` if the string's bytes are not UTF-8.
    pub fn str(&self, value: &JsonValue) -> Result<Option<Cow<'src, str>>, ParseError> {
        value.as_str(self.text)
    }

    /// The classified text of a number `value`.
    #[must_use]
    pub fn number(&self, value: &JsonValue) -> Option<NumberLexeme<'src>> {
        value.as_number(self.text)
    }
}
