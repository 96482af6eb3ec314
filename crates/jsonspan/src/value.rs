//! JSON value tree.
//!
//! This module defines the [`JsonValue`] enum. Scalars carry only a [`Span`]
//! into the parsed buffer (plus the decoded bit for booleans); the text is
//! materialized on demand through [`JsonValue::raw`], [`JsonValue::as_str`]
//! and [`JsonValue::as_number`]. Containers own their children.
use alloc::{borrow::Cow, string::String, vec, vec::Vec};
use core::{fmt, mem};

use bstr::BStr;

use crate::{error::ParseError, parser::NumberLexeme, span::Span, unescape::unescape};

/// A JSON value as defined by [RFC 8259], holding spans instead of text.
///
/// Every variant carries the span of its full textual extent: string spans
/// include the quotes, container spans run from the opening to the closing
/// delimiter inclusive.
///
/// Dropping and comparing values walk the subtree iteratively, so they are
/// safe on trees of any depth. The derived `Clone` and `Debug` implementations
/// and the `serde` derives recurse and are meant for trees of ordinary depth.
///
/// # Examples
///
/// ```
/// use jsonspan::JsonValue;
///
/// let text = br#"{"name": "jsonspan", "tags": ["json", "spans"]}"#;
/// let root = jsonspan::parse(text).unwrap();
///
/// let name = root.get("name").unwrap();
/// assert_eq!(name.raw(text), r#""jsonspan""#);
/// assert_eq!(name.as_str(text).unwrap().unwrap(), "jsonspan");
/// assert_eq!(root.get("tags").map(JsonValue::len), Some(2));
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug)]
pub enum JsonValue {
    /// `null`.
    Null {
        /// Span of the literal.
        span: Span,
    },
    /// `true` or `false`.
    Boolean {
        /// The decoded bit.
        value: bool,
        /// Span of the literal.
        span: Span,
    },
    /// A number, validated but not converted.
    Number {
        /// Span of the number token.
        span: Span,
    },
    /// A string, validated but not decoded.
    String {
        /// Span of the token, quotes included.
        span: Span,
    },
    /// An array.
    Array {
        /// Elements in document order.
        items: Vec<JsonValue>,
        /// Span from `[` to `]` inclusive.
        span: Span,
    },
    /// An object.
    Object {
        /// Members in document order, keys decoded and unique.
        entries: Vec<(String, JsonValue)>,
        /// Span from `{` to `}` inclusive.
        span: Span,
    },
}

/// The six kinds of JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `null`.
    Null,
    /// `true` or `false`.
    Boolean,
    /// A number.
    Number,
    /// A string.
    String,
    /// An array.
    Array,
    /// An object.
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        })
    }
}

impl JsonValue {
    /// The span of this value's full textual extent.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Null { span }
            | Self::Boolean { span, .. }
            | Self::Number { span }
            | Self::String { span }
            | Self::Array { span, .. }
            | Self::Object { span, .. } => *span,
        }
    }

    /// Which of the six JSON kinds this is.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null { .. } => ValueKind::Null,
            Self::Boolean { .. } => ValueKind::Boolean,
            Self::Number { .. } => ValueKind::Number,
            Self::String { .. } => ValueKind::String,
            Self::Array { .. } => ValueKind::Array,
            Self::Object { .. } => ValueKind::Object,
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: JsonValue::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null { .. })
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: JsonValue::Boolean
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean { .. })
    }

    /// Returns `true` if the value is [`Number`].
    ///
    /// [`Number`]: JsonValue::Number
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number { .. })
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: JsonValue::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String { .. })
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: JsonValue::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array { .. })
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: JsonValue::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object { .. })
    }

    /// The decoded bit of a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// The elements of an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            Self::Array { items, .. } => Some(items),
            _ => None,
        }
    }

    /// The members of an object, in document order.
    #[must_use]
    pub fn as_object(&self) -> Option<&[(String, JsonValue)]> {
        match self {
            Self::Object { entries, .. } => Some(entries),
            _ => None,
        }
    }

    /// Looks up an object member by decoded key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object()?
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Looks up an array element by position.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&JsonValue> {
        self.as_array()?.get(index)
    }

    /// Number of children: elements of an array, members of an object, zero
    /// for scalars.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Array { items, .. } => items.len(),
            Self::Object { entries, .. } => entries.len(),
            _ => 0,
        }
    }

    /// Returns `true` if the value has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value's text, borrowed from `text`, which must be the parsed buffer.
    ///
    /// # Panics
    ///
    /// Panics if `text` is shorter than the buffer the value was parsed from.
    #[must_use]
    pub fn raw<'a>(&self, text: &'a [u8]) -> &'a BStr {
        self.span().slice(text)
    }

    /// Decodes a string value from `text`, which must be the parsed buffer.
    ///
    /// Returns `Ok(None)` for non-strings. The result borrows from `text`
    /// when the string contains no escapes.
    ///
    /// # Errors
    ///
    /// `InvalidUtf8` if the string's bytes are not UTF-8.
    ///
    /// # Panics
    ///
    /// Panics if `text` is shorter than the buffer the value was parsed from.
    pub fn as_str<'a>(&self, text: &'a [u8]) -> Result<Option<Cow<'a, str>>, ParseError> {
        let Self::String { span } = self else {
            return Ok(None);
        };
        let inner = span.inner();
        unescape(&text[inner.range()], inner.start).map(Some)
    }

    /// The text of a number value from `text`, which must be the parsed
    /// buffer, classified as integer or float.
    ///
    /// # Panics
    ///
    /// Panics if `text` is shorter than the buffer the value was parsed from.
    #[must_use]
    pub fn as_number<'a>(&self, text: &'a [u8]) -> Option<NumberLexeme<'a>> {
        let Self::Number { span } = self else {
            return None;
        };
        let raw = core::str::from_utf8(&text[span.range()]).ok()?;
        Some(NumberLexeme::classify(raw))
    }

    /// Moves this value's children onto `out`, leaving it childless.
    fn take_children(&mut self, out: &mut Vec<JsonValue>) {
        match self {
            Self::Array { items, .. } => out.append(items),
            Self::Object { entries, .. } => {
                out.extend(mem::take(entries).into_iter().map(|(_, v)| v));
            }
            _ => {}
        }
    }
}

impl PartialEq for JsonValue {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.kind() != b.kind() || a.span() != b.span() || a.as_bool() != b.as_bool() {
                return false;
            }
            match (a, b) {
                (Self::Array { items: x, .. }, Self::Array { items: y, .. }) => {
                    if x.len() != y.len() {
                        return false;
                    }
                    pending.extend(x.iter().zip(y));
                }
                (Self::Object { entries: x, .. }, Self::Object { entries: y, .. }) => {
                    if x.len() != y.len() {
                        return false;
                    }
                    for ((ka, va), (kb, vb)) in x.iter().zip(y) {
                        if ka != kb {
                            return false;
                        }
                        pending.push((va, vb));
                    }
                }
                _ => {}
            }
        }
        true
    }
}

impl Eq for JsonValue {}

impl Drop for JsonValue {
    fn drop(&mut self) {
        if self.is_empty() {
            return;
        }
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut value) = pending.pop() {
            value.take_children(&mut pending);
        }
    }
}
