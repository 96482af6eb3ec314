//! Byte spans into the parsed buffer.

use core::ops::Range;

use bstr::BStr;

/// A `(start, len)` pair of byte offsets into the original input buffer.
///
/// Spans let the tree refer to token text without copying it. A span is only
/// meaningful together with the buffer it was produced from.
///
/// # Examples
///
/// ```
/// use jsonspan::Span;
///
/// let text = br#"{"a": 12}"#;
/// let span = Span::new(6, 2);
/// assert_eq!(span.slice(text), "12");
/// assert_eq!(span.end(), 8);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Number of bytes covered.
    pub len: usize,
}

impl Span {
    /// Creates a span from a start offset and a length.
    #[must_use]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Creates a span covering `start..end`.
    #[must_use]
    pub(crate) const fn between(start: usize, end: usize) -> Self {
        Self {
            start,
            len: end - start,
        }
    }

    /// Offset one past the last byte.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    /// The span as a byte range.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Returns `true` if the span covers no bytes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrows the covered bytes from `text`.
    ///
    /// # Panics
    ///
    /// Panics if the span is out of bounds for `text`, which happens only when
    /// the span came from a different buffer.
    #[must_use]
    pub fn slice<'a>(&self, text: &'a [u8]) -> &'a BStr {
        BStr::new(&text[self.range()])
    }

    /// The span with one byte trimmed from each side.
    ///
    /// For a string token this is the text between its quotes.
    #[must_use]
    pub(crate) const fn inner(&self) -> Self {
        if self.len < 2 {
            return Self::new(self.start, 0);
        }
        Self::new(self.start + 1, self.len - 2)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.range()
    }
}
