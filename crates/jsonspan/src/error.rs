use alloc::string::String;

use thiserror::Error;

/// A failed parse: what went wrong and the byte offset where it was detected.
///
/// No partial tree is ever returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    pub(crate) kind: ErrorKind,
    pub(crate) offset: usize,
}

/// The flat taxonomy of parse failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The buffer ended mid-token or mid-container, or held no value at all.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A character outside the set the grammar allows at this position.
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    /// Non-whitespace content after a complete root value.
    #[error("unexpected trailing content")]
    UnexpectedTrailingContent,
    /// A `,` was required between container members.
    #[error("expected ','")]
    ExpectedComma,
    /// A `:` was required after an object key.
    #[error("expected ':'")]
    ExpectedColon,
    /// An escape body other than `" \ / b f n r t u`.
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    /// A `\u` escape not followed by four hexadecimal digits.
    #[error("invalid unicode escape sequence")]
    InvalidUnicodeEscape,
    /// A numeric token that violates the JSON number grammar.
    #[error("invalid number")]
    InvalidNumber,
    /// An object key repeated within the same object.
    #[error("duplicate key {0:?}")]
    DuplicateKey(String),
    /// `true`, `false` or `null` was started but not matched exactly.
    #[error("expected literal '{0}'")]
    ExpectedLiteral(&'static str),
    /// String contents that are not valid UTF-8.
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    /// Container nesting deeper than the configured maximum.
    #[error("nesting depth exceeds {0}")]
    DepthLimitExceeded(usize),
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Byte offset into the input at which the problem was detected.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Converts the offset into a 1-based `(line, column)` pair for `text`,
    /// which must be the buffer that was parsed.
    ///
    /// Columns count characters, not bytes. Offsets past the end of `text`
    /// clamp to its end.
    ///
    /// ```
    /// let text = b"[1,\n  2,,]";
    /// let err = jsonspan::parse(text).unwrap_err();
    /// assert_eq!(err.line_column(text), (2, 5));
    /// ```
    #[must_use]
    pub fn line_column(&self, text: &[u8]) -> (usize, usize) {
        let prefix = &text[..self.offset.min(text.len())];
        let line_start = prefix
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |nl| nl + 1);
        let line = 1 + prefix.iter().filter(|&&b| b == b'\n').count();
        let column = 1 + bstr::ByteSlice::chars(&prefix[line_start..]).count();
        (line, column)
    }
}
