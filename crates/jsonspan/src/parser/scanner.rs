//! Scanner: the cursor over the input buffer.
//!
//! Owns the read position and the bounds-checked primitives every lexer
//! builds on. Lexers live in sibling modules as further `impl` blocks on
//! [`Scanner`], so they share the cursor without passing `(text, pos)` pairs
//! around.
//!
//! Invariants
//! - `pos <= text.len()` at all times.
//! - A read past the end never panics; it surfaces as
//!   [`ErrorKind::UnexpectedEndOfInput`] reported at `text.len()`.

use crate::error::{ErrorKind, ParseError};

#[derive(Debug, Clone)]
pub(crate) struct Scanner<'src> {
    text: &'src [u8],
    pos: usize,
}

impl<'src> Scanner<'src> {
    pub(crate) fn new(text: &'src [u8]) -> Self {
        Self { text, pos: 0 }
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    #[inline]
    pub(crate) fn text(&self) -> &'src [u8] {
        self.text
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// The byte under the cursor, if any.
    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.text.get(self.pos).copied()
    }

    /// The byte `n` positions past the cursor, if any.
    #[inline]
    pub(crate) fn peek_at(&self, n: usize) -> Option<u8> {
        self.text.get(self.pos + n).copied()
    }

    /// The byte under the cursor, or `UnexpectedEndOfInput`.
    #[inline]
    pub(crate) fn require(&self) -> Result<u8, ParseError> {
        self.peek().ok_or_else(|| self.eof_error())
    }

    /// Moves the cursor forward, clamped to the end of the buffer.
    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.text.len());
    }

    /// Everything from the cursor to the end of the buffer.
    #[inline]
    pub(crate) fn rest(&self) -> &'src [u8] {
        &self.text[self.pos..]
    }

    /// Skips JSON whitespace: space, tab, line feed and carriage return.
    #[inline]
    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.pos += 1;
        }
    }

    /// Consumes `byte` if it is under the cursor.
    #[inline]
    pub(crate) fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn error_at(kind: ErrorKind, offset: usize) -> ParseError {
        ParseError::new(kind, offset)
    }

    pub(crate) fn error(&self, kind: ErrorKind) -> ParseError {
        Self::error_at(kind, self.pos)
    }

    pub(crate) fn eof_error(&self) -> ParseError {
        Self::error_at(ErrorKind::UnexpectedEndOfInput, self.text.len())
    }

    /// `UnexpectedCharacter` for whatever sits under the cursor.
    ///
    /// Multi-byte UTF-8 sequences are reported as the character they encode;
    /// bytes that do not start a valid sequence are reported as U+FFFD.
    pub(crate) fn unexpected_char(&self) -> ParseError {
        if self.is_eof() {
            return self.eof_error();
        }
        let (ch, _) = bstr::decode_utf8(self.rest());
        self.error(ErrorKind::UnexpectedCharacter(
            ch.unwrap_or(char::REPLACEMENT_CHARACTER),
        ))
    }
}
