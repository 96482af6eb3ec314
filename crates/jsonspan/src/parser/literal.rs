use super::scanner::Scanner;
use crate::error::{ErrorKind, ParseError};

const TRUE: &str = "true";
const FALSE: &str = "false";
const NULL: &str = "null";

impl Scanner<'_> {
    /// Lexes `true` or `false` at the cursor and returns the decoded bit.
    pub(crate) fn parse_boolean(&mut self) -> Result<bool, ParseError> {
        if self.peek() == Some(b't') {
            self.expect_literal(TRUE)?;
            Ok(true)
        } else {
            self.expect_literal(FALSE)?;
            Ok(false)
        }
    }

    /// Lexes `null` at the cursor.
    pub(crate) fn parse_null(&mut self) -> Result<(), ParseError> {
        self.expect_literal(NULL)
    }

    /// Consumes `literal` or fails without moving the cursor.
    ///
    /// A buffer that ends while everything read so far still matches is
    /// reported as `UnexpectedEndOfInput`; any mismatching byte as
    /// `ExpectedLiteral` at the literal's first byte.
    fn expect_literal(&mut self, literal: &'static str) -> Result<(), ParseError> {
        let rest = self.rest();
        let expected = literal.as_bytes();
        if rest.starts_with(expected) {
            self.advance(expected.len());
            return Ok(());
        }
        if expected.starts_with(rest) {
            return Err(self.eof_error());
        }
        Err(self.error(ErrorKind::ExpectedLiteral(literal)))
    }
}
