use super::scanner::Scanner;
use crate::{
    error::{ErrorKind, ParseError},
    span::Span,
};

impl Scanner<'_> {
    /// Lexes a string token starting at the opening `"` under the cursor.
    ///
    /// Returns the span including both quotes. Escapes are validated but not
    /// decoded; see [`crate::unescape`].
    pub(crate) fn parse_string(&mut self, reject_control: bool) -> Result<Span, ParseError> {
        let start = self.pos();
        debug_assert_eq!(self.peek(), Some(b'"'));
        self.advance(1);

        loop {
            let rest = self.rest();
            let Some(n) = rest
                .iter()
                .position(|&b| b == b'"' || b == b'\\' || (reject_control && b < 0x20))
            else {
                return Err(self.eof_error());
            };
            self.advance(n);
            match rest[n] {
                b'"' => {
                    self.advance(1);
                    return Ok(Span::between(start, self.pos()));
                }
                b'\\' => self.lex_escape()?,
                _ => return Err(self.unexpected_char()),
            }
        }
    }

    /// Validates one escape sequence at the backslash under the cursor.
    fn lex_escape(&mut self) -> Result<(), ParseError> {
        let backslash = self.pos();
        let Some(body) = self.peek_at(1) else {
            return Err(self.eof_error());
        };
        match body {
            b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => {
                self.advance(2);
                Ok(())
            }
            b'u' => {
                for k in 2..6 {
                    match self.peek_at(k) {
                        None => return Err(self.eof_error()),
                        Some(d) if d.is_ascii_hexdigit() => {}
                        Some(_) => {
                            return Err(Self::error_at(ErrorKind::InvalidUnicodeEscape, backslash));
                        }
                    }
                }
                self.advance(6);
                Ok(())
            }
            _ => {
                let (ch, _) = bstr::decode_utf8(&self.rest()[1..]);
                Err(Self::error_at(
                    ErrorKind::InvalidEscape(ch.unwrap_or(char::REPLACEMENT_CHARACTER)),
                    backslash,
                ))
            }
        }
    }
}
