use super::scanner::Scanner;
use crate::{
    error::{ErrorKind, ParseError},
    span::Span,
};

/// Lexical hint so callers can distinguish ints vs floats without converting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberLexeme<'a> {
    /// No `.` and no exponent.
    Integer(&'a str),
    /// Has a `.` or an exponent.
    Float(&'a str),
}

impl<'a> NumberLexeme<'a> {
    /// Classifies an already-validated number token.
    pub(crate) fn classify(raw: &'a str) -> Self {
        if raw.bytes().any(|b| matches!(b, b'.' | b'e' | b'E')) {
            Self::Float(raw)
        } else {
            Self::Integer(raw)
        }
    }

    /// The token text, exactly as it appeared in the input.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        match self {
            Self::Integer(s) | Self::Float(s) => s,
        }
    }
}

#[inline]
fn is_delimiter(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b',' | b'}' | b']')
}

impl Scanner<'_> {
    /// Lexes a number at the cursor and returns its span.
    ///
    /// The token is first bounded by the next delimiter (whitespace, `,`,
    /// `}`, `]` or the end of the buffer), then the bounded bytes are checked
    /// against the JSON number grammar. Nothing is converted.
    pub(crate) fn parse_number(&mut self) -> Result<Span, ParseError> {
        let start = self.pos();
        let rest = self.rest();
        let len = rest.iter().position(|&b| is_delimiter(b)).unwrap_or(rest.len());
        if !is_valid_number(&rest[..len]) {
            return Err(Self::error_at(ErrorKind::InvalidNumber, start));
        }
        self.advance(len);
        Ok(Span::new(start, len))
    }
}

/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`, whole-slice match.
fn is_valid_number(token: &[u8]) -> bool {
    let mut i = 0;
    let digits_from = |mut j: usize| {
        while token.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        j
    };

    if token.first() == Some(&b'-') {
        i += 1;
    }
    match token.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i = digits_from(i + 1),
        _ => return false,
    }

    if token.get(i) == Some(&b'.') {
        let end = digits_from(i + 1);
        if end == i + 1 {
            return false;
        }
        i = end;
    }

    if let Some(b'e' | b'E') = token.get(i) {
        i += 1;
        if let Some(b'+' | b'-') = token.get(i) {
            i += 1;
        }
        let end = digits_from(i);
        if end == i {
            return false;
        }
        i = end;
    }

    i == token.len()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{NumberLexeme, is_valid_number};
    use crate::{error::ErrorKind, parser::scanner::Scanner, span::Span};

    #[rstest]
    #[case("0")]
    #[case("-0")]
    #[case("0.5")]
    #[case("10")]
    #[case("-123.456e+7")]
    #[case("1E9")]
    #[case("2e-0")]
    #[case("0e10")]
    fn accepts(#[case] token: &str) {
        assert!(is_valid_number(token.as_bytes()), "{token}");
    }

    #[rstest]
    #[case("01")]
    #[case("-")]
    #[case("-01")]
    #[case("1.")]
    #[case(".5")]
    #[case("1e")]
    #[case("1e+")]
    #[case("+1")]
    #[case("0x10")]
    #[case("1.5.2")]
    #[case("--1")]
    #[case("")]
    fn rejects(#[case] token: &str) {
        assert!(!is_valid_number(token.as_bytes()), "{token}");
    }

    #[test]
    fn span_stops_at_delimiter() {
        let mut s = Scanner::new(b"-12.5e3, 4");
        assert_eq!(s.parse_number().unwrap(), Span::new(0, 7));
        assert_eq!(s.peek(), Some(b','));
    }

    #[test]
    fn garbage_before_delimiter_is_invalid_at_start() {
        let mut s = Scanner::new(b"[12ab]");
        s.advance(1);
        let err = s.parse_number().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidNumber);
        assert_eq!(err.offset(), 1);
    }

    #[test]
    fn classify_lexemes() {
        assert_eq!(NumberLexeme::classify("42"), NumberLexeme::Integer("42"));
        assert_eq!(NumberLexeme::classify("4e2"), NumberLexeme::Float("4e2"));
        assert_eq!(NumberLexeme::classify("-0.1").as_str(), "-0.1");
    }
}
