//! Decoding of escaped string contents.
//!
//! The string lexer only validates escapes; decoding happens here, on demand,
//! when a key is inserted or a caller asks for a string value.
//!
//! # Unicode escapes
//!
//! Every `\uXXXX` decodes to exactly one code point. UTF-16 surrogate pairs
//! are **not** combined, which departs from RFC 8259: `"\uD83D\uDE00"` yields
//! two characters rather than U+1F600. A Rust `String` cannot hold a lone
//! surrogate, so each escape in `D800..=DFFF` decodes to U+FFFD.

use alloc::{borrow::Cow, string::String};

use crate::error::{ErrorKind, ParseError};

/// Decodes the bytes between a string token's quotes.
///
/// Returns a borrowed `str` when there is nothing to decode. `offset` is the
/// position of `inner[0]` in the original buffer and anchors error offsets.
///
/// # Errors
///
/// `InvalidUtf8` if a verbatim run is not UTF-8, and the lexer's escape
/// errors if `inner` did not come from a validated token.
///
/// ```
/// use jsonspan::unescape;
///
/// assert_eq!(unescape(br"plain", 0).unwrap(), "plain");
/// assert_eq!(unescape(br"tab\tA", 0).unwrap(), "tab\tA");
/// ```
pub fn unescape(inner: &[u8], offset: usize) -> Result<Cow<'_, str>, ParseError> {
    let Some(first) = inner.iter().position(|&b| b == b'\\') else {
        return utf8_run(inner, offset).map(Cow::Borrowed);
    };

    let mut out = String::with_capacity(inner.len());
    out.push_str(utf8_run(&inner[..first], offset)?);
    let mut i = first;
    while i < inner.len() {
        if inner[i] != b'\\' {
            let run = inner[i..]
                .iter()
                .position(|&b| b == b'\\')
                .map_or(inner.len(), |n| i + n);
            out.push_str(utf8_run(&inner[i..run], offset + i)?);
            i = run;
            continue;
        }

        let at = offset + i;
        let err = move |kind| ParseError::new(kind, at);
        let Some(&body) = inner.get(i + 1) else {
            return Err(err(ErrorKind::UnexpectedEndOfInput));
        };
        let decoded = match body {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{08}',
            b'f' => '\u{0C}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => {
                let digits = inner
                    .get(i + 2..i + 6)
                    .ok_or_else(|| err(ErrorKind::UnexpectedEndOfInput))?;
                let code = hex4(digits).ok_or_else(|| err(ErrorKind::InvalidUnicodeEscape))?;
                i += 4;
                char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            _ => {
                let (ch, _) = bstr::decode_utf8(&inner[i + 1..]);
                return Err(err(ErrorKind::InvalidEscape(
                    ch.unwrap_or(char::REPLACEMENT_CHARACTER),
                )));
            }
        };
        out.push(decoded);
        i += 2;
    }
    Ok(Cow::Owned(out))
}

fn utf8_run(bytes: &[u8], offset: usize) -> Result<&str, ParseError> {
    core::str::from_utf8(bytes)
        .map_err(|e| ParseError::new(ErrorKind::InvalidUtf8, offset + e.valid_up_to()))
}

/// Convert a single ASCII hex digit into its 0..=15 value.
#[inline]
fn hex_val(b: u8) -> Option<u32> {
    match b {
        b'0'..=b'9' => Some(u32::from(b - b'0')),
        b'a'..=b'f' => Some(u32::from(b - b'a') + 10),
        b'A'..=b'F' => Some(u32::from(b - b'A') + 10),
        _ => None,
    }
}

fn hex4(digits: &[u8]) -> Option<u32> {
    digits
        .iter()
        .try_fold(0u32, |acc, &d| Some((acc << 4) | hex_val(d)?))
}
