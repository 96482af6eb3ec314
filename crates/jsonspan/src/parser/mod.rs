//! The tree builder: an explicit-stack state machine over the lexers.
//!
//! Overview
//! - Each outer iteration skips whitespace, looks at the next significant
//!   byte and, depending on the container on top of the stack, consumes the
//!   separators it requires before dispatching exactly one value token.
//! - `[` and `{` push a [`Frame`]; `]` and `}` pop it, fix the container's
//!   length and attach it to the new top frame, or install it as the root.
//! - Scalars attach immediately.
//!
//! Nesting is tracked on the heap, never on the call stack, so arbitrarily
//! deep input parses without recursion. The stack is empty and the root is
//! set exactly when a parse succeeds.

mod literal;
mod numbers;
pub(crate) mod scanner;
mod string;

use alloc::{collections::BTreeSet, string::String, vec::Vec};

use log::trace;
pub use numbers::NumberLexeme;
use scanner::Scanner;

use crate::{
    error::{ErrorKind, ParseError},
    options::ParserOptions,
    span::Span,
    unescape::unescape,
    value::JsonValue,
};

/// Objects with at least this many entries check duplicates through a set
/// instead of a linear scan.
const LINEAR_KEY_SCAN_LIMIT: usize = 16;

/// A decoded object key waiting for its value.
#[derive(Debug)]
struct PendingKey {
    name: String,
    /// Offset of the key's opening quote.
    offset: usize,
}

#[derive(Debug)]
enum Container {
    Array(Vec<JsonValue>),
    Object {
        entries: Vec<(String, JsonValue)>,
        // Populated only past `LINEAR_KEY_SCAN_LIMIT`.
        keys: BTreeSet<String>,
    },
}

impl Container {
    fn is_empty(&self) -> bool {
        match self {
            Container::Array(items) => items.is_empty(),
            Container::Object { entries, .. } => entries.is_empty(),
        }
    }

    /// Appends a child, rejecting a repeated object key.
    fn push(&mut self, key: Option<PendingKey>, value: JsonValue) -> Result<(), ParseError> {
        match (self, key) {
            (Container::Array(items), _) => items.push(value),
            (Container::Object { entries, keys }, Some(key)) => {
                let duplicate = if keys.is_empty() {
                    entries.iter().any(|(k, _)| *k == key.name)
                } else {
                    keys.contains(&key.name)
                };
                if duplicate {
                    return Err(ParseError::new(ErrorKind::DuplicateKey(key.name), key.offset));
                }
                if entries.len() + 1 >= LINEAR_KEY_SCAN_LIMIT {
                    if keys.is_empty() {
                        keys.extend(entries.iter().map(|(k, _)| k.clone()));
                    }
                    keys.insert(key.name.clone());
                }
                entries.push((key.name, value));
            }
            (Container::Object { .. }, None) => unreachable!("object member without a key"),
        }
        Ok(())
    }
}

/// Stack entry – one per open container
#[derive(Debug)]
struct Frame {
    /// Key under which the container attaches to its parent object.
    key: Option<PendingKey>,
    /// Offset of the opening delimiter.
    start: usize,
    container: Container,
}

impl Frame {
    fn new(opener: u8, key: Option<PendingKey>, start: usize) -> Self {
        let container = if opener == b'[' {
            Container::Array(Vec::new())
        } else {
            Container::Object {
                entries: Vec::new(),
                keys: BTreeSet::new(),
            }
        };
        Self {
            key,
            start,
            container,
        }
    }

    fn is_object(&self) -> bool {
        matches!(self.container, Container::Object { .. })
    }

    /// The delimiter that ends this container.
    fn closer(&self) -> u8 {
        if self.is_object() { b'}' } else { b']' }
    }

    fn finish(self, end: usize) -> (Option<PendingKey>, JsonValue) {
        let span = Span::between(self.start, end);
        let value = match self.container {
            Container::Array(items) => JsonValue::Array { items, span },
            Container::Object { entries, .. } => JsonValue::Object { entries, span },
        };
        (self.key, value)
    }
}

/// Builds one [`JsonValue`] tree from one buffer.
#[derive(Debug)]
pub(crate) struct TreeBuilder<'src> {
    scanner: Scanner<'src>,
    options: ParserOptions,
    stack: Vec<Frame>,
    root: Option<JsonValue>,
}

impl<'src> TreeBuilder<'src> {
    pub(crate) fn new(text: &'src [u8], options: ParserOptions) -> Self {
        Self {
            scanner: Scanner::new(text),
            options,
            stack: Vec::with_capacity(16),
            root: None,
        }
    }

    /// Runs the parse loop to completion.
    pub(crate) fn build(mut self) -> Result<JsonValue, ParseError> {
        loop {
            self.scanner.skip_whitespace();
            let Some(next) = self.scanner.peek() else {
                break;
            };
            if self.root.is_some() {
                return Err(self.scanner.error(ErrorKind::UnexpectedTrailingContent));
            }

            let closing = match self.stack.last() {
                Some(frame) if frame.closer() == next => self.stack.pop(),
                _ => None,
            };
            if let Some(frame) = closing {
                self.close(frame)?;
                continue;
            }

            let top = self
                .stack
                .last()
                .map(|frame| (frame.is_object(), frame.container.is_empty()));
            let key = match top {
                None => None,
                Some((true, empty)) => Some(self.member_key(!empty)?),
                Some((false, empty)) => {
                    if !empty {
                        self.separator()?;
                    }
                    None
                }
            };
            self.value(key)?;
        }

        match self.root.take() {
            Some(root) if self.stack.is_empty() => Ok(root),
            _ => Err(self.scanner.eof_error()),
        }
    }

    /// Consumes a `,` and the whitespace after it.
    fn separator(&mut self) -> Result<(), ParseError> {
        if !self.scanner.eat(b',') {
            return Err(self.scanner.error(ErrorKind::ExpectedComma));
        }
        self.scanner.skip_whitespace();
        Ok(())
    }

    /// Consumes `[,] "key" :` inside an object, leaving the cursor on the
    /// member's value.
    fn member_key(&mut self, needs_separator: bool) -> Result<PendingKey, ParseError> {
        if needs_separator {
            self.separator()?;
        }
        match self.scanner.peek() {
            Some(b'"') => {}
            Some(_) => return Err(self.scanner.unexpected_char()),
            None => return Err(self.scanner.eof_error()),
        }

        let span = self
            .scanner
            .parse_string(self.options.reject_control_characters)?;
        let inner = span.inner();
        let name = unescape(&self.scanner.text()[inner.range()], inner.start)?.into_owned();

        self.scanner.skip_whitespace();
        match self.scanner.peek() {
            Some(b':') => self.scanner.advance(1),
            Some(_) => return Err(self.scanner.error(ErrorKind::ExpectedColon)),
            None => return Err(self.scanner.eof_error()),
        }
        self.scanner.skip_whitespace();

        Ok(PendingKey {
            name,
            offset: span.start,
        })
    }

    /// Reads one value token. Containers are pushed; scalars are attached.
    fn value(&mut self, key: Option<PendingKey>) -> Result<(), ParseError> {
        let start = self.scanner.pos();
        let value = match self.scanner.require()? {
            opener @ (b'[' | b'{') => return self.open(opener, key),
            b'"' => JsonValue::String {
                span: self
                    .scanner
                    .parse_string(self.options.reject_control_characters)?,
            },
            b't' | b'f' => {
                let value = self.scanner.parse_boolean()?;
                JsonValue::Boolean {
                    value,
                    span: Span::between(start, self.scanner.pos()),
                }
            }
            b'n' => {
                self.scanner.parse_null()?;
                JsonValue::Null {
                    span: Span::between(start, self.scanner.pos()),
                }
            }
            b'-' | b'0'..=b'9' => JsonValue::Number {
                span: self.scanner.parse_number()?,
            },
            _ => return Err(self.scanner.unexpected_char()),
        };
        trace!("{} at {}", value.kind(), start);
        self.attach(key, value)
    }

    fn open(&mut self, opener: u8, key: Option<PendingKey>) -> Result<(), ParseError> {
        let start = self.scanner.pos();
        if let Some(max) = self.options.max_depth {
            if self.stack.len() >= max {
                return Err(self.scanner.error(ErrorKind::DepthLimitExceeded(max)));
            }
        }
        self.scanner.advance(1);
        self.stack.push(Frame::new(opener, key, start));
        trace!("open {} at {start}, depth {}", opener as char, self.stack.len());
        Ok(())
    }

    /// Finishes a frame popped at its closing delimiter and attaches the
    /// container.
    fn close(&mut self, frame: Frame) -> Result<(), ParseError> {
        self.scanner.advance(1);
        let (key, value) = frame.finish(self.scanner.pos());
        trace!("close {} at {}, depth {}", value.kind(), value.span().start, self.stack.len());
        self.attach(key, value)
    }

    fn attach(&mut self, key: Option<PendingKey>, value: JsonValue) -> Result<(), ParseError> {
        match self.stack.last_mut() {
            Some(frame) => frame.container.push(key, value),
            None => {
                self.root = Some(value);
                Ok(())
            }
        }
    }
}
