/// Configuration options for the tree builder.
///
/// The defaults parse exactly the grammar described in the crate
/// documentation with no extra limits.
///
/// # Examples
///
/// ```
/// use jsonspan::{ErrorKind, ParserOptions, parse_with_options};
///
/// let options = ParserOptions {
///     max_depth: Some(2),
///     ..ParserOptions::default()
/// };
/// let err = parse_with_options(b"[[[]]]", options).unwrap_err();
/// assert_eq!(err.kind(), &ErrorKind::DepthLimitExceeded(2));
/// assert_eq!(err.offset(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum number of simultaneously open containers.
    ///
    /// Nesting is held on the heap, so the only bound by default is available
    /// memory. Set a limit when parsing untrusted input.
    ///
    /// # Default
    ///
    /// `None`
    pub max_depth: Option<usize>,

    /// Whether raw control characters (U+0000 to U+001F) inside strings are a
    /// syntax error.
    ///
    /// RFC 8259 requires these to be escaped. The default lexer accepts them
    /// verbatim.
    ///
    /// # Default
    ///
    /// `false`
    pub reject_control_characters: bool,
}
