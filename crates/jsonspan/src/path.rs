//! JSON Pointer ([RFC 6901]) lookup over a parsed tree.
//!
//! [RFC 6901]: https://datatracker.ietf.org/doc/html/rfc6901

use alloc::{borrow::Cow, string::ToString};

use crate::value::JsonValue;

/// A by-value view of one pointer component.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathItem<'a> {
    /// A member name of a JSON object.
    Key(Cow<'a, str>),
    /// An index into a JSON array.
    Index(usize),
}

impl PathItem<'_> {
    /// Interprets one `/`-separated pointer token.
    ///
    /// Tokens that are canonical array indices (`0`, or digits without a
    /// leading zero) become [`PathItem::Index`]; everything else is a key
    /// with `~1` and `~0` decoded.
    fn from_token(token: &str) -> PathItem<'_> {
        let is_index = !token.is_empty()
            && token.bytes().all(|b| b.is_ascii_digit())
            && (token == "0" || !token.starts_with('0'));
        if is_index {
            if let Ok(i) = token.parse() {
                return PathItem::Index(i);
            }
        }
        if token.contains('~') {
            PathItem::Key(Cow::Owned(token.replace("~1", "/").replace("~0", "~")))
        } else {
            PathItem::Key(Cow::Borrowed(token))
        }
    }
}

impl JsonValue {
    /// Looks up a value by JSON Pointer, e.g. `"/items/0/name"`.
    ///
    /// The empty pointer addresses `self`. A numeric token addresses an array
    /// element, or an object member with that name.
    ///
    /// ```
    /// let text = br#"{"a/b": [10, {"~k": true}]}"#;
    /// let root = jsonspan::parse(text).unwrap();
    /// assert_eq!(root.pointer("/a~1b/0").unwrap().raw(text), "10");
    /// assert_eq!(root.pointer("/a~1b/1/~0k").unwrap().as_bool(), Some(true));
    /// assert!(root.pointer("/missing").is_none());
    /// ```
    #[must_use]
    pub fn pointer(&self, pointer: &str) -> Option<&JsonValue> {
        if pointer.is_empty() {
            return Some(self);
        }
        pointer
            .strip_prefix('/')?
            .split('/')
            .map(PathItem::from_token)
            .try_fold(self, |target, item| target.get_item(&item))
    }

    /// Looks up one path component.
    #[must_use]
    pub fn get_item(&self, item: &PathItem<'_>) -> Option<&JsonValue> {
        match (self, item) {
            (JsonValue::Array { .. }, PathItem::Index(i)) => self.get_index(*i),
            (JsonValue::Object { .. }, PathItem::Key(k)) => self.get(k),
            (JsonValue::Object { .. }, PathItem::Index(i)) => self.get(&i.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::borrow::Cow;

    use rstest::rstest;

    use super::PathItem;
    use crate::parse;

    #[rstest]
    #[case("0", PathItem::Index(0))]
    #[case("12", PathItem::Index(12))]
    #[case("012", PathItem::Key(Cow::Borrowed("012")))]
    #[case("-", PathItem::Key(Cow::Borrowed("-")))]
    #[case("", PathItem::Key(Cow::Borrowed("")))]
    #[case("a~1b~0", PathItem::Key(Cow::Borrowed("a/b~")))]
    fn tokens(#[case] token: &str, #[case] expected: PathItem<'static>) {
        assert_eq!(PathItem::from_token(token), expected);
    }

    #[test]
    fn numeric_tokens_address_object_members() {
        let text = br#"{"1": "one", "": {"x": null}}"#;
        let root = parse(text).unwrap();
        assert_eq!(root.pointer("/1").unwrap().raw(text), r#""one""#);
        assert!(root.pointer("//x").unwrap().is_null());
        assert_eq!(root.pointer("").unwrap(), &root);
        assert!(root.pointer("1").is_none());
    }

    #[test]
    fn pointer_through_scalars_fails() {
        let root = parse(b"[1, [2]]").unwrap();
        assert!(root.pointer("/0/0").is_none());
        assert!(root.pointer("/1/0").unwrap().is_number());
        assert!(root.pointer("/2").is_none());
    }
}
