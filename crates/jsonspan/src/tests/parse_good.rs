use alloc::{string::String, vec::Vec};

use rstest::rstest;

use crate::{Document, JsonValue, NumberLexeme, Span, ValueKind, parse};

/// Follows the first child of each container and returns the chain length.
fn first_child_depth(mut value: &JsonValue) -> usize {
    let mut depth = 0;
    while let Some(child) = value
        .get_index(0)
        .or_else(|| value.as_object().and_then(|e| e.first()).map(|(_, v)| v))
    {
        depth += 1;
        value = child;
    }
    depth
}

#[test_log::test]
fn object_with_nested_array() {
    let text = br#"{"a":1,"b":[1,2,3]}"#;
    let root = parse(text).unwrap();
    let entries = root.as_object().unwrap();
    let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["a", "b"]);
    assert!(entries[0].1.is_number());
    let b = &entries[1].1;
    assert_eq!(b.len(), 3);
    assert!(b.as_array().unwrap().iter().all(JsonValue::is_number));
    assert_eq!(b.span(), Span::new(11, 7));
}

#[rstest]
#[case(b"0", "0")]
#[case(b"0.5", "0.5")]
#[case(b"-0", "-0")]
#[case(b"1e10", "1e10")]
#[case(b" \t\r\n12.75E-3 \n", "12.75E-3")]
fn root_numbers(#[case] text: &[u8], #[case] raw: &str) {
    let root = parse(text).unwrap();
    assert_eq!(root.kind(), ValueKind::Number);
    assert_eq!(root.raw(text), raw);
}

#[rstest]
#[case(br#""\u0041""#, "A")]
#[case(br#""\n""#, "\n")]
#[case(br#""tab\there""#, "tab\there")]
#[case(br#""quote \" slash \/ back \\""#, "quote \" slash / back \\")]
#[case(br#""""#, "")]
fn root_strings(#[case] text: &[u8], #[case] decoded: &str) {
    let root = parse(text).unwrap();
    assert_eq!(root.span(), Span::new(0, text.len()));
    assert_eq!(root.as_str(text).unwrap().unwrap(), decoded);
}

#[test]
fn literals() {
    let text = b"[true,false,null]";
    let root = parse(text).unwrap();
    let items = root.as_array().unwrap();
    assert_eq!(items[0].as_bool(), Some(true));
    assert_eq!(items[1].as_bool(), Some(false));
    assert!(items[2].is_null());
    assert_eq!(items[1].span(), Span::new(6, 5));
}

#[test]
fn whitespace_everywhere() {
    let text = b" { \"k\" \n:\t[ 1 ,\r\n 2 ] , \"e\" : { } } ";
    let root = parse(text).unwrap();
    assert_eq!(root.len(), 2);
    assert_eq!(root.get("k").unwrap().len(), 2);
    assert!(root.get("e").unwrap().is_object());
    assert_eq!(root.raw(text).len(), text.len() - 2);
}

#[test]
fn utf8_passes_through_strings_and_keys() {
    let text = "{\"ключ\": \"значение ☃\"}".as_bytes();
    let doc = Document::parse(text).unwrap();
    let value = doc.root().get("ключ").unwrap();
    assert_eq!(doc.str(value).unwrap().unwrap(), "значение ☃");
}

#[test]
fn deep_balanced_nesting_parses_without_recursion() {
    const DEPTH: usize = 50_000;
    let mut text = String::with_capacity(DEPTH * 2);
    text.extend(core::iter::repeat_n('[', DEPTH));
    text.extend(core::iter::repeat_n(']', DEPTH));
    let root = parse(text.as_bytes()).unwrap();
    assert_eq!(first_child_depth(&root), DEPTH - 1);
    assert_eq!(root.span(), Span::new(0, DEPTH * 2));
}

#[test]
fn deep_object_nesting() {
    const DEPTH: usize = 20_000;
    let mut text = String::new();
    for _ in 0..DEPTH {
        text.push_str("{\"k\":");
    }
    text.push_str("null");
    text.extend(core::iter::repeat_n('}', DEPTH));
    let root = parse(text.as_bytes()).unwrap();
    assert_eq!(first_child_depth(&root), DEPTH);
}

#[test]
fn numbers_keep_source_text() {
    let text = b"[-0.0, 1E+2, 123456789012345678901234567890]";
    let doc = Document::parse(text).unwrap();
    let lexemes: Vec<NumberLexeme<'_>> = doc
        .root()
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| doc.number(v))
        .collect();
    assert_eq!(
        lexemes,
        [
            NumberLexeme::Float("-0.0"),
            NumberLexeme::Float("1E+2"),
            NumberLexeme::Integer("123456789012345678901234567890"),
        ]
    );
}

#[test]
fn same_key_in_sibling_objects_is_fine() {
    let root = parse(br#"[{"a":1},{"a":2},{"b":{"a":3}}]"#).unwrap();
    assert_eq!(root.len(), 3);
    assert!(root.pointer("/2/b/a").is_some());
}
