use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use quickcheck::{Arbitrary, Gen, QuickCheck};
use quickcheck_macros::quickcheck;
use serde_json::{Map, Number, Value};

use crate::{JsonValue, parse};

/// A `serde_json` value with finite numbers and unique object keys.
#[derive(Debug, Clone)]
struct Doc(Value);

impl Arbitrary for Doc {
    fn arbitrary(g: &mut Gen) -> Self {
        fn scalar(g: &mut Gen) -> Value {
            match usize::arbitrary(g) % 4 {
                0 => Value::Null,
                1 => Value::Bool(bool::arbitrary(g)),
                2 => {
                    let mut n = f64::arbitrary(g);
                    while !n.is_finite() {
                        n = f64::arbitrary(g);
                    }
                    Number::from_f64(n).map_or(Value::Null, Value::Number)
                }
                _ => Value::String(String::arbitrary(g)),
            }
        }

        fn gen_val(g: &mut Gen, depth: usize) -> Value {
            if depth == 0 {
                return scalar(g);
            }
            match usize::arbitrary(g) % 6 {
                0..=3 => scalar(g),
                4 => {
                    let len = usize::arbitrary(g) % 4;
                    Value::Array((0..len).map(|_| gen_val(g, depth - 1)).collect())
                }
                _ => {
                    let len = usize::arbitrary(g) % 4;
                    let mut map = Map::new();
                    for _ in 0..len {
                        map.insert(String::arbitrary(g), gen_val(g, depth - 1));
                    }
                    Value::Object(map)
                }
            }
        }

        let depth = usize::arbitrary(g) % 4;
        Doc(gen_val(g, depth))
    }
}

/// Materializes a parsed tree through its spans.
fn to_serde(value: &JsonValue, text: &[u8]) -> Value {
    match value {
        JsonValue::Null { .. } => Value::Null,
        JsonValue::Boolean { value, .. } => Value::Bool(*value),
        JsonValue::Number { span } => {
            serde_json::from_slice(&text[span.range()]).expect("number span holds a number")
        }
        JsonValue::String { .. } => Value::String(
            value
                .as_str(text)
                .expect("valid UTF-8")
                .expect("string value")
                .into_owned(),
        ),
        JsonValue::Array { items, .. } => {
            Value::Array(items.iter().map(|item| to_serde(item, text)).collect())
        }
        JsonValue::Object { entries, .. } => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), to_serde(v, text)))
                .collect(),
        ),
    }
}

/// Property: any document `serde_json` serializes parses, and reading the
/// tree back through its spans reproduces the document.
#[test]
fn serde_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Doc, pretty: bool) -> bool {
        let text = if pretty {
            serde_json::to_string_pretty(&doc.0)
        } else {
            serde_json::to_string(&doc.0)
        }
        .expect("serializable");
        let root = parse(text.as_bytes()).expect("serde_json output is valid JSON");
        root.span().len == text.len() && to_serde(&root, text.as_bytes()) == doc.0
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Doc, bool) -> bool);
}

#[test]
fn float_text_reads_back_exactly() {
    let value = serde_json::json!([
        -9.855_029_955_358_159e204,
        0.1,
        -0.0,
        5e-324,
        1.797_693_134_862_315_7e308,
    ]);
    let text = serde_json::to_string(&value).unwrap();
    let root = parse(text.as_bytes()).unwrap();
    assert_eq!(to_serde(&root, text.as_bytes()), value);
}

/// Property: children's spans nest inside their parent's span, in order.
#[test]
fn spans_nest_quickcheck() {
    fn nested(value: &JsonValue) -> bool {
        let span = value.span();
        let children: Vec<&JsonValue> = match value {
            JsonValue::Array { items, .. } => items.iter().collect(),
            JsonValue::Object { entries, .. } => entries.iter().map(|(_, v)| v).collect(),
            _ => return true,
        };
        let mut cursor = span.start + 1;
        for child in children {
            let s = child.span();
            if s.start < cursor || s.end() >= span.end() || !nested(child) {
                return false;
            }
            cursor = s.end();
        }
        true
    }

    #[allow(clippy::needless_pass_by_value)]
    fn prop(doc: Doc) -> bool {
        let text = doc.0.to_string();
        parse(text.as_bytes()).is_ok_and(|root| nested(&root))
    }

    QuickCheck::new()
        .tests(if is_ci::cached() { 2_000 } else { 500 })
        .quickcheck(prop as fn(Doc) -> bool);
}

/// Arbitrary bytes never panic, and an error's offset lies within the input.
#[quickcheck]
fn arbitrary_bytes_fail_inside_buffer(bytes: Vec<u8>) -> bool {
    match parse(&bytes) {
        Ok(root) => root.span().end() <= bytes.len(),
        Err(err) => err.offset() <= bytes.len() && !err.to_string().is_empty(),
    }
}
