#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsonspan::{ErrorKind, JsonValue, ParserOptions};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 1; // option flags

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static TOLERATED: &[&str] = &["recursion limit", "surrogate", "out of range"];

static WS_TABLE: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r"];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Mostly libFuzzer's own mutations; every tenth input is rebuilt from a
/// serialized arbitrary value so deep and well-formed documents stay common.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x03);

        let limit = max_size - HEADER;
        let mut len = HEADER;
        len += append_whitespace(&mut data[len..], limit);
        len += append_value(&mut data[len..], size.max(8), max_size - len);
        len += append_whitespace(&mut data[len..], max_size - len);
        len
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }
        let n = rng.random_range(1..=limit.min(4));
        for slot in &mut buf[..n] {
            *slot = WS_TABLE[rng.random_range(0..WS_TABLE.len())][0];
        }
        n
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..size * 2));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");
    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
        };
        Ok(ArbitraryValue(value))
    }
}

/// Checks that every span lies inside its parent and the buffer.
fn check_spans(root: &JsonValue, text: &[u8]) {
    let mut pending = vec![(root, 0..text.len())];
    while let Some((value, bounds)) = pending.pop() {
        let span = value.span();
        assert!(span.start >= bounds.start && span.end() <= bounds.end);
        assert!(!span.is_empty());
        let inner = span.start + 1..span.end() - 1;
        match value {
            JsonValue::Array { items, .. } => {
                pending.extend(items.iter().map(|v| (v, inner.clone())));
            }
            JsonValue::Object { entries, .. } => {
                pending.extend(entries.iter().map(|(_, v)| (v, inner.clone())));
            }
            JsonValue::String { .. } => {
                let _ = value.as_str(text);
            }
            _ => {}
        }
    }
}

fn parser(data: &[u8]) {
    let Some((&flags, text)) = data.split_first() else {
        return;
    };
    let options = ParserOptions {
        max_depth: (flags & 1 != 0).then_some(64),
        reject_control_characters: flags & 2 != 0,
    };

    let ours = jsonspan::parse_with_options(text, options);
    if let Ok(root) = &ours {
        check_spans(root, text);
    }

    // serde_json agrees on validity, except that it tolerates duplicate keys
    // and rejects deep nesting, lone surrogates and out-of-range numbers.
    if options.max_depth.is_none() && options.reject_control_characters {
        match (&ours, serde_json::from_slice::<Value>(text)) {
            (Ok(_), Ok(_)) => {}
            (Err(err), Ok(_)) => {
                assert!(matches!(err.kind(), ErrorKind::DuplicateKey(_)), "{err}");
            }
            (Ok(_), Err(err)) => {
                let msg = err.to_string();
                assert!(
                    TOLERATED.iter().any(|t| msg.contains(t)) || std::str::from_utf8(text).is_err(),
                    "{msg}"
                );
            }
            (Err(_), Err(_)) => {}
        }
    }
}

fuzz_target!(|data: &[u8]| parser(data));
