#![no_main]

use dht_msgformat::{decode, encode, Field, Primitive, Value};
use libfuzzer_sys::fuzz_target;

/// Turn raw bytes into a record: each slot is an integer, a byte string or a
/// short list of integers, chosen by a selector byte.
fn primitive_from(data: &[u8]) -> Primitive {
    let mut primitive = Primitive::default();
    let mut chunks = data.chunks(6);
    for field in Field::ALL {
        let Some(chunk) = chunks.next() else { break };
        let Some((&selector, rest)) = chunk.split_first() else { continue };
        let value = match selector % 4 {
            0 => continue,
            1 => Value::Integer(i64::from(rest.first().copied().unwrap_or(0)) - 1),
            2 => Value::from(rest),
            _ => rest.iter().map(|b| Value::Integer(i64::from(*b))).collect(),
        };
        primitive.set(field, value);
    }
    primitive
}

fuzz_target!(|data: &[u8]| {
    // Decoding must never panic, and anything that decodes must re-encode
    if let Ok(message) = decode(&primitive_from(data)) {
        let _ = encode(&message);
    }
});
