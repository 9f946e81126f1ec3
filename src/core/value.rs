//! # Primitive Values
//!
//! The dynamic value tree a transport produces after byte-level decoding.
//!
//! The model follows bencode: integers, byte strings, lists and dictionaries
//! keyed by byte strings. Text travels as UTF-8 byte strings, so `"ping"` and
//! `b"ping"` are the same value.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single already-deserialized primitive value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Integer(i64),
    Bytes(Bytes),
    List(Vec<Value>),
    Dict(BTreeMap<Bytes, Value>),
}

impl Value {
    /// Empty list, the conventional "no arguments" value
    pub fn empty_list() -> Self {
        Value::List(Vec::new())
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&BTreeMap<Bytes, Value>> {
        match self {
            Value::Dict(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow a byte string as UTF-8 text
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Short name of the variant, used in error reasons and logs
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<u8> for Value {
    fn from(n: u8) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<u16> for Value {
    fn from(n: u16) -> Self {
        Value::Integer(i64::from(n))
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(b))
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Bytes(Bytes::from(s.into_bytes()))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<Bytes, Value>> for Value {
    fn from(map: BTreeMap<Bytes, Value>) -> Self {
        Value::Dict(map)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_a_byte_string() {
        assert_eq!(Value::from("ping"), Value::from(b"ping".as_slice()));
        assert_eq!(Value::from("ping").as_str(), Some("ping"));
    }

    #[test]
    fn test_as_str_rejects_invalid_utf8() {
        let value = Value::from(vec![0xff, 0xfe]);
        assert!(value.as_bytes().is_some());
        assert_eq!(value.as_str(), None);
    }

    #[test]
    fn test_accessors_are_variant_specific() {
        let n = Value::from(7u16);
        assert_eq!(n.as_integer(), Some(7));
        assert!(n.as_bytes().is_none());
        assert!(n.as_list().is_none());

        let list: Value = vec![Value::from(1i64), Value::from("x")].into_iter().collect();
        assert_eq!(list.as_list().map(<[Value]>::len), Some(2));
        assert_eq!(list.type_name(), "list");
    }
}
