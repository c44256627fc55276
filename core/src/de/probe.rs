//! Ordered-fallback decoding of a single position into [`AnyValue`].
//!
//! A position is first opened as a sequence, then as a keyed container, and finally treated as
//! a scalar slot that is tried against a fixed list of scalar types. The first success wins.
//! The scalar order decides which variant a document decodes to, so it must never change:
//! whole numbers land in the narrowest unsigned width that holds them before any signed or
//! floating attempt runs, and floats land in `f32` whenever they fit it.

use crate::{
    de::position::Position,
    error::*,
    value::any::AnyValue,
};
use chrono::{DateTime, Utc};
use serde::{de::Visitor, Deserialize, Deserializer};
use std::collections::BTreeMap;

type Attempt = fn(&Position) -> Result<AnyValue>;

macro_rules! impl_attempt {
    ($name:ident, $type:ty, $variant:ident) => {
        fn $name(position: &Position) -> Result<AnyValue> {
            position.decode_scalar::<$type>().map(AnyValue::$variant)
        }
    };
}

impl_attempt!(attempt_bool, bool, Bool);
impl_attempt!(attempt_string, String, String);
impl_attempt!(attempt_u8, u8, U8);
impl_attempt!(attempt_u16, u16, U16);
impl_attempt!(attempt_u32, u32, U32);
impl_attempt!(attempt_u64, u64, U64);
impl_attempt!(attempt_i8, i8, I8);
impl_attempt!(attempt_i16, i16, I16);
impl_attempt!(attempt_i32, i32, I32);
impl_attempt!(attempt_i64, i64, I64);
impl_attempt!(attempt_f32, f32, F32);
impl_attempt!(attempt_f64, f64, F64);
impl_attempt!(attempt_timestamp, DateTime<Utc>, Timestamp);

fn attempt_bytes(position: &Position) -> Result<AnyValue> {
    position
        .decode_scalar::<Blob>()
        .map(|blob| AnyValue::Bytes(blob.0))
}

/// Scalar attempts, in probe order.
pub const SCALAR_PROBE: [(&str, Attempt); 14] = [
    ("bool", attempt_bool),
    ("string", attempt_string),
    ("u8", attempt_u8),
    ("u16", attempt_u16),
    ("u32", attempt_u32),
    ("u64", attempt_u64),
    ("i8", attempt_i8),
    ("i16", attempt_i16),
    ("i32", attempt_i32),
    ("i64", attempt_i64),
    ("f32", attempt_f32),
    ("f64", attempt_f64),
    ("timestamp", attempt_timestamp),
    ("bytes", attempt_bytes),
];

pub fn decode(position: &Position) -> Result<AnyValue> {
    if let Ok(sequence) = position.open_sequence() {
        let mut result = Vec::with_capacity(sequence.len());
        for child in sequence {
            result.push(decode(&child)?);
        }
        return Ok(AnyValue::Seq(result));
    }
    if let Ok(keyed) = position.open_keyed() {
        let mut result = BTreeMap::new();
        for (key, child) in keyed.entries()? {
            result.insert(key, decode(&child)?);
        }
        return Ok(AnyValue::Map(result));
    }
    decode_scalar(position)
}

pub fn decode_scalar(position: &Position) -> Result<AnyValue> {
    SCALAR_PROBE
        .iter()
        .find_map(|(_, attempt)| attempt(position).ok())
        .ok_or_else(|| Error::TypeMismatch {
            path: position.path().to_owned(),
        })
}

/// Native byte string, without falling back to sequences of numbers.
struct Blob(Vec<u8>);

struct BlobVisitor;

impl<'de> Visitor<'de> for BlobVisitor {
    type Value = Blob;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("byte string")
    }

    fn visit_bytes<E>(self, value: &[u8]) -> std::result::Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Blob(value.to_owned()))
    }

    fn visit_byte_buf<E>(self, value: Vec<u8>) -> std::result::Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Blob(value))
    }
}

impl<'de> Deserialize<'de> for Blob {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_byte_buf(BlobVisitor)
    }
}
