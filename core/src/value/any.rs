use crate::{
    de::{position::Position, probe},
    error::Result,
    value::{content::Content, key::FlexibleKey},
};
use chrono::{DateTime, Utc};
use serde::{
    ser::{SerializeMap, SerializeSeq},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::{
    any::Any,
    collections::{BTreeMap, HashMap},
    hash::{Hash, Hasher},
};

/// Value of any serializable type, decided at decode time.
///
/// Decoding probes the incoming position in a fixed order (see [`crate::de::probe`]); encoding
/// writes each variant through its own serializer call. There is no null variant: use
/// `Option<AnyValue>` where a document may hold nulls.
///
/// Floats compare and hash by bit pattern, so `F32(1.0) != F64(1.0)` and `NaN == NaN`.
#[derive(Debug, Clone)]
pub enum AnyValue {
    Bool(bool),
    String(String),
    F32(f32),
    F64(f64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    Bytes(Vec<u8>),
    Timestamp(DateTime<Utc>),
    Seq(Vec<Self>),
    Map(BTreeMap<FlexibleKey, Self>),
}

impl AnyValue {
    pub fn seq() -> Self {
        Self::Seq(vec![])
    }

    pub fn map() -> Self {
        Self::Map(BTreeMap::new())
    }

    pub fn item<T>(mut self, value: T) -> Self
    where
        T: Into<Self>,
    {
        if let Self::Seq(v) = &mut self {
            v.push(value.into());
        }
        self
    }

    pub fn property<K, T>(mut self, key: K, value: T) -> Self
    where
        K: Into<FlexibleKey>,
        T: Into<Self>,
    {
        if let Self::Map(v) = &mut self {
            v.insert(key.into(), value.into());
        }
        self
    }

    /// Decodes buffered content, probing candidate types in order.
    pub fn decode(content: &Content) -> Result<Self> {
        probe::decode(&Position::root(content))
    }

    /// Wraps a native value of one of the supported types. Types are checked in a fixed order:
    /// timestamp, bool, string, `f64`, `f32`, signed integers, unsigned integers, bytes, map,
    /// sequence. Returns `None` for any other type.
    pub fn from_native(value: &dyn Any) -> Option<Self> {
        macro_rules! try_native {
            ($type:ty => $variant:ident) => {
                if let Some(v) = value.downcast_ref::<$type>() {
                    return Some(Self::$variant(v.to_owned()));
                }
            };
        }

        try_native!(DateTime<Utc> => Timestamp);
        try_native!(bool => Bool);
        try_native!(String => String);
        if let Some(v) = value.downcast_ref::<&str>() {
            return Some(Self::String((*v).to_owned()));
        }
        try_native!(f64 => F64);
        try_native!(f32 => F32);
        try_native!(isize => Isize);
        try_native!(i8 => I8);
        try_native!(i16 => I16);
        try_native!(i32 => I32);
        try_native!(i64 => I64);
        try_native!(usize => Usize);
        try_native!(u8 => U8);
        try_native!(u16 => U16);
        try_native!(u32 => U32);
        try_native!(u64 => U64);
        try_native!(Vec<u8> => Bytes);
        try_native!(BTreeMap<FlexibleKey, AnyValue> => Map);
        try_native!(Vec<AnyValue> => Seq);
        None
    }

    /// Unwraps into the native payload. Inverse of [`Self::from_native`].
    pub fn into_native(self) -> Box<dyn Any> {
        match self {
            Self::Bool(v) => Box::new(v),
            Self::String(v) => Box::new(v),
            Self::F32(v) => Box::new(v),
            Self::F64(v) => Box::new(v),
            Self::I8(v) => Box::new(v),
            Self::I16(v) => Box::new(v),
            Self::I32(v) => Box::new(v),
            Self::I64(v) => Box::new(v),
            Self::Isize(v) => Box::new(v),
            Self::U8(v) => Box::new(v),
            Self::U16(v) => Box::new(v),
            Self::U32(v) => Box::new(v),
            Self::U64(v) => Box::new(v),
            Self::Usize(v) => Box::new(v),
            Self::Bytes(v) => Box::new(v),
            Self::Timestamp(v) => Box::new(v),
            Self::Seq(v) => Box::new(v),
            Self::Map(v) => Box::new(v),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::Isize(_) => "isize",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::Usize(_) => "usize",
            Self::Bytes(_) => "bytes",
            Self::Timestamp(_) => "timestamp",
            Self::Seq(_) => "seq",
            Self::Map(_) => "map",
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some()
    }
}

macro_rules! impl_as_copy_value {
    ($method:ident, $type:ty, $variant:ident) => {
        pub fn $method(&self) -> Option<$type> {
            match self {
                Self::$variant(v) => Some(*v),
                _ => None,
            }
        }
    };
}

macro_rules! impl_as_ref_value {
    ($method:ident, $type:ty, $variant:ident) => {
        pub fn $method(&self) -> Option<$type> {
            match self {
                Self::$variant(v) => Some(v),
                _ => None,
            }
        }
    };
}

// Numeric projections convert with `as`: float to integer truncates toward zero and saturates
// (NaN becomes 0), integer to integer wraps, integer to float rounds to nearest.
macro_rules! impl_as_number {
    ($method:ident, $type:ty) => {
        #[allow(clippy::unnecessary_cast)]
        pub fn $method(&self) -> Option<$type> {
            match self {
                Self::F32(v) => Some(*v as $type),
                Self::F64(v) => Some(*v as $type),
                Self::I8(v) => Some(*v as $type),
                Self::I16(v) => Some(*v as $type),
                Self::I32(v) => Some(*v as $type),
                Self::I64(v) => Some(*v as $type),
                Self::Isize(v) => Some(*v as $type),
                Self::U8(v) => Some(*v as $type),
                Self::U16(v) => Some(*v as $type),
                Self::U32(v) => Some(*v as $type),
                Self::U64(v) => Some(*v as $type),
                Self::Usize(v) => Some(*v as $type),
                _ => None,
            }
        }
    };
}

impl AnyValue {
    impl_as_copy_value! {as_bool, bool, Bool}
    impl_as_copy_value! {as_timestamp, DateTime<Utc>, Timestamp}
    impl_as_ref_value! {as_str, &str, String}
    impl_as_ref_value! {as_bytes, &[u8], Bytes}
    impl_as_ref_value! {as_seq, &[Self], Seq}
    impl_as_ref_value! {as_map, &BTreeMap<FlexibleKey, Self>, Map}
    impl_as_number! {as_f64, f64}
    impl_as_number! {as_f32, f32}
    impl_as_number! {as_isize, isize}
    impl_as_number! {as_i8, i8}
    impl_as_number! {as_i16, i16}
    impl_as_number! {as_i32, i32}
    impl_as_number! {as_i64, i64}
    impl_as_number! {as_usize, usize}
    impl_as_number! {as_u8, u8}
    impl_as_number! {as_u16, u16}
    impl_as_number! {as_u32, u32}
    impl_as_number! {as_u64, u64}
}

impl PartialEq for AnyValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::F32(a), Self::F32(b)) => a.to_bits() == b.to_bits(),
            (Self::F64(a), Self::F64(b)) => a.to_bits() == b.to_bits(),
            (Self::I8(a), Self::I8(b)) => a == b,
            (Self::I16(a), Self::I16(b)) => a == b,
            (Self::I32(a), Self::I32(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::Isize(a), Self::Isize(b)) => a == b,
            (Self::U8(a), Self::U8(b)) => a == b,
            (Self::U16(a), Self::U16(b)) => a == b,
            (Self::U32(a), Self::U32(b)) => a == b,
            (Self::U64(a), Self::U64(b)) => a == b,
            (Self::Usize(a), Self::Usize(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::Seq(a), Self::Seq(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for AnyValue {}

impl Hash for AnyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Bool(v) => v.hash(state),
            Self::String(v) => v.hash(state),
            Self::F32(v) => v.to_bits().hash(state),
            Self::F64(v) => v.to_bits().hash(state),
            Self::I8(v) => v.hash(state),
            Self::I16(v) => v.hash(state),
            Self::I32(v) => v.hash(state),
            Self::I64(v) => v.hash(state),
            Self::Isize(v) => v.hash(state),
            Self::U8(v) => v.hash(state),
            Self::U16(v) => v.hash(state),
            Self::U32(v) => v.hash(state),
            Self::U64(v) => v.hash(state),
            Self::Usize(v) => v.hash(state),
            Self::Bytes(v) => v.hash(state),
            Self::Timestamp(v) => v.hash(state),
            Self::Seq(v) => v.hash(state),
            Self::Map(v) => v.hash(state),
        }
    }
}

macro_rules! impl_from_wrap {
    ($type:ty, $variant:ident) => {
        impl From<$type> for AnyValue {
            fn from(v: $type) -> Self {
                Self::$variant(v)
            }
        }
    };
}

impl_from_wrap!(bool, Bool);
impl_from_wrap!(String, String);
impl_from_wrap!(f32, F32);
impl_from_wrap!(f64, F64);
impl_from_wrap!(i8, I8);
impl_from_wrap!(i16, I16);
impl_from_wrap!(i32, I32);
impl_from_wrap!(i64, I64);
impl_from_wrap!(isize, Isize);
impl_from_wrap!(u8, U8);
impl_from_wrap!(u16, U16);
impl_from_wrap!(u32, U32);
impl_from_wrap!(u64, U64);
impl_from_wrap!(usize, Usize);
impl_from_wrap!(Vec<u8>, Bytes);
impl_from_wrap!(DateTime<Utc>, Timestamp);
impl_from_wrap!(Vec<AnyValue>, Seq);
impl_from_wrap!(BTreeMap<FlexibleKey, AnyValue>, Map);

impl From<&str> for AnyValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl<const N: usize> From<[AnyValue; N]> for AnyValue {
    fn from(v: [Self; N]) -> Self {
        Self::Seq(v.to_vec())
    }
}

impl From<HashMap<FlexibleKey, AnyValue>> for AnyValue {
    fn from(v: HashMap<FlexibleKey, Self>) -> Self {
        Self::Map(v.into_iter().collect())
    }
}

impl Serialize for AnyValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::String(v) => serializer.serialize_str(v),
            Self::F32(v) => serializer.serialize_f32(*v),
            Self::F64(v) => serializer.serialize_f64(*v),
            Self::I8(v) => serializer.serialize_i8(*v),
            Self::I16(v) => serializer.serialize_i16(*v),
            Self::I32(v) => serializer.serialize_i32(*v),
            Self::I64(v) => serializer.serialize_i64(*v),
            Self::Isize(v) => serializer.serialize_i64(*v as _),
            Self::U8(v) => serializer.serialize_u8(*v),
            Self::U16(v) => serializer.serialize_u16(*v),
            Self::U32(v) => serializer.serialize_u32(*v),
            Self::U64(v) => serializer.serialize_u64(*v),
            Self::Usize(v) => serializer.serialize_u64(*v as _),
            Self::Bytes(v) => serializer.serialize_bytes(v),
            Self::Timestamp(v) => v.serialize(serializer),
            Self::Seq(v) => {
                let mut seq = serializer.serialize_seq(Some(v.len()))?;
                for item in v {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Map(v) => {
                let mut map = serializer.serialize_map(Some(v.len()))?;
                for (k, v) in v {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for AnyValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let content = Content::deserialize(deserializer)?;
        Self::decode(&content).map_err(serde::de::Error::custom)
    }
}
