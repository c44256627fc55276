use crate::de::content::ContentVisitor;
use serde::{
    de::Unexpected,
    ser::{SerializeMap, SerializeSeq},
    Deserialize, Deserializer, Serialize, Serializer,
};

/// Buffered decode position.
///
/// Captures whatever a self-describing format hands out for one position, so that several
/// interpretations of the same position can be attempted without touching the stream again.
#[derive(Debug, Default, Clone, PartialEq, PartialOrd)]
pub enum Content {
    #[default]
    Unit,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
    None,
    Some(Box<Self>),
    /// (values: [value])
    Seq(Vec<Self>),
    /// (values: [(key, value)])
    Map(Vec<(Self, Self)>),
}

impl Content {
    pub fn seq() -> Self {
        Self::Seq(vec![])
    }

    pub fn map() -> Self {
        Self::Map(vec![])
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
        K: Into<Self>,
        T: Into<Self>,
    {
        if let Self::Map(v) = &mut self {
            v.push((key.into(), value.into()));
        }
        self
    }

    /// Skips any `Some` wrappers.
    pub fn inner(&self) -> &Self {
        match self {
            Self::Some(v) => v.inner(),
            _ => self,
        }
    }

    /// Integer payload of any width, if it fits `i64`.
    pub fn as_integer(&self) -> Option<i64> {
        match self.inner() {
            Self::I8(v) => Some(*v as _),
            Self::I16(v) => Some(*v as _),
            Self::I32(v) => Some(*v as _),
            Self::I64(v) => Some(*v),
            Self::U8(v) => Some(*v as _),
            Self::U16(v) => Some(*v as _),
            Self::U32(v) => Some(*v as _),
            Self::U64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.inner(), Self::Seq(_) | Self::Map(_))
    }

    pub(crate) fn unexpected(&self) -> Unexpected<'_> {
        match self {
            Self::Unit => Unexpected::Unit,
            Self::Bool(v) => Unexpected::Bool(*v),
            Self::I8(v) => Unexpected::Signed(*v as _),
            Self::I16(v) => Unexpected::Signed(*v as _),
            Self::I32(v) => Unexpected::Signed(*v as _),
            Self::I64(v) => Unexpected::Signed(*v),
            Self::U8(v) => Unexpected::Unsigned(*v as _),
            Self::U16(v) => Unexpected::Unsigned(*v as _),
            Self::U32(v) => Unexpected::Unsigned(*v as _),
            Self::U64(v) => Unexpected::Unsigned(*v),
            Self::F32(v) => Unexpected::Float(*v as _),
            Self::F64(v) => Unexpected::Float(*v),
            Self::Char(v) => Unexpected::Char(*v),
            Self::String(v) => Unexpected::Str(v),
            Self::Bytes(v) => Unexpected::Bytes(v),
            Self::None | Self::Some(_) => Unexpected::Option,
            Self::Seq(_) => Unexpected::Seq,
            Self::Map(_) => Unexpected::Map,
        }
    }
}

macro_rules! impl_from_wrap {
    ($type:ty, $variant:ident) => {
        impl From<$type> for Content {
            fn from(v: $type) -> Self {
                Self::$variant(v)
            }
        }
    };
}

impl From<()> for Content {
    fn from(_: ()) -> Self {
        Self::Unit
    }
}

impl_from_wrap!(bool, Bool);
impl_from_wrap!(i8, I8);
impl_from_wrap!(i16, I16);
impl_from_wrap!(i32, I32);
impl_from_wrap!(i64, I64);
impl_from_wrap!(u8, U8);
impl_from_wrap!(u16, U16);
impl_from_wrap!(u32, U32);
impl_from_wrap!(u64, U64);
impl_from_wrap!(f32, F32);
impl_from_wrap!(f64, F64);
impl_from_wrap!(char, Char);
impl_from_wrap!(String, String);
impl_from_wrap!(Vec<u8>, Bytes);

impl From<&str> for Content {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<Vec<Content>> for Content {
    fn from(v: Vec<Self>) -> Self {
        Self::Seq(v)
    }
}

impl From<Option<Content>> for Content {
    fn from(v: Option<Self>) -> Self {
        match v {
            Some(v) => Self::Some(Box::new(v)),
            None => Self::None,
        }
    }
}

impl Serialize for Content {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Unit => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::I8(v) => serializer.serialize_i8(*v),
            Self::I16(v) => serializer.serialize_i16(*v),
            Self::I32(v) => serializer.serialize_i32(*v),
            Self::I64(v) => serializer.serialize_i64(*v),
            Self::U8(v) => serializer.serialize_u8(*v),
            Self::U16(v) => serializer.serialize_u16(*v),
            Self::U32(v) => serializer.serialize_u32(*v),
            Self::U64(v) => serializer.serialize_u64(*v),
            Self::F32(v) => serializer.serialize_f32(*v),
            Self::F64(v) => serializer.serialize_f64(*v),
            Self::Char(v) => serializer.serialize_char(*v),
            Self::String(v) => serializer.serialize_str(v),
            Self::Bytes(v) => serializer.serialize_bytes(v),
            Self::None => serializer.serialize_none(),
            Self::Some(v) => serializer.serialize_some(v),
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

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ContentVisitor)
    }
}
