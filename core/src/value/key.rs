use crate::{de::position::Path, error::*, value::content::Content};
use serde::{de::Visitor, Deserialize, Deserializer, Serialize, Serializer};
use std::{borrow::Cow, convert::Infallible, fmt, str::FromStr};

/// Map key that accepts both integer and string keys.
///
/// Equality and hashing are variant-aware: `Integer(1)` and `Text("1")` are two different keys,
/// so documents carrying both never lose an entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlexibleKey {
    Integer(i64),
    Text(String),
}

impl FlexibleKey {
    /// Builds a key from a key read out of a keyed container, preferring the integer form
    /// whenever the key natively holds an integer that fits `i64`. Wider unsigned keys keep
    /// their decimal text.
    pub fn from_structural_key(key: &Content, path: &Path) -> Result<Self> {
        if let Some(v) = key.as_integer() {
            return Ok(Self::Integer(v));
        }
        match key.inner() {
            Content::String(v) => Ok(Self::Text(v.to_owned())),
            Content::Char(v) => Ok(Self::Text(v.to_string())),
            Content::U64(v) => Ok(Self::Text(v.to_string())),
            _ => Err(Error::KeyDecodeFailure { path: path.to_owned() }),
        }
    }

    pub fn text_value(&self) -> Cow<'_, str> {
        match self {
            Self::Integer(v) => Cow::Owned(v.to_string()),
            Self::Text(v) => Cow::Borrowed(v),
        }
    }

    pub fn integer_value(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            Self::Text(v) => v.parse().ok(),
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_))
    }
}

impl fmt::Display for FlexibleKey {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(&self.text_value())
    }
}

impl FromStr for FlexibleKey {
    type Err = Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::Text(value.to_owned()))
    }
}

impl From<&str> for FlexibleKey {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for FlexibleKey {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

macro_rules! impl_from_integer {
    ($type:ty) => {
        impl From<$type> for FlexibleKey {
            fn from(v: $type) -> Self {
                Self::Integer(v as _)
            }
        }
    };
}

impl_from_integer!(i8);
impl_from_integer!(i16);
impl_from_integer!(i32);
impl_from_integer!(i64);
impl_from_integer!(isize);
impl_from_integer!(u8);
impl_from_integer!(u16);
impl_from_integer!(u32);

impl Serialize for FlexibleKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Integer(v) => serializer.serialize_i64(*v),
            Self::Text(v) => serializer.serialize_str(v),
        }
    }
}

struct FlexibleKeyVisitor;

impl<'de> Visitor<'de> for FlexibleKeyVisitor {
    type Value = FlexibleKey;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("integer or string key")
    }

    fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(FlexibleKey::Integer(value))
    }

    fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(i64::try_from(value)
            .map(FlexibleKey::Integer)
            .unwrap_or_else(|_| FlexibleKey::Text(value.to_string())))
    }

    fn visit_char<E>(self, value: char) -> std::result::Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(FlexibleKey::Text(value.to_string()))
    }

    fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(FlexibleKey::Text(value.to_owned()))
    }

    fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(FlexibleKey::Text(value))
    }
}

impl<'de> Deserialize<'de> for FlexibleKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FlexibleKeyVisitor)
    }
}
