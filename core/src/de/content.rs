use crate::{error::*, value::content::*};
use serde::{
    de::{
        DeserializeSeed, EnumAccess, IntoDeserializer, MapAccess, SeqAccess, Unexpected,
        VariantAccess, Visitor,
    },
    forward_to_deserialize_any, Deserialize,
};

/// How strictly scalar reads match the buffered content.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum DeserializeMode {
    /// Scalars are only read from content of their own kind: bool from bool, strings from
    /// strings or chars, bytes from bytes, `f32` from floats whose magnitude fits `f32`.
    Exact,
    /// Serde's usual primitive rules apply.
    #[default]
    Interpret,
}

pub fn deserialize<'a, T>(value: &'a Content) -> Result<T>
where
    T: Deserialize<'a>,
{
    T::deserialize(Deserializer::from_content(value, Default::default()))
}

pub fn deserialize_as<'a, T>(value: &'a Content, mode: DeserializeMode) -> Result<T>
where
    T: Deserialize<'a>,
{
    T::deserialize(Deserializer::from_content(value, mode))
}

#[derive(Debug)]
pub struct Deserializer<'de> {
    input: &'de Content,
    mode: DeserializeMode,
}

impl<'de> Deserializer<'de> {
    pub fn from_content(input: &'de Content, mode: DeserializeMode) -> Self {
        Self { input, mode }
    }

    fn is_exact(&self) -> bool {
        self.mode == DeserializeMode::Exact
    }

    fn invalid_type<V>(&self, visitor: &V) -> Error
    where
        V: Visitor<'de>,
    {
        serde::de::Error::invalid_type(self.input.unexpected(), visitor)
    }
}

impl<'de> serde::de::Deserializer<'de> for Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.input {
            Content::Unit => visitor.visit_unit(),
            Content::Bool(v) => visitor.visit_bool(*v),
            Content::I8(v) => visitor.visit_i8(*v),
            Content::I16(v) => visitor.visit_i16(*v),
            Content::I32(v) => visitor.visit_i32(*v),
            Content::I64(v) => visitor.visit_i64(*v),
            Content::U8(v) => visitor.visit_u8(*v),
            Content::U16(v) => visitor.visit_u16(*v),
            Content::U32(v) => visitor.visit_u32(*v),
            Content::U64(v) => visitor.visit_u64(*v),
            Content::F32(v) => visitor.visit_f32(*v),
            Content::F64(v) => visitor.visit_f64(*v),
            Content::Char(v) => visitor.visit_char(*v),
            Content::String(v) => visitor.visit_borrowed_str(v),
            Content::Bytes(v) => visitor.visit_borrowed_bytes(v),
            Content::None => visitor.visit_none(),
            Content::Some(v) => visitor.visit_some(Self::from_content(v, self.mode)),
            Content::Seq(v) => SeqDeserializer::visit(v, self.mode, visitor),
            Content::Map(v) => MapDeserializer::visit(v, self.mode, visitor),
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.is_exact() {
            return match self.input {
                Content::Bool(v) => visitor.visit_bool(*v),
                _ => Err(self.invalid_type(&visitor)),
            };
        }
        self.deserialize_any(visitor)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.is_exact() {
            if let Content::F64(v) = self.input {
                if v.is_finite() && v.abs() > f32::MAX as f64 {
                    return Err(serde::de::Error::invalid_value(
                        Unexpected::Float(*v),
                        &visitor,
                    ));
                }
            }
        }
        self.deserialize_any(visitor)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.is_exact() {
            return match self.input {
                Content::String(v) => visitor.visit_borrowed_str(v),
                Content::Char(v) => visitor.visit_str(v.encode_utf8(&mut [0; 4])),
                _ => Err(self.invalid_type(&visitor)),
            };
        }
        self.deserialize_any(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.is_exact() {
            return match self.input {
                Content::Bytes(v) => visitor.visit_borrowed_bytes(v),
                _ => Err(self.invalid_type(&visitor)),
            };
        }
        self.deserialize_any(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.input {
            Content::None | Content::Unit => visitor.visit_none(),
            Content::Some(v) => visitor.visit_some(Self::from_content(v, self.mode)),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.input {
            Content::None | Content::Unit => visitor.visit_unit(),
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_unit_struct<V>(self, _: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _: &'static str,
        _: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.input {
            Content::String(name) => visitor.visit_enum(EnumDeserializer {
                name,
                content: None,
                mode: self.mode,
            }),
            Content::Map(v) if v.len() == 1 => match v.first() {
                Some((Content::String(name), content)) => visitor.visit_enum(EnumDeserializer {
                    name,
                    content: Some(content),
                    mode: self.mode,
                }),
                _ => self.deserialize_any(visitor),
            },
            _ => self.deserialize_any(visitor),
        }
    }

    forward_to_deserialize_any! {
        i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f64 char seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

#[derive(Debug)]
pub struct SeqDeserializer<'de> {
    values: &'de [Content],
    index: usize,
    mode: DeserializeMode,
}

impl<'de> SeqDeserializer<'de> {
    /// Visits all elements. Fails when the visitor stops before the end of the sequence.
    fn visit<V>(values: &'de [Content], mode: DeserializeMode, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let mut access = Self {
            values,
            index: 0,
            mode,
        };
        let result = visitor.visit_seq(&mut access)?;
        if access.index < values.len() {
            return Err(serde::de::Error::invalid_length(
                values.len(),
                &"fewer elements in sequence",
            ));
        }
        Ok(result)
    }
}

impl<'de> SeqAccess<'de> for SeqDeserializer<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        if let Some(value) = self.values.get(self.index) {
            self.index += 1;
            return seed
                .deserialize(Deserializer::from_content(value, self.mode))
                .map(Some);
        }
        Ok(None)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.values.len() - self.index)
    }
}

#[derive(Debug)]
pub struct MapDeserializer<'de> {
    values: &'de [(Content, Content)],
    index: usize,
    mode: DeserializeMode,
}

impl<'de> MapDeserializer<'de> {
    /// Visits all entries. Fails when the visitor stops before the end of the map.
    fn visit<V>(
        values: &'de [(Content, Content)],
        mode: DeserializeMode,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let mut access = Self {
            values,
            index: 0,
            mode,
        };
        let result = visitor.visit_map(&mut access)?;
        if access.index < values.len() {
            return Err(serde::de::Error::invalid_length(
                values.len(),
                &"fewer elements in map",
            ));
        }
        Ok(result)
    }
}

impl<'de> MapAccess<'de> for MapDeserializer<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        if let Some((key, _)) = self.values.get(self.index) {
            return seed
                .deserialize(Deserializer::from_content(key, self.mode))
                .map(Some);
        }
        Ok(None)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        if let Some((_, value)) = self.values.get(self.index) {
            self.index += 1;
            return seed.deserialize(Deserializer::from_content(value, self.mode));
        }
        Err(Error::ExpectedMapEntry)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.values.len() - self.index)
    }
}

#[derive(Debug)]
struct EnumDeserializer<'de> {
    name: &'de str,
    content: Option<&'de Content>,
    mode: DeserializeMode,
}

impl<'de> EnumAccess<'de> for EnumDeserializer<'de> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: DeserializeSeed<'de>,
    {
        let name = seed.deserialize(<&str as IntoDeserializer<'de, Error>>::into_deserializer(
            self.name,
        ))?;
        Ok((name, self))
    }
}

impl<'de> VariantAccess<'de> for EnumDeserializer<'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.content {
            None | Some(Content::Unit) => Ok(()),
            _ => Err(Error::ExpectedUnitVariant),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        match self.content {
            Some(content) => seed.deserialize(Deserializer::from_content(content, self.mode)),
            None => Err(Error::ExpectedNewTypeVariant),
        }
    }

    fn tuple_variant<V>(self, _: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.content {
            Some(Content::Seq(values)) => SeqDeserializer::visit(values, self.mode, visitor),
            _ => Err(Error::ExpectedTupleVariant),
        }
    }

    fn struct_variant<V>(self, _: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.content {
            Some(Content::Map(values)) => MapDeserializer::visit(values, self.mode, visitor),
            _ => Err(Error::ExpectedStructVariant),
        }
    }
}

macro_rules! impl_visit {
    ($name:ident, $type:ty) => {
        fn $name<E>(self, value: $type) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.into())
        }
    };
}

/// Captures one position of any self-describing format into [`Content`].
#[derive(Copy, Clone)]
pub struct ContentVisitor;

impl<'de> Visitor<'de> for ContentVisitor {
    type Value = Content;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("any self-describing value")
    }

    impl_visit!(visit_bool, bool);
    impl_visit!(visit_i8, i8);
    impl_visit!(visit_i16, i16);
    impl_visit!(visit_i32, i32);
    impl_visit!(visit_i64, i64);
    impl_visit!(visit_u8, u8);
    impl_visit!(visit_u16, u16);
    impl_visit!(visit_u32, u32);
    impl_visit!(visit_u64, u64);
    impl_visit!(visit_f32, f32);
    impl_visit!(visit_f64, f64);
    impl_visit!(visit_char, char);
    impl_visit!(visit_str, &str);
    impl_visit!(visit_string, String);

    fn visit_bytes<E>(self, value: &[u8]) -> std::result::Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Content::Bytes(value.to_owned()))
    }

    fn visit_byte_buf<E>(self, value: Vec<u8>) -> std::result::Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Content::Bytes(value))
    }

    fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Content::None)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        Ok(Content::Some(Box::new(Content::deserialize(deserializer)?)))
    }

    fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Content::Unit)
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        Content::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut result = Vec::with_capacity(access.size_hint().unwrap_or_default());
        while let Some(v) = access.next_element()? {
            result.push(v);
        }
        Ok(Content::Seq(result))
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut result = Vec::with_capacity(access.size_hint().unwrap_or_default());
        while let Some((k, v)) = access.next_entry()? {
            result.push((k, v));
        }
        Ok(Content::Map(result))
    }
}
