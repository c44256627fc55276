use crate::{error::*, value::content::*};
use serde::Serialize;

macro_rules! impl_serialize {
    ($name:ident, $variant:ident, $type:ident) => {
        fn $name(self, v: $type) -> Result<Self::Ok> {
            Ok(Content::$variant(v))
        }
    };
}

/// Encodes any serializable value into buffered [`Content`].
///
/// Enums are written externally tagged: unit variants as their name, every other variant as a
/// single-entry map from the name to the payload.
pub fn serialize<T>(value: &T) -> Result<Content>
where
    T: ?Sized + Serialize,
{
    value.serialize(Serializer)
}

pub struct Serializer;

impl serde::ser::Serializer for Serializer {
    type Ok = Content;
    type Error = Error;
    type SerializeSeq = SeqSerializer;
    type SerializeTuple = SeqSerializer;
    type SerializeTupleStruct = SeqSerializer;
    type SerializeTupleVariant = VariantSerializer<SeqSerializer>;
    type SerializeMap = MapSerializer;
    type SerializeStruct = MapSerializer;
    type SerializeStructVariant = VariantSerializer<MapSerializer>;

    impl_serialize!(serialize_bool, Bool, bool);
    impl_serialize!(serialize_i8, I8, i8);
    impl_serialize!(serialize_i16, I16, i16);
    impl_serialize!(serialize_i32, I32, i32);
    impl_serialize!(serialize_i64, I64, i64);
    impl_serialize!(serialize_u8, U8, u8);
    impl_serialize!(serialize_u16, U16, u16);
    impl_serialize!(serialize_u32, U32, u32);
    impl_serialize!(serialize_u64, U64, u64);
    impl_serialize!(serialize_f32, F32, f32);
    impl_serialize!(serialize_f64, F64, f64);
    impl_serialize!(serialize_char, Char, char);

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        Ok(Content::String(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        Ok(Content::Bytes(v.to_owned()))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(Content::None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Ok(Content::Some(Box::new(value.serialize(self)?)))
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(Content::Unit)
    }

    fn serialize_unit_struct(self, _: &'static str) -> Result<Self::Ok> {
        Ok(Content::Unit)
    }

    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        Ok(Content::String(variant.to_owned()))
    }

    fn serialize_newtype_struct<T>(self, _: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Ok(Content::Map(vec![(
            Content::String(variant.to_owned()),
            value.serialize(self)?,
        )]))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SeqSerializer {
            values: Vec::with_capacity(len.unwrap_or_default()),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(VariantSerializer {
            variant,
            inner: self.serialize_seq(Some(len))?,
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(MapSerializer {
            values: Vec::with_capacity(len.unwrap_or_default()),
            pending: None,
        })
    }

    fn serialize_struct(self, _: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(VariantSerializer {
            variant,
            inner: self.serialize_map(Some(len))?,
        })
    }
}

pub struct SeqSerializer {
    values: Vec<Content>,
}

impl SeqSerializer {
    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.values.push(value.serialize(Serializer)?);
        Ok(())
    }
}

impl serde::ser::SerializeSeq for SeqSerializer {
    type Ok = Content;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Content::Seq(self.values))
    }
}

impl serde::ser::SerializeTuple for SeqSerializer {
    type Ok = Content;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Content::Seq(self.values))
    }
}

impl serde::ser::SerializeTupleStruct for SeqSerializer {
    type Ok = Content;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Content::Seq(self.values))
    }
}

pub struct MapSerializer {
    values: Vec<(Content, Content)>,
    pending: Option<Content>,
}

impl serde::ser::SerializeMap for MapSerializer {
    type Ok = Content;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.pending = Some(key.serialize(Serializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self.pending.take().ok_or(Error::ExpectedMapEntry)?;
        self.values.push((key, value.serialize(Serializer)?));
        Ok(())
    }

    fn serialize_entry<K, V>(&mut self, key: &K, value: &V) -> Result<()>
    where
        K: ?Sized + Serialize,
        V: ?Sized + Serialize,
    {
        self.values
            .push((key.serialize(Serializer)?, value.serialize(Serializer)?));
        Ok(())
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Content::Map(self.values))
    }
}

impl serde::ser::SerializeStruct for MapSerializer {
    type Ok = Content;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.values.push((
            Content::String(key.to_owned()),
            value.serialize(Serializer)?,
        ));
        Ok(())
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Content::Map(self.values))
    }
}

/// Wraps a tuple or struct variant payload as `{ variant: payload }`.
pub struct VariantSerializer<S> {
    variant: &'static str,
    inner: S,
}

impl VariantSerializer<SeqSerializer> {
    fn wrap(self) -> Content {
        Content::Map(vec![(
            Content::String(self.variant.to_owned()),
            Content::Seq(self.inner.values),
        )])
    }
}

impl VariantSerializer<MapSerializer> {
    fn wrap(self) -> Content {
        Content::Map(vec![(
            Content::String(self.variant.to_owned()),
            Content::Map(self.inner.values),
        )])
    }
}

impl serde::ser::SerializeTupleVariant for VariantSerializer<SeqSerializer> {
    type Ok = Content;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(self.wrap())
    }
}

impl serde::ser::SerializeStructVariant for VariantSerializer<MapSerializer> {
    type Ok = Content;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        serde::ser::SerializeStruct::serialize_field(&mut self.inner, key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(self.wrap())
    }
}
