//! Best-effort harvesting of values of a known type from documents of unknown shape.

use crate::{
    de::{content::DeserializeMode, position::Position},
    value::content::Content,
};
use serde::{
    de::DeserializeOwned, ser::SerializeSeq, Deserialize, Deserializer, Serialize, Serializer,
};
use std::ops::Deref;

/// Collects every value decodable as `T` found inside `content`.
///
/// A keyed or ordered top level is scanned child by child. A scalar top level yields itself when
/// it decodes as `T`, and nothing otherwise. Never fails.
pub fn extract<'a, T>(content: &'a Content) -> Vec<T>
where
    T: Deserialize<'a>,
{
    extract_from(&Position::root(content))
}

/// Same as [`extract`], with an explicit mode for decoding the target type.
pub fn extract_as<'a, T>(content: &'a Content, mode: DeserializeMode) -> Vec<T>
where
    T: Deserialize<'a>,
{
    extract_from(&Position::root(content).with_mode(mode))
}

pub fn extract_from<'a, T>(position: &Position<'a>) -> Vec<T>
where
    T: Deserialize<'a>,
{
    if let Ok(keyed) = position.open_keyed() {
        keyed.decode_instances()
    } else if let Ok(mut sequence) = position.open_sequence() {
        sequence.decode_instances()
    } else {
        position.decode().map(|value| vec![value]).unwrap_or_default()
    }
}

/// Scans one child position: takes it whole when it decodes as `T`, otherwise descends into it
/// when it is a container, otherwise drops it.
pub(crate) fn harvest<'a, T>(position: Position<'a>, result: &mut Vec<T>)
where
    T: Deserialize<'a>,
{
    if let Ok(value) = position.decode() {
        result.push(value);
    } else if let Ok(keyed) = position.open_keyed() {
        result.extend(keyed.decode_instances());
    } else if let Ok(mut sequence) = position.open_sequence() {
        result.extend(sequence.decode_instances());
    }
}

/// Collection of every `T` found anywhere inside a decoded document.
///
/// Deserializing never fails on content that does not match `T`; mismatching values are skipped.
/// Serializes back as a plain sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstancesOf<T> {
    elements: Vec<T>,
}

impl<T> Default for InstancesOf<T> {
    fn default() -> Self {
        Self { elements: vec![] }
    }
}

impl<T> InstancesOf<T> {
    pub fn new(elements: Vec<T>) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    pub fn into_inner(self) -> Vec<T> {
        self.elements
    }
}

impl<T> InstancesOf<T>
where
    T: DeserializeOwned,
{
    pub fn from_content(content: &Content) -> Self {
        Self::new(extract(content))
    }
}

impl<T> Deref for InstancesOf<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl<T> From<Vec<T>> for InstancesOf<T> {
    fn from(elements: Vec<T>) -> Self {
        Self::new(elements)
    }
}

impl<T> From<InstancesOf<T>> for Vec<T> {
    fn from(instances: InstancesOf<T>) -> Self {
        instances.elements
    }
}

impl<T> FromIterator<T> for InstancesOf<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for InstancesOf<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a InstancesOf<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T> Serialize for InstancesOf<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.elements.len()))?;
        for item in &self.elements {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

impl<'de, T> Deserialize<'de> for InstancesOf<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let content = Content::deserialize(deserializer)?;
        Ok(Self::from_content(&content))
    }
}
