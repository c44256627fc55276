use crate::{
    de::content::{deserialize_as, DeserializeMode},
    error::*,
    extract,
    value::{content::Content, key::FlexibleKey},
};
use serde::Deserialize;
use std::fmt;

/// Location of a position inside a document, as the keys and indices leading to it.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Path(Vec<FlexibleKey>);

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child<K>(&self, key: K) -> Self
    where
        K: Into<FlexibleKey>,
    {
        let mut segments = self.0.clone();
        segments.push(key.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[FlexibleKey] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("$")?;
        for segment in &self.0 {
            match segment {
                FlexibleKey::Integer(v) => write!(formatter, "[{}]", v)?,
                FlexibleKey::Text(v) => write!(formatter, ".{}", v)?,
            }
        }
        Ok(())
    }
}

/// One unconsumed position of a buffered document.
///
/// Every interpretation (sequence, keyed container, scalar) reads the same buffered content, so
/// a failed attempt never consumes anything.
#[derive(Debug, Clone)]
pub struct Position<'a> {
    content: &'a Content,
    path: Path,
    mode: DeserializeMode,
}

impl<'a> Position<'a> {
    pub fn root(content: &'a Content) -> Self {
        Self::new(content, Path::root(), Default::default())
    }

    fn new(content: &'a Content, path: Path, mode: DeserializeMode) -> Self {
        Self {
            content: content.inner(),
            path,
            mode,
        }
    }

    pub fn with_mode(mut self, mode: DeserializeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn content(&self) -> &'a Content {
        self.content
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> DeserializeMode {
        self.mode
    }

    pub fn open_sequence(&self) -> Result<SequenceCursor<'a>> {
        match self.content {
            Content::Seq(values) => Ok(SequenceCursor {
                values,
                index: 0,
                path: self.path.clone(),
                mode: self.mode,
            }),
            _ => Err(Error::NotSeq {
                path: self.path.clone(),
            }),
        }
    }

    pub fn open_keyed(&self) -> Result<KeyedCursor<'a>> {
        match self.content {
            Content::Map(entries) => Ok(KeyedCursor {
                entries,
                path: self.path.clone(),
                mode: self.mode,
            }),
            _ => Err(Error::NotMap {
                path: self.path.clone(),
            }),
        }
    }

    /// Decodes the position with the position's own mode.
    pub fn decode<T>(&self) -> Result<T>
    where
        T: Deserialize<'a>,
    {
        deserialize_as(self.content, self.mode)
    }

    /// Decodes the position as a single scalar, only accepting content of the scalar's own kind.
    pub fn decode_scalar<T>(&self) -> Result<T>
    where
        T: Deserialize<'a>,
    {
        deserialize_as(self.content, DeserializeMode::Exact)
    }
}

/// Forward-only cursor over the elements of an ordered container.
#[derive(Debug, Clone)]
pub struct SequenceCursor<'a> {
    values: &'a [Content],
    index: usize,
    path: Path,
    mode: DeserializeMode,
}

impl<'a> SequenceCursor<'a> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.values.len()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn peek_position(&self) -> Option<Position<'a>> {
        self.values.get(self.index).map(|content| {
            Position::new(
                content,
                self.path.child(FlexibleKey::Integer(self.index as _)),
                self.mode,
            )
        })
    }

    /// Hands out the current position and moves past it.
    pub fn next_position(&mut self) -> Option<Position<'a>> {
        let position = self.peek_position()?;
        self.index += 1;
        Some(position)
    }

    /// Decodes the current position. The cursor only advances when decoding succeeds.
    pub fn decode_next<T>(&mut self) -> Result<T>
    where
        T: Deserialize<'a>,
    {
        let position = self.peek_position().ok_or_else(|| Error::MissingKey {
            path: self.path.child(FlexibleKey::Integer(self.index as _)),
        })?;
        let value = position.decode()?;
        self.index += 1;
        Ok(value)
    }

    pub fn skip(&mut self) {
        if !self.is_exhausted() {
            self.index += 1;
        }
    }

    /// Harvests every value decodable as `T` from all remaining positions, descending into
    /// nested containers. Consumes the cursor to its end.
    pub fn decode_instances<T>(&mut self) -> Vec<T>
    where
        T: Deserialize<'a>,
    {
        let mut result = vec![];
        while let Some(position) = self.next_position() {
            extract::harvest(position, &mut result);
        }
        result
    }
}

impl<'a> Iterator for SequenceCursor<'a> {
    type Item = Position<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_position()
    }
}

/// Cursor over the entries of a keyed container.
#[derive(Debug, Clone)]
pub struct KeyedCursor<'a> {
    entries: &'a [(Content, Content)],
    path: Path,
    mode: DeserializeMode,
}

impl<'a> KeyedCursor<'a> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn key_at(&self, index: usize, key: &Content) -> Result<FlexibleKey> {
        FlexibleKey::from_structural_key(
            key,
            &self.path.child(FlexibleKey::Integer(index as _)),
        )
    }

    pub fn all_keys(&self) -> Result<Vec<FlexibleKey>> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, (key, _))| self.key_at(index, key))
            .collect()
    }

    /// Every entry in enumeration order, with its key normalized.
    pub fn entries(&self) -> Result<Vec<(FlexibleKey, Position<'a>)>> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, (key, value))| {
                let key = self.key_at(index, key)?;
                let path = self.path.child(key.clone());
                Ok((key, Position::new(value, path, self.mode)))
            })
            .collect()
    }

    /// Position of the value stored under `key`. When a key repeats, the last entry wins.
    pub fn position(&self, key: &FlexibleKey) -> Result<Position<'a>> {
        self.entries
            .iter()
            .enumerate()
            .rev()
            .find(|(index, (k, _))| self.key_at(*index, k).is_ok_and(|k| &k == key))
            .map(|(_, (_, value))| Position::new(value, self.path.child(key.clone()), self.mode))
            .ok_or_else(|| Error::MissingKey {
                path: self.path.child(key.clone()),
            })
    }

    pub fn decode<T>(&self, key: &FlexibleKey) -> Result<T>
    where
        T: Deserialize<'a>,
    {
        self.position(key)?.decode()
    }

    /// Harvests every value decodable as `T` from all entry values, descending into nested
    /// containers. Entries whose keys cannot be normalized are still scanned.
    pub fn decode_instances<T>(&self) -> Vec<T>
    where
        T: Deserialize<'a>,
    {
        let mut result = vec![];
        for (index, (key, value)) in self.entries.iter().enumerate() {
            let segment = self
                .key_at(index, key)
                .unwrap_or(FlexibleKey::Integer(index as _));
            let position = Position::new(value, self.path.child(segment), self.mode);
            extract::harvest(position, &mut result);
        }
        result
    }
}
