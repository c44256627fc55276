pub mod de;
pub mod error;
pub mod extract;
pub mod ser;
pub mod value;


pub use crate::{
    de::content::deserialize as from_content,
    de::content::DeserializeMode,
    de::position::{KeyedCursor, Path, Position, SequenceCursor},
    error::Error,
    extract::{extract, extract_as, InstancesOf},
    ser::content::serialize as to_content,
    value::{any::AnyValue, content::Content, key::FlexibleKey},
};
