use crate::de::position::Path;
use std::fmt::Display;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{0}")]
    Message(String),
    /// No candidate of the decode probe matched the value at this path.
    #[error("value at {path} cannot be represented as AnyValue")]
    TypeMismatch { path: Path },
    /// Map key at this path is neither an integer nor a string.
    #[error("key at {path} is neither an integer nor a string")]
    KeyDecodeFailure { path: Path },
    #[error("value at {path} is not a sequence")]
    NotSeq { path: Path },
    #[error("value at {path} is not a map")]
    NotMap { path: Path },
    #[error("no entry at {path}")]
    MissingKey { path: Path },
    #[error("expected map entry")]
    ExpectedMapEntry,
    #[error("expected unit variant")]
    ExpectedUnitVariant,
    #[error("expected newtype variant")]
    ExpectedNewTypeVariant,
    #[error("expected tuple variant")]
    ExpectedTupleVariant,
    #[error("expected struct variant")]
    ExpectedStructVariant,
}

impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}
