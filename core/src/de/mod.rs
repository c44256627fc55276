pub mod content;
pub mod position;
pub mod probe;
