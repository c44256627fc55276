pub mod any;
pub mod content;
pub mod key;
