//! Store - Document format, serialization, and engine settings
//!
//! This crate turns a shape manager's state into a versioned `MonoFile`
//! JSON document and back, and holds the tunables the other crates read.
//! It performs no file I/O.

mod error;
mod format;
mod serializer;
mod settings;

pub use error::*;
pub use format::*;
pub use serializer::*;
pub use settings::*;
