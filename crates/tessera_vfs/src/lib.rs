//! Stream and byte-helper primitives shared by every format in this toolkit.
//!
//! This crate is the lowest leaf of the workspace: the offset-oriented
//! [`Stream`] cursor, little-endian/big-endian integer read/write helpers,
//! fixed-width C-string fields, padded copies, and signature probing. Every
//! format handler in `tessera_types` is built on top of these.

pub mod error;
pub mod stream;
pub mod write;

pub use error::{Error, Result};
pub use stream::Stream;
