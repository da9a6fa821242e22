//! Core format logic for `tessera`: the PRS compression codec, the pixel and
//! data codec tables used by the texture transcoder, the texture container
//! (GBIX/GCIX + PVRT/GVRT), the AFS archive engine, and the format registry
//! that ties them together.
//!
//! # Examples
//!
//! ```rust
//! use tessera_types::prs;
//!
//! let original = b"ABABABAB";
//! let compressed = prs::compress(original);
//! let restored = prs::decompress(&compressed).unwrap();
//! assert_eq!(restored, original);
//! ```

pub mod afs;
pub mod data;
pub mod error;
pub mod format;
pub mod palette_file;
pub mod pixel;
pub mod prelude;
pub mod prs;
pub mod registry;
pub mod texture;

pub use error::{Error, Result};

// Re-export the vfs crate for convenience, so callers that only depend on
// `tessera_types` (or anything built on top of it) don't need a separate
// path dependency on `tessera_vfs` just to build a `Stream`.
pub use tessera_vfs;
