//! Prelude module for `tessera_types`.
//!
//! This module re-exports the types most callers reach for, so a handler
//! implementation or an orchestrator only needs one `use`.
//!
//! # Examples
//!
//! ```no_run
//! use tessera_types::prelude::*;
//!
//! let compressed = prs::compress(b"hello");
//! let kind = FormatKind::Prs;
//! ```

#[doc(inline)]
pub use crate::afs::{Afs, AfsEntry, AfsSettings, AfsVersion};

#[doc(inline)]
pub use crate::error::{Error, Result};

#[doc(inline)]
pub use crate::format::{DataFormat, Layout, PaletteMode, PixelFormat};

#[doc(inline)]
pub use crate::pixel::Rgba8;

#[doc(inline)]
pub use crate::registry::{FormatKind, HandlerDescriptor};

#[doc(inline)]
pub use crate::texture::{Family, HeaderVariant, Texture, TextureSettings};

#[doc(inline)]
pub use crate::{data, palette_file, pixel, prs, registry};
