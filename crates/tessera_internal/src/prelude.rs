//! Prelude module for `tessera_internal`.
//!
//! This module provides a convenient way to import commonly used types and
//! traits.
//!
//! # Examples
//!
//! ```rust
//! use tessera_internal::prelude::*;
//!
//! // Now you can use all common items directly
//! let compressed = prs::compress(b"hello");
//! let texture = Texture::from_bitmap(1, 1, vec![Rgba8::new(255, 0, 0, 255)]).unwrap();
//! ```

// Re-export everything from tessera_types::prelude
#[doc(inline)]
pub use tessera_types::prelude::*;

// Re-export the entire tessera_types module for advanced usage
#[doc(inline)]
pub use tessera_types;
