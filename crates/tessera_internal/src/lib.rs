//! Internal crate for `tessera`.
//!
//! This module is separated into its own crate to enable simple dynamic
//! linking for `tessera`, and should not be used directly.
//!
//! # Examples
//!
//! ```rust
//! use tessera_internal::prelude::*;
//!
//! // All commonly used items are available
//! let compressed = prs::compress(b"hello");
//! let kind = FormatKind::Prs;
//! ```

/// `use tessera_internal::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export tessera_types for convenience
pub use tessera_types;
