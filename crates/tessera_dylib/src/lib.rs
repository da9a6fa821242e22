//! Dynamic-linking shim for `tessera`.
//!
//! This crate exists only to be built as a `dylib`; it re-exports
//! `tessera_internal` verbatim so the `dynamic_linking` feature on the root
//! crate can link against a single shared object instead of statically
//! duplicating the format logic into every consumer.

pub use tessera_internal::*;
