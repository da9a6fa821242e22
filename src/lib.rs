#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core codecs and container readers/writers for a family of console asset
//! pipelines: the PRS compression codec, the texture transcoder (GBIX/PVRT/
//! GVRT), and the AFS archive engine.
//!
//! This crate is deliberately thin: it re-exports [`tessera_internal`], which
//! in turn re-exports the actual format logic in `tessera_types`. Front-ends
//! (GUI, CLI, filesystem enumeration, application-level logging) are expected
//! to be built on top of these interfaces rather than inside this crate.

pub use tessera_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use tessera_dylib;
