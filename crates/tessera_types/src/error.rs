//! Crate-wide error taxonomy.
//!
//! Unlike the teacher's per-format error enums (`PftError`, `DskError`, ...),
//! this crate uses a single `thiserror`-derived [`Error`] shared by the PRS
//! codec, texture container, and AFS archive engine: the spec this crate
//! implements defines exactly one error taxonomy spanning all three
//! subsystems, so splitting it per module would just scatter one concept
//! across several names.

use thiserror::Error;

use crate::format::{DataFormat, PixelFormat};

/// Errors produced while decoding, encoding, or navigating a format this
/// crate understands.
#[derive(Debug, Error)]
pub enum Error {
	/// The input ended before a required field or back-reference target.
	#[error("truncated input: {0}")]
	Truncated(String),

	/// A signature probe failed to match the expected magic bytes.
	#[error("bad magic: expected {expected}, found {found:02X?}")]
	BadMagic {
		/// Human-readable description of what was expected.
		expected: &'static str,
		/// The bytes actually found.
		found: Vec<u8>,
	},

	/// No pixel codec is registered for this format, or it cannot operate
	/// in the requested direction.
	#[error("unsupported pixel format: {0:?}")]
	UnsupportedPixelFormat(PixelFormat),

	/// No data codec is registered for this format, or it cannot operate in
	/// the requested direction.
	#[error("unsupported data format: {0:?}")]
	UnsupportedDataFormat(DataFormat),

	/// An indexed texture was read without an internal palette and no
	/// external palette has been supplied yet via `set_palette`. Recoverable:
	/// the caller can supply a palette stream and retry.
	#[error("texture needs an external palette before it can be decoded")]
	NeedsExternalPalette,

	/// The source bitmap has more distinct colors than the target palette
	/// can hold.
	#[error("palette overflow: {distinct_colors} distinct colors exceed capacity {capacity}")]
	PaletteOverflow {
		/// Number of distinct colors found in the source bitmap.
		distinct_colors: usize,
		/// Maximum number of entries the palette mode supports.
		capacity: usize,
	},

	/// A property was accessed on a handle before it finished initializing.
	#[error("accessed before initialization completed")]
	NotInitialized,

	/// A caller-supplied setting was out of range or otherwise invalid.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// A PRS back-reference points before the start of the decoded output.
	#[error("invalid back-reference: offset {offset} precedes start of output (position {position})")]
	InvalidBackref {
		/// Current write position in the output buffer.
		position: usize,
		/// Absolute back-reference target that fell out of range.
		offset: isize,
	},

	/// Underlying I/O failure.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// Propagated stream-layer error.
	#[error(transparent)]
	Vfs(#[from] tessera_vfs::Error),
}

/// Convenience alias for results within this crate.
pub type Result<T> = std::result::Result<T, Error>;
