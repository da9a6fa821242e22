//! Error type for the stream/byte-helper layer.

use thiserror::Error;

/// Errors raised while reading or writing through a [`crate::Stream`].
#[derive(Debug, Error)]
pub enum Error {
	/// The stream ended before a required field could be read.
	#[error("truncated stream: needed {needed} bytes at offset {offset}, {available} available")]
	Truncated {
		/// Stream-relative offset where the read was attempted.
		offset: usize,
		/// Number of bytes the read required.
		needed: usize,
		/// Number of bytes actually remaining.
		available: usize,
	},

	/// Underlying I/O failure (file access, pipe, etc).
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Convenience alias for results within this crate.
pub type Result<T> = std::result::Result<T, Error>;
