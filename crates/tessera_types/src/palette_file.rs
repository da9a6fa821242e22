//! The SVP/GVP external palette companion file (§6): a standalone file
//! carrying just the palette for an indexed texture whose data chunk was
//! written without one.
//!
//! ```text
//! u16 LE entry_count | encoded palette entries (entry_count * pixel_bpp bytes)
//! ```
//!
//! Unlike the texture container's own chunk headers, this tiny wrapper is
//! the same shape regardless of which device family the texture belongs to
//! — the entry count is always little-endian, and the palette bytes
//! themselves use whichever [`PixelCodec`] the texture's `pixel_format`
//! names.

use crate::error::{Error, Result};
use crate::pixel::{self, PixelCodec, Rgba8};

/// Parses a companion palette file's payload, decoding however many entries
/// its header declares.
pub fn decode(bytes: &[u8], codec: &PixelCodec) -> Result<Vec<Rgba8>> {
	if bytes.len() < 2 {
		return Err(Error::Truncated(format!(
			"palette file needs a 2-byte entry-count header, has {} bytes",
			bytes.len()
		)));
	}
	let count = u16::from_le_bytes([bytes[0], bytes[1]]) as usize;
	let body = &bytes[2..];
	let needed = count * codec.format.bytes_per_sample();
	if body.len() < needed {
		return Err(Error::Truncated(format!(
			"palette file declares {count} entries ({needed} bytes), body has {}",
			body.len()
		)));
	}
	codec.decode_palette(body, count)
}

/// Builds a companion palette file's payload from `palette`, padding or
/// truncating to exactly `count` entries (matching the indexed data
/// format's palette capacity) and writing the little-endian entry-count
/// header.
pub fn encode(palette: &[Rgba8], count: usize, pixel_format: crate::format::PixelFormat) -> Result<Vec<u8>> {
	let codec = pixel::codec_for(pixel_format)?;
	let mut out = Vec::with_capacity(2 + count * codec.format.bytes_per_sample());
	out.extend_from_slice(&(count as u16).to_le_bytes());
	out.extend(codec.encode_palette(palette, count));
	Ok(out)
}
