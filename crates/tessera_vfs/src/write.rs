//! Byte-level write helpers mirroring [`crate::Stream`]'s read side.
//!
//! These are free functions over `std::io::Write` rather than methods on a
//! cursor type: writers in this toolkit build output incrementally into
//! whatever sink the caller supplies (an in-memory `Vec<u8>`, a `File`, ...),
//! and never need to seek backwards mid-stream.

use std::io::Write;

use crate::error::Result;

/// Writes a single byte.
pub fn write_u8<W: Write>(w: &mut W, v: u8) -> Result<()> {
	w.write_all(&[v])?;
	Ok(())
}

/// Writes a little-endian `u16`.
pub fn write_u16_le<W: Write>(w: &mut W, v: u16) -> Result<()> {
	w.write_all(&v.to_le_bytes())?;
	Ok(())
}

/// Writes a big-endian `u16`.
pub fn write_u16_be<W: Write>(w: &mut W, v: u16) -> Result<()> {
	w.write_all(&v.to_be_bytes())?;
	Ok(())
}

/// Writes a little-endian `u32`.
pub fn write_u32_le<W: Write>(w: &mut W, v: u32) -> Result<()> {
	w.write_all(&v.to_le_bytes())?;
	Ok(())
}

/// Writes a big-endian `u32`.
pub fn write_u32_be<W: Write>(w: &mut W, v: u32) -> Result<()> {
	w.write_all(&v.to_be_bytes())?;
	Ok(())
}

/// Writes a little-endian `i16`.
pub fn write_i16_le<W: Write>(w: &mut W, v: i16) -> Result<()> {
	write_u16_le(w, v as u16)
}

/// Writes a little-endian `i32`.
pub fn write_i32_le<W: Write>(w: &mut W, v: i32) -> Result<()> {
	write_u32_le(w, v as u32)
}

/// Writes `s` into a `len`-byte field, truncating if too long and
/// zero-padding if too short (the fixed-width C-string convention used by
/// AFS entry names and similar tables).
pub fn write_fixed_string<W: Write>(w: &mut W, s: &str, len: usize) -> Result<()> {
	let mut field = vec![0u8; len];
	let bytes = s.as_bytes();
	let n = bytes.len().min(len);
	field[..n].copy_from_slice(&bytes[..n]);
	w.write_all(&field)?;
	Ok(())
}

/// Copies `src` verbatim, then pads with `pad_byte` up to the next multiple
/// of `block` (no padding is emitted if `src.len()` is already a multiple).
pub fn copy_padded<W: Write>(src: &[u8], dst: &mut W, block: usize, pad_byte: u8) -> Result<()> {
	dst.write_all(src)?;
	if block > 0 {
		let rem = src.len() % block;
		if rem != 0 {
			let pad = block - rem;
			dst.write_all(&vec![pad_byte; pad])?;
		}
	}
	Ok(())
}

/// Rounds `len` up to the next multiple of `block` (`block == 0` is the
/// identity).
pub const fn round_up(len: usize, block: usize) -> usize {
	if block == 0 {
		return len;
	}
	let rem = len % block;
	if rem == 0 { len } else { len + (block - rem) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn copy_padded_pads_to_block_boundary() {
		let mut out = Vec::new();
		copy_padded(b"hello", &mut out, 8, 0).unwrap();
		assert_eq!(out, b"hello\0\0\0");
	}

	#[test]
	fn copy_padded_no_padding_when_aligned() {
		let mut out = Vec::new();
		copy_padded(b"01234567", &mut out, 8, 0xAA).unwrap();
		assert_eq!(out, b"01234567");
	}

	#[test]
	fn fixed_string_truncates_and_pads() {
		let mut out = Vec::new();
		write_fixed_string(&mut out, "hi.dat", 8).unwrap();
		assert_eq!(out, b"hi.dat\0\0");

		let mut out2 = Vec::new();
		write_fixed_string(&mut out2, "a_very_long_name.bin", 8).unwrap();
		assert_eq!(out2, b"a_very_l");
	}

	#[test]
	fn round_up_matches_block_arithmetic() {
		assert_eq!(round_up(0, 2048), 0);
		assert_eq!(round_up(1, 2048), 2048);
		assert_eq!(round_up(2048, 2048), 2048);
		assert_eq!(round_up(2049, 2048), 4096);
	}
}
