//! Per-format pixel sample codecs.
//!
//! Channel widths, alpha position, and the N-bit-to-8-bit expansion formula
//! are format-specific and must round-trip at the bit level: `decode` always
//! expands a stored sample to full 8-bit precision, and `encode` quantizes
//! back down to the stored width before re-expanding, so repeated
//! encode/decode cycles stabilize after the first pass.

use super::Rgba8;

/// Expands an `bits`-wide channel value to 8 bits using
/// `(v << (8-bits)) | (v >> (2*bits-8))` for channels of 4 bits or more
/// (the formula the original format documentation specifies), with direct
/// bit replication for the narrower 1-bit and 3-bit alpha channels that
/// appear in `Argb1555` and `Rgb5a3`.
const fn expand_bits(value: u8, bits: u32) -> u8 {
	match bits {
		8 => value,
		1 => {
			if value != 0 {
				0xFF
			} else {
				0x00
			}
		}
		3 => (value << 5) | (value << 2) | (value >> 1),
		n => (value << (8 - n)) | (value >> (2 * n - 8)),
	}
}

/// Quantizes an 8-bit channel value down to `bits` bits (simple truncating
/// shift — the inverse of the widening half of [`expand_bits`]).
const fn quantize_bits(value: u8, bits: u32) -> u8 {
	if bits >= 8 { value } else { value >> (8 - bits) }
}

// ---- ARGB1555: little-endian u16, 1-bit A / 5-bit R / 5-bit G / 5-bit B ----

pub fn decode_argb1555(bytes: &[u8]) -> Rgba8 {
	let word = u16::from_le_bytes([bytes[0], bytes[1]]);
	let a = ((word >> 15) & 0x1) as u8;
	let r = ((word >> 10) & 0x1F) as u8;
	let g = ((word >> 5) & 0x1F) as u8;
	let b = (word & 0x1F) as u8;
	Rgba8::new(expand_bits(r, 5), expand_bits(g, 5), expand_bits(b, 5), expand_bits(a, 1))
}

pub fn encode_argb1555(color: Rgba8) -> Vec<u8> {
	let a = u16::from(if color.a >= 0x80 { 1 } else { 0 });
	let r = u16::from(quantize_bits(color.r, 5));
	let g = u16::from(quantize_bits(color.g, 5));
	let b = u16::from(quantize_bits(color.b, 5));
	let word = (a << 15) | (r << 10) | (g << 5) | b;
	word.to_le_bytes().to_vec()
}

// ---- RGB565: little-endian u16, 5-bit R / 6-bit G / 5-bit B, opaque ----

pub fn decode_rgb565(bytes: &[u8]) -> Rgba8 {
	let word = u16::from_le_bytes([bytes[0], bytes[1]]);
	let r = ((word >> 11) & 0x1F) as u8;
	let g = ((word >> 5) & 0x3F) as u8;
	let b = (word & 0x1F) as u8;
	Rgba8::new(expand_bits(r, 5), expand_bits(g, 6), expand_bits(b, 5), 0xFF)
}

pub fn encode_rgb565(color: Rgba8) -> Vec<u8> {
	let r = u16::from(quantize_bits(color.r, 5));
	let g = u16::from(quantize_bits(color.g, 6));
	let b = u16::from(quantize_bits(color.b, 5));
	let word = (r << 11) | (g << 5) | b;
	word.to_le_bytes().to_vec()
}

// ---- ARGB4444: little-endian u16, 4 bits per channel ----

pub fn decode_argb4444(bytes: &[u8]) -> Rgba8 {
	let word = u16::from_le_bytes([bytes[0], bytes[1]]);
	let a = ((word >> 12) & 0xF) as u8;
	let r = ((word >> 8) & 0xF) as u8;
	let g = ((word >> 4) & 0xF) as u8;
	let b = (word & 0xF) as u8;
	Rgba8::new(expand_bits(r, 4), expand_bits(g, 4), expand_bits(b, 4), expand_bits(a, 4))
}

pub fn encode_argb4444(color: Rgba8) -> Vec<u8> {
	let a = u16::from(quantize_bits(color.a, 4));
	let r = u16::from(quantize_bits(color.r, 4));
	let g = u16::from(quantize_bits(color.g, 4));
	let b = u16::from(quantize_bits(color.b, 4));
	let word = (a << 12) | (r << 8) | (g << 4) | b;
	word.to_le_bytes().to_vec()
}

// ---- RGB5A3: big-endian u16, GameCube two-mode format ----
//
// When the top bit is set the remaining 15 bits are opaque 5-5-5 RGB; when
// clear, they split into 3-bit alpha and 4-4-4 RGB.

pub fn decode_rgb5a3(bytes: &[u8]) -> Rgba8 {
	let word = u16::from_be_bytes([bytes[0], bytes[1]]);
	if word & 0x8000 != 0 {
		let r = ((word >> 10) & 0x1F) as u8;
		let g = ((word >> 5) & 0x1F) as u8;
		let b = (word & 0x1F) as u8;
		Rgba8::new(expand_bits(r, 5), expand_bits(g, 5), expand_bits(b, 5), 0xFF)
	} else {
		let a = ((word >> 12) & 0x7) as u8;
		let r = ((word >> 8) & 0xF) as u8;
		let g = ((word >> 4) & 0xF) as u8;
		let b = (word & 0xF) as u8;
		Rgba8::new(expand_bits(r, 4), expand_bits(g, 4), expand_bits(b, 4), expand_bits(a, 3))
	}
}

pub fn encode_rgb5a3(color: Rgba8) -> Vec<u8> {
	let word = if color.a >= 0xE0 {
		let r = u16::from(quantize_bits(color.r, 5));
		let g = u16::from(quantize_bits(color.g, 5));
		let b = u16::from(quantize_bits(color.b, 5));
		0x8000 | (r << 10) | (g << 5) | b
	} else {
		let a = u16::from(quantize_bits(color.a, 3));
		let r = u16::from(quantize_bits(color.r, 4));
		let g = u16::from(quantize_bits(color.g, 4));
		let b = u16::from(quantize_bits(color.b, 4));
		(a << 12) | (r << 8) | (g << 4) | b
	};
	word.to_be_bytes().to_vec()
}

// ---- ARGB8888: 4 bytes, A R G B, full precision ----

pub fn decode_argb8888(bytes: &[u8]) -> Rgba8 {
	Rgba8::new(bytes[1], bytes[2], bytes[3], bytes[0])
}

pub fn encode_argb8888(color: Rgba8) -> Vec<u8> {
	vec![color.a, color.r, color.g, color.b]
}
