//! Pixel codecs: encode/decode a palette entry or a direct pixel between an
//! [`Rgba8`] bitmap sample and the device-specific color word `tessera`
//! understands.
//!
//! The codec table is a compile-time constant array indexed by
//! [`PixelFormat`] (per §9 of the spec: "codecs are value tables indexed by
//! the device enum"), rather than a trait object per format — there is no
//! process-wide mutable registry to build at startup.

mod formats;

use std::fmt;

use crate::error::{Error, Result};
use crate::format::PixelFormat;

/// An 8-bit-per-channel RGBA color, the common currency every pixel codec
/// decodes into and encodes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgba8 {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha channel.
	pub a: u8,
}

impl Rgba8 {
	/// Builds a color from its four channels.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self { r, g, b, a }
	}

	/// Builds a fully opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::new(r, g, b, 255)
	}

	/// Packs the color into a single `u32` (`0xRRGGBBAA`), used by data
	/// codecs that need exact-match color lookup for palette building.
	pub const fn pack(&self) -> u32 {
		(self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
	}
}

impl fmt::Display for Rgba8 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

type DecodeFn = fn(&[u8]) -> Rgba8;
type EncodeFn = fn(Rgba8) -> Vec<u8>;

/// A pixel format's encode/decode pair plus its capability flags.
pub struct PixelCodec {
	/// Which device format this codec implements.
	pub format: PixelFormat,
	/// Whether [`PixelCodec::decode_pixel`] is supported.
	pub can_decode: bool,
	/// Whether [`PixelCodec::encode_pixel`] is supported.
	pub can_encode: bool,
	decode: DecodeFn,
	encode: EncodeFn,
}

impl PixelCodec {
	/// Decodes one sample (a palette entry or a direct pixel) at byte offset
	/// `index * bytes_per_sample` within `bytes`.
	pub fn decode_pixel(&self, bytes: &[u8], index: usize) -> Rgba8 {
		let bpp = self.format.bytes_per_sample();
		(self.decode)(&bytes[index * bpp..index * bpp + bpp])
	}

	/// Encodes one sample to its on-disk byte representation.
	pub fn encode_pixel(&self, color: Rgba8) -> Vec<u8> {
		(self.encode)(color)
	}

	/// Decodes `count` consecutive palette entries from `bytes`.
	///
	/// Fails with [`Error::Truncated`] rather than panicking when `bytes`
	/// isn't long enough to hold `count` entries — a caller-supplied
	/// `set_palette` length can be arbitrary, unlike the lengths this crate
	/// computes itself from a parsed header.
	pub fn decode_palette(&self, bytes: &[u8], count: usize) -> Result<Vec<Rgba8>> {
		let bpp = self.format.bytes_per_sample();
		let needed = count * bpp;
		if bytes.len() < needed {
			return Err(Error::Truncated(format!(
				"palette needs {needed} bytes for {count} entries, has {}",
				bytes.len()
			)));
		}
		Ok((0..count).map(|i| self.decode_pixel(bytes, i)).collect())
	}

	/// Encodes `count` palette entries (padding with
	/// [`Rgba8::default`] if `palette` is shorter than `count`).
	pub fn encode_palette(&self, palette: &[Rgba8], count: usize) -> Vec<u8> {
		let bpp = self.format.bytes_per_sample();
		let mut out = Vec::with_capacity(count * bpp);
		for i in 0..count {
			let color = palette.get(i).copied().unwrap_or_default();
			out.extend_from_slice(&self.encode_pixel(color));
		}
		out
	}
}

const TABLE: [PixelCodec; 5] = [
	PixelCodec {
		format: PixelFormat::Argb1555,
		can_decode: true,
		can_encode: true,
		decode: formats::decode_argb1555,
		encode: formats::encode_argb1555,
	},
	PixelCodec {
		format: PixelFormat::Rgb565,
		can_decode: true,
		can_encode: true,
		decode: formats::decode_rgb565,
		encode: formats::encode_rgb565,
	},
	PixelCodec {
		format: PixelFormat::Argb4444,
		can_decode: true,
		can_encode: true,
		decode: formats::decode_argb4444,
		encode: formats::encode_argb4444,
	},
	PixelCodec {
		format: PixelFormat::Rgb5a3,
		can_decode: true,
		can_encode: true,
		decode: formats::decode_rgb5a3,
		encode: formats::encode_rgb5a3,
	},
	PixelCodec {
		format: PixelFormat::Argb8888,
		can_decode: true,
		can_encode: true,
		decode: formats::decode_argb8888,
		encode: formats::encode_argb8888,
	},
];

/// Looks up the codec for `format`, surfacing an
/// [`Error::UnsupportedPixelFormat`] for unregistered codes.
pub fn codec_for(format: PixelFormat) -> Result<&'static PixelCodec> {
	TABLE.iter().find(|c| c.format == format).ok_or(Error::UnsupportedPixelFormat(format))
}
