//! Data codecs: convert between a flat row-major [`Rgba8`] bitmap and the
//! on-disk pixel/index stream described by a [`DataFormat`].
//!
//! A [`DataFormat`] crosses two independent axes: [`Layout`] (row-major vs.
//! square-tiled) and [`PaletteMode`] (direct pixels, 4-bit indices, or 8-bit
//! indices). This module walks the on-disk sample order implied by the
//! layout and, for indexed formats, the palette implied by the palette mode;
//! the actual color encoding of each sample is delegated to a [`PixelCodec`].

use crate::error::{Error, Result};
use crate::format::{DataFormat, Layout, PaletteMode};
use crate::pixel::{PixelCodec, Rgba8};

/// Returns the `(x, y)` coordinate visited by the `i`-th on-disk sample, for
/// every sample in the image, in on-disk order.
fn sample_positions(width: usize, height: usize, layout: Layout) -> Vec<(usize, usize)> {
	match layout {
		Layout::Rectangle => {
			let mut positions = Vec::with_capacity(width * height);
			for y in 0..height {
				for x in 0..width {
					positions.push((x, y));
				}
			}
			positions
		}
		Layout::Square { block } => {
			let block = block as usize;
			let mut positions = Vec::with_capacity(width * height);
			let tiles_x = width / block.max(1);
			let tiles_y = height / block.max(1);
			for ty in 0..tiles_y {
				for tx in 0..tiles_x {
					for by in 0..block {
						for bx in 0..block {
							positions.push((tx * block + bx, ty * block + by));
						}
					}
				}
			}
			positions
		}
	}
}

/// Unpacks `count` palette indices out of a 4-bit-packed byte stream. Each
/// byte holds two indices, the first in the high nibble and the second in
/// the low nibble.
fn unpack_index4(bytes: &[u8], count: usize) -> Vec<u8> {
	let mut indices = Vec::with_capacity(count);
	for pair in bytes.chunks(1).take(count.div_ceil(2)) {
		let byte = pair[0];
		indices.push(byte >> 4);
		indices.push(byte & 0x0F);
	}
	indices.truncate(count);
	indices
}

/// Packs indices two-per-byte, high nibble first, padding a trailing odd
/// index with a zero low nibble.
fn pack_index4(indices: &[u8]) -> Vec<u8> {
	let mut bytes = Vec::with_capacity(indices.len().div_ceil(2));
	for pair in indices.chunks(2) {
		let high = pair[0] & 0x0F;
		let low = pair.get(1).copied().unwrap_or(0) & 0x0F;
		bytes.push((high << 4) | low);
	}
	bytes
}

/// Builds a palette from the distinct colors found in `source`, in order of
/// first appearance, failing if it would exceed `capacity` entries.
pub fn build_palette(source: &[Rgba8], capacity: usize) -> Result<Vec<Rgba8>> {
	let mut palette = Vec::new();
	for &color in source {
		if !palette.contains(&color) {
			palette.push(color);
			if palette.len() > capacity {
				return Err(Error::PaletteOverflow { distinct_colors: palette.len(), capacity });
			}
		}
	}
	Ok(palette)
}

/// Finds the index of `color` in `palette`. Indexed encoding requires an
/// exact match — no dithering, no nearest-color approximation — so a color
/// absent from `palette` is a [`Error::PaletteOverflow`], not a candidate for
/// quantization.
fn exact_index(palette: &[Rgba8], color: Rgba8) -> Result<u8> {
	palette
		.iter()
		.position(|&c| c == color)
		.map(|pos| pos as u8)
		.ok_or(Error::PaletteOverflow { distinct_colors: palette.len() + 1, capacity: palette.len() })
}

/// Decodes a row-major bitmap from on-disk `bytes` using `format`'s layout
/// and palette mode. `palette` must be supplied (and long enough) for
/// indexed formats; it is ignored for direct-pixel formats.
pub fn decode(
	bytes: &[u8],
	width: u16,
	height: u16,
	format: DataFormat,
	pixel: &PixelCodec,
	palette: Option<&[Rgba8]>,
) -> Result<Vec<Rgba8>> {
	let (width, height) = (width as usize, height as usize);
	let positions = sample_positions(width, height, format.layout);
	let sample_count = positions.len();

	let samples: Vec<Rgba8> = match format.palette_mode {
		PaletteMode::NoPalette => {
			let bpp = pixel.format.bytes_per_sample();
			if bytes.len() < sample_count * bpp {
				return Err(Error::Truncated(format!(
					"data stream needs {} bytes, has {}",
					sample_count * bpp,
					bytes.len()
				)));
			}
			(0..sample_count).map(|i| pixel.decode_pixel(bytes, i)).collect()
		}
		PaletteMode::Index4 => {
			let palette = palette.ok_or(Error::NeedsExternalPalette)?;
			let needed = sample_count.div_ceil(2);
			if bytes.len() < needed {
				return Err(Error::Truncated(format!(
					"4-bit index stream needs {needed} bytes, has {}",
					bytes.len()
				)));
			}
			unpack_index4(bytes, sample_count)
				.into_iter()
				.map(|idx| palette.get(idx as usize).copied().unwrap_or_default())
				.collect()
		}
		PaletteMode::Index8 => {
			let palette = palette.ok_or(Error::NeedsExternalPalette)?;
			if bytes.len() < sample_count {
				return Err(Error::Truncated(format!(
					"8-bit index stream needs {sample_count} bytes, has {}",
					bytes.len()
				)));
			}
			bytes[..sample_count]
				.iter()
				.map(|&idx| palette.get(idx as usize).copied().unwrap_or_default())
				.collect()
		}
	};

	let mut bitmap = vec![Rgba8::default(); width * height];
	for (sample, &(x, y)) in samples.into_iter().zip(positions.iter()) {
		bitmap[y * width + x] = sample;
	}
	Ok(bitmap)
}

/// Encodes a row-major `source` bitmap into on-disk bytes per `format`. For
/// indexed formats, `palette` supplies the palette to index into (build one
/// with [`build_palette`] if you need one derived from `source`).
pub fn encode(
	source: &[Rgba8],
	width: u16,
	height: u16,
	format: DataFormat,
	pixel: &PixelCodec,
	palette: Option<&[Rgba8]>,
) -> Result<Vec<u8>> {
	let (width, height) = (width as usize, height as usize);
	if source.len() != width * height {
		return Err(Error::InvalidArgument(format!(
			"source has {} pixels, expected {}x{}={}",
			source.len(),
			width,
			height,
			width * height
		)));
	}
	let positions = sample_positions(width, height, format.layout);
	let ordered: Vec<Rgba8> = positions.iter().map(|&(x, y)| source[y * width + x]).collect();

	match format.palette_mode {
		PaletteMode::NoPalette => {
			let mut out = Vec::with_capacity(ordered.len() * pixel.format.bytes_per_sample());
			for color in ordered {
				out.extend(pixel.encode_pixel(color));
			}
			Ok(out)
		}
		PaletteMode::Index4 => {
			let palette = palette.ok_or(Error::NeedsExternalPalette)?;
			let indices: Vec<u8> = ordered.iter().map(|&c| exact_index(palette, c)).collect::<Result<_>>()?;
			Ok(pack_index4(&indices))
		}
		PaletteMode::Index8 => {
			let palette = palette.ok_or(Error::NeedsExternalPalette)?;
			ordered.iter().map(|&c| exact_index(palette, c)).collect()
		}
	}
}
