//! Texture container: an optional `GBIX`/`GCIX` global-index chunk wrapping a
//! `PVRT` (Svr/Pvr family) or `GVRT` (Gvr family) data chunk, orchestrating
//! the pixel and data codec tables in [`crate::pixel`] and [`crate::data`].
//!
//! ```text
//! GBIX/GCIX (optional, 16 bytes)     PVRT/GVRT data chunk
//! +------+--------+--------+------+ +------+--------+-----------+------+
//! | magic| length | global | rsvd | | magic| body_len| ... fields ... |
//! | [4]  | =8     | _index | =0   | | [4]  | u32     |                |
//! +------+--------+--------+------+ +------+--------+-----------+------+
//! ```
//!
//! The Svr/Pvr family (`PVRT`) stores every multi-byte field little-endian;
//! the Gvr family (`GVRT`) stores them big-endian. This difference is
//! canonical (it is how a real console told the two families apart) and is
//! preserved exactly rather than normalized away.

use std::fmt;

use tessera_vfs::{write as vfs_write, Stream};

use crate::data;
use crate::error::{Error, Result};
use crate::format::{DataFormat, Layout, PaletteMode, PixelFormat};
use crate::pixel::{self, Rgba8};

/// Which optional global-index chunk (if any) wraps the data chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderVariant {
	/// Svr/Pvr-family global-index chunk.
	Gbix,
	/// Gvr-family global-index chunk.
	Gcix,
	/// No global-index chunk; the data chunk starts at offset 0.
	None,
}

impl fmt::Display for HeaderVariant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Gbix => "GBIX",
			Self::Gcix => "GCIX",
			Self::None => "none",
		};
		f.write_str(name)
	}
}

/// Which data-chunk family a texture belongs to.
///
/// The family decides field endianness and the on-disk `data_format` code
/// table; it is orthogonal to [`HeaderVariant`] (a bare `PVRT` chunk with no
/// global index is still the Svr/Pvr family).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
	/// `PVRT` chunk: Dreamcast/PS2-era Svr/Pvr family, little-endian fields.
	SvrPvr,
	/// `GVRT` chunk: GameCube-era family, big-endian fields.
	Gvr,
}

impl Family {
	const fn chunk_magic(self) -> &'static [u8; 4] {
		match self {
			Self::SvrPvr => b"PVRT",
			Self::Gvr => b"GVRT",
		}
	}

	/// Tile edge length used when a format's layout auto-refines to square.
	const fn square_block(self) -> u8 {
		match self {
			Self::SvrPvr => 8,
			Self::Gvr => 8,
		}
	}
}

impl fmt::Display for Family {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::SvrPvr => "Svr/Pvr",
			Self::Gvr => "Gvr",
		};
		f.write_str(name)
	}
}

/// Lifecycle of a [`Texture`] handle.
///
/// Property accessors fail with [`Error::NotInitialized`] while a texture is
/// [`State::Uninitialized`]; every other state answers them, including
/// [`State::Failed`], since a failed decode (notably
/// [`Error::NeedsExternalPalette`]) is meant to be retried in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
	/// No header has been parsed and no bitmap has been supplied yet.
	Uninitialized,
	/// Header parsed (read path) or dimensions/bitmap supplied (write path),
	/// but no decode/encode has run yet.
	Initialized,
	/// [`Texture::decode`] has produced a bitmap.
	Decoded,
	/// [`Texture::encode`] has produced on-disk bytes.
	Encoded,
	/// The last decode or encode attempt failed.
	Failed,
}

impl fmt::Display for State {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Uninitialized => "uninitialized",
			Self::Initialized => "initialized",
			Self::Decoded => "decoded",
			Self::Encoded => "encoded",
			Self::Failed => "failed",
		};
		f.write_str(name)
	}
}

/// Caller-supplied options for [`Texture::encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSettings {
	/// Whether to emit a `GBIX`/`GCIX` global-index chunk.
	pub has_global_index: bool,
	/// The global index to embed, if `has_global_index`.
	pub global_index: u32,
	/// Which global-index chunk magic to use; ignored unless
	/// `has_global_index` (defaults to [`HeaderVariant::Gbix`] if left as
	/// [`HeaderVariant::None`] with `has_global_index` set).
	pub header_variant: HeaderVariant,
	/// Data-chunk family (decides endianness and the on-disk format tables).
	pub family: Family,
	/// Pixel format to encode samples with.
	pub pixel_format: PixelFormat,
	/// Requested data format; for [`Family::SvrPvr`] this is auto-refined to
	/// square/rectangle per §3's write-time normalization before it is
	/// written (see [`DataFormat::normalized_for_dimensions`]).
	pub data_format: DataFormat,
	/// For indexed data formats, whether to write the palette to a
	/// companion `.svp`/`.gvp` payload instead of embedding it in the data
	/// chunk. Ignored for truecolor data formats, which never carry a
	/// palette either way.
	pub external_palette: bool,
}

impl Default for TextureSettings {
	fn default() -> Self {
		Self {
			has_global_index: false,
			global_index: 0,
			header_variant: HeaderVariant::Gbix,
			family: Family::SvrPvr,
			pixel_format: PixelFormat::Argb8888,
			data_format: DataFormat::rectangle(),
			external_palette: false,
		}
	}
}

enum Source<'a> {
	Encoded(&'a [u8]),
	Decoded(Vec<Rgba8>),
	Empty,
}

/// A texture container handle, opened for reading from an on-disk chunk or
/// built fresh for writing from a bitmap.
pub struct Texture<'a> {
	state: State,
	family: Family,
	header_variant: HeaderVariant,
	global_index: u32,
	width: u16,
	height: u16,
	pixel_format: PixelFormat,
	data_format: DataFormat,
	palette: Option<Vec<Rgba8>>,
	source: Source<'a>,
}

fn read_u32(stream: &mut Stream, family: Family) -> Result<u32> {
	Ok(match family {
		Family::SvrPvr => stream.read_u32_le()?,
		Family::Gvr => stream.read_u32_be()?,
	})
}

fn read_u16(stream: &mut Stream, family: Family) -> Result<u16> {
	Ok(match family {
		Family::SvrPvr => stream.read_u16_le()?,
		Family::Gvr => stream.read_u16_be()?,
	})
}

fn write_u32(out: &mut Vec<u8>, family: Family, v: u32) -> Result<()> {
	match family {
		Family::SvrPvr => vfs_write::write_u32_le(out, v),
		Family::Gvr => vfs_write::write_u32_be(out, v),
	}
}

fn write_u16(out: &mut Vec<u8>, family: Family, v: u16) -> Result<()> {
	match family {
		Family::SvrPvr => vfs_write::write_u16_le(out, v),
		Family::Gvr => vfs_write::write_u16_be(out, v),
	}
}

/// Number of on-disk bytes a data format's pixel/index stream occupies for
/// `sample_count` samples of `bpp`-byte pixels.
fn pixel_data_size(format: DataFormat, bpp: usize, sample_count: usize) -> usize {
	match format.palette_mode {
		PaletteMode::NoPalette => sample_count * bpp,
		PaletteMode::Index4 => sample_count.div_ceil(2),
		PaletteMode::Index8 => sample_count,
	}
}

/// On-disk `data_format` byte for the Svr/Pvr family.
///
/// Uniquely among the families this toolkit supports, the Svr/Pvr
/// `data_format` byte folds the tiling/palette axis together with which
/// pixel-format channel table the texture uses (§3: the encoder "auto-refines
/// `data_format`... times `Rgb5a3`/`Argb8` based on the chosen pixel
/// format"). The low bit carries that second axis; every non-`Rgb5a3` pixel
/// format collapses onto the same `Argb8`-class code, matching how the
/// original format only distinguished those two channel tables.
fn svr_data_format_code(format: DataFormat, pixel_format: PixelFormat) -> u8 {
	let channel = if matches!(pixel_format, PixelFormat::Rgb5a3) { 0 } else { 1 };
	let base = match (format.palette_mode, format.layout) {
		(PaletteMode::NoPalette, Layout::Rectangle) => 0x00,
		(PaletteMode::NoPalette, Layout::Square { .. }) => 0x02,
		(PaletteMode::Index4, Layout::Rectangle) => 0x04,
		(PaletteMode::Index4, Layout::Square { .. }) => 0x06,
		(PaletteMode::Index8, Layout::Rectangle) => 0x08,
		(PaletteMode::Index8, Layout::Square { .. }) => 0x0A,
	};
	base | channel
}

fn svr_data_format_from_code(code: u8, square_block: u8) -> Result<DataFormat> {
	match code & !0x01 {
		0x00 => Ok(DataFormat::rectangle()),
		0x02 => Ok(DataFormat::square(square_block)),
		0x04 => Ok(DataFormat::index4_rectangle()),
		0x06 => Ok(DataFormat::index4_square(square_block)),
		0x08 => Ok(DataFormat::index8_rectangle()),
		0x0A => Ok(DataFormat::index8_square(square_block)),
		other => Err(Error::InvalidArgument(format!("unrecognized Svr/Pvr data_format code {other:#04x}"))),
	}
}

fn gvr_data_format_code(format: DataFormat) -> u8 {
	match (format.palette_mode, format.layout) {
		(PaletteMode::NoPalette, Layout::Rectangle) => 0x00,
		(PaletteMode::NoPalette, Layout::Square { .. }) => 0x01,
		(PaletteMode::Index4, Layout::Rectangle) => 0x02,
		(PaletteMode::Index4, Layout::Square { .. }) => 0x03,
		(PaletteMode::Index8, Layout::Rectangle) => 0x04,
		(PaletteMode::Index8, Layout::Square { .. }) => 0x05,
	}
}

fn gvr_data_format_from_code(code: u8, square_block: u8) -> Result<DataFormat> {
	match code {
		0x00 => Ok(DataFormat::rectangle()),
		0x01 => Ok(DataFormat::square(square_block)),
		0x02 => Ok(DataFormat::index4_rectangle()),
		0x03 => Ok(DataFormat::index4_square(square_block)),
		0x04 => Ok(DataFormat::index8_rectangle()),
		0x05 => Ok(DataFormat::index8_square(square_block)),
		other => Err(Error::InvalidArgument(format!("unrecognized Gvr data_format code {other:#04x}"))),
	}
}

impl<'a> Texture<'a> {
	fn require_initialized(&self) -> Result<()> {
		if self.state == State::Uninitialized { Err(Error::NotInitialized) } else { Ok(()) }
	}

	/// Opens a texture container from `stream` (§4.F read protocol).
	///
	/// Accepts either a bare data chunk at offset 0, or a global-index chunk
	/// at offset 0 with the data chunk following at offset 16. Does not
	/// consume `stream`'s cursor: it reads through an internal sub-stream.
	pub fn open(stream: &Stream<'a>) -> Result<Texture<'a>> {
		let (header_variant, chunk_offset) = if stream.contains(0, b"GBIX") {
			(HeaderVariant::Gbix, 16)
		} else if stream.contains(0, b"GCIX") {
			(HeaderVariant::Gcix, 16)
		} else {
			(HeaderVariant::None, 0)
		};

		let family = if stream.contains(chunk_offset, Family::SvrPvr.chunk_magic()) {
			Family::SvrPvr
		} else if stream.contains(chunk_offset, Family::Gvr.chunk_magic()) {
			Family::Gvr
		} else {
			let end = (chunk_offset + 4).min(stream.len());
			let found = stream.as_slice().get(chunk_offset..end).unwrap_or_default().to_vec();
			return Err(Error::BadMagic { expected: "PVRT or GVRT data chunk", found });
		};

		let global_index = if header_variant != HeaderVariant::None {
			let mut gbix = stream.sub_stream(4);
			let _length = read_u32(&mut gbix, family)?;
			read_u32(&mut gbix, family)?
		} else {
			0
		};

		let mut body = stream.sub_stream(chunk_offset + 4);
		let body_length = read_u32(&mut body, family)? as usize;

		let (pixel_format_code, data_format_code, width, height) = match family {
			Family::SvrPvr => {
				let pixel_format_code = body.read_u8()?;
				let data_format_code = body.read_u8()?;
				let _reserved = body.read_u16_le()?;
				let width = read_u16(&mut body, family)?;
				let height = read_u16(&mut body, family)?;
				(pixel_format_code, data_format_code, width, height)
			}
			Family::Gvr => {
				let _reserved = read_u16(&mut body, family)?;
				let nibble_byte = body.read_u8()?;
				let pixel_format_code = nibble_byte >> 4;
				let data_format_code = body.read_u8()?;
				let width = read_u16(&mut body, family)?;
				let height = read_u16(&mut body, family)?;
				(pixel_format_code, data_format_code, width, height)
			}
		};

		let pixel_format = PixelFormat::from_wire_code(pixel_format_code)
			.ok_or_else(|| Error::InvalidArgument(format!("unrecognized pixel format code {pixel_format_code:#04x}")))?;
		let data_format = match family {
			Family::SvrPvr => svr_data_format_from_code(data_format_code, family.square_block())?,
			Family::Gvr => gvr_data_format_from_code(data_format_code, family.square_block())?,
		};

		let pixel_codec = pixel::codec_for(pixel_format)?;
		let sample_count = width as usize * height as usize;
		let bpp = pixel_codec.format.bytes_per_sample();
		let pixel_bytes_needed = pixel_data_size(data_format, bpp, sample_count);
		let palette_bytes_needed = data_format.palette_entries() * bpp;

		const HEADER_REST_LEN: usize = 8;
		let remaining = body_length.checked_sub(HEADER_REST_LEN).ok_or_else(|| {
			Error::Truncated(format!("body_length {body_length} smaller than the {HEADER_REST_LEN}-byte header it must cover"))
		})?;

		let has_internal_palette = if data_format.needs_palette() {
			if remaining == palette_bytes_needed + pixel_bytes_needed {
				true
			} else if remaining == pixel_bytes_needed {
				false
			} else {
				return Err(Error::Truncated(format!(
					"body declares {remaining} bytes after its header, expected {} (internal palette) or {pixel_bytes_needed} (external palette)",
					palette_bytes_needed + pixel_bytes_needed
				)));
			}
		} else {
			false
		};

		let palette = if has_internal_palette {
			let bytes = body.read_bytes(palette_bytes_needed)?;
			Some(pixel_codec.decode_palette(bytes, data_format.palette_entries())?)
		} else {
			None
		};

		let pixel_bytes = body.read_bytes(pixel_bytes_needed)?;

		Ok(Texture {
			state: State::Initialized,
			family,
			header_variant,
			global_index,
			width,
			height,
			pixel_format,
			data_format,
			palette,
			source: Source::Encoded(pixel_bytes),
		})
	}

	/// Builds a texture handle from an in-memory bitmap, ready for
	/// [`Texture::encode`].
	pub fn from_bitmap(width: u16, height: u16, bitmap: Vec<Rgba8>) -> Result<Texture<'static>> {
		let expected = width as usize * height as usize;
		if bitmap.len() != expected {
			return Err(Error::InvalidArgument(format!(
				"bitmap has {} pixels, expected {width}x{height}={expected}",
				bitmap.len()
			)));
		}
		Ok(Texture {
			state: State::Initialized,
			family: Family::SvrPvr,
			header_variant: HeaderVariant::None,
			global_index: 0,
			width,
			height,
			pixel_format: PixelFormat::Argb8888,
			data_format: DataFormat::rectangle(),
			palette: None,
			source: Source::Decoded(bitmap),
		})
	}

	/// Current lifecycle state.
	pub fn state(&self) -> State {
		self.state
	}

	/// Data-chunk family.
	pub fn family(&self) -> Result<Family> {
		self.require_initialized()?;
		Ok(self.family)
	}

	/// Global-index header variant, if any.
	pub fn header_variant(&self) -> Result<HeaderVariant> {
		self.require_initialized()?;
		Ok(self.header_variant)
	}

	/// Global index embedded in the `GBIX`/`GCIX` chunk, or 0 if absent.
	pub fn global_index(&self) -> Result<u32> {
		self.require_initialized()?;
		Ok(self.global_index)
	}

	/// Width in pixels.
	pub fn width(&self) -> Result<u16> {
		self.require_initialized()?;
		Ok(self.width)
	}

	/// Height in pixels.
	pub fn height(&self) -> Result<u16> {
		self.require_initialized()?;
		Ok(self.height)
	}

	/// Pixel format of the samples (direct pixels or palette entries).
	pub fn pixel_format(&self) -> Result<PixelFormat> {
		self.require_initialized()?;
		Ok(self.pixel_format)
	}

	/// On-disk tiling layout and palette mode.
	pub fn data_format(&self) -> Result<DataFormat> {
		self.require_initialized()?;
		Ok(self.data_format)
	}

	/// Supplies an external palette, read from a companion `.svp`/`.gvp`
	/// stream's payload (§6: `texture.set_palette(palette_stream, length?)`),
	/// for an indexed texture opened without one.
	///
	/// When `length` is `None`, `palette_bytes` is parsed as a full companion
	/// file: a 2-byte little-endian entry-count header followed by that many
	/// encoded entries ([`crate::palette_file::decode`]). When `length` is
	/// given, `palette_bytes` is instead treated as headerless raw encoded
	/// entries and exactly `length` of them are decoded — for a caller that
	/// already stripped the header itself.
	///
	/// §5: the palette stream is read-once; the caller retains ownership.
	pub fn set_palette(&mut self, palette_bytes: &[u8], length: Option<usize>) -> Result<()> {
		self.require_initialized()?;
		let pixel_codec = pixel::codec_for(self.pixel_format)?;
		self.palette = Some(match length {
			Some(count) => pixel_codec.decode_palette(palette_bytes, count)?,
			None => crate::palette_file::decode(palette_bytes, pixel_codec)?,
		});
		Ok(())
	}

	/// Decodes the texture's pixel data into a row-major bitmap (§4.F read
	/// protocol step 5).
	///
	/// Fails with [`Error::NeedsExternalPalette`] if the data format requires
	/// a palette that hasn't been supplied via [`Texture::set_palette`]; that
	/// failure leaves the handle's state unchanged so the caller can retry
	/// after calling it.
	pub fn decode(&mut self) -> Result<Vec<Rgba8>> {
		self.require_initialized()?;
		let bytes = match &self.source {
			Source::Encoded(bytes) => *bytes,
			_ => {
				self.state = State::Failed;
				return Err(Error::InvalidArgument("texture has no encoded source to decode".to_string()));
			}
		};
		let pixel_codec = pixel::codec_for(self.pixel_format)?;
		match data::decode(bytes, self.width, self.height, self.data_format, pixel_codec, self.palette.as_deref()) {
			Ok(bitmap) => {
				self.state = State::Decoded;
				Ok(bitmap)
			}
			Err(Error::NeedsExternalPalette) => Err(Error::NeedsExternalPalette),
			Err(err) => {
				self.state = State::Failed;
				Err(err)
			}
		}
	}

	/// Encodes the texture's bitmap into on-disk container bytes (§4.F write
	/// protocol).
	///
	/// `palette_override`, if given, is used verbatim instead of building one
	/// from the bitmap's distinct colors; this lets a caller reuse a palette
	/// shared across several textures. Fails with
	/// [`Error::PaletteOverflow`] if an indexed format's bitmap has more
	/// distinct colors than the palette mode's capacity and no override was
	/// given.
	///
	/// Returns the data-chunk bytes plus, when `settings.external_palette` is
	/// set on an indexed format, the companion `.svp`/`.gvp` payload that
	/// must be written alongside it (§4.F step 4: "expose the palette via a
	/// companion-file encoder handle").
	pub fn encode(
		&mut self,
		settings: &TextureSettings,
		palette_override: Option<&[Rgba8]>,
	) -> Result<(Vec<u8>, Option<Vec<u8>>)> {
		self.require_initialized()?;
		let bitmap = match &self.source {
			Source::Decoded(bitmap) => bitmap.clone(),
			_ => {
				self.state = State::Failed;
				return Err(Error::InvalidArgument("texture has no decoded bitmap to encode".to_string()));
			}
		};
		match self.encode_inner(settings, &bitmap, palette_override) {
			Ok((bytes, companion, data_format, palette)) => {
				self.family = settings.family;
				self.header_variant =
					if settings.has_global_index { settings.header_variant } else { HeaderVariant::None };
				self.global_index = settings.global_index;
				self.pixel_format = settings.pixel_format;
				self.data_format = data_format;
				self.palette = palette;
				self.state = State::Encoded;
				Ok((bytes, companion))
			}
			Err(err) => {
				self.state = State::Failed;
				Err(err)
			}
		}
	}

	fn encode_inner(
		&self,
		settings: &TextureSettings,
		bitmap: &[Rgba8],
		palette_override: Option<&[Rgba8]>,
	) -> Result<(Vec<u8>, Option<Vec<u8>>, DataFormat, Option<Vec<Rgba8>>)> {
		let family = settings.family;
		// §3: only the Svr/Pvr family auto-refines square-ness at write time.
		let data_format = if family == Family::SvrPvr {
			settings.data_format.normalized_for_dimensions(self.width, self.height, family.square_block())
		} else {
			settings.data_format
		};
		let pixel_codec = pixel::codec_for(settings.pixel_format)?;

		let (palette, encoded_pixels) = if data_format.needs_palette() {
			let palette = match palette_override {
				Some(p) => p.to_vec(),
				None => data::build_palette(bitmap, data_format.palette_entries())?,
			};
			let encoded = data::encode(bitmap, self.width, self.height, data_format, pixel_codec, Some(&palette))?;
			(Some(palette), encoded)
		} else {
			let encoded = data::encode(bitmap, self.width, self.height, data_format, pixel_codec, None)?;
			(None, encoded)
		};

		let embed_palette = palette.is_some() && !settings.external_palette;

		let mut out = Vec::new();

		if settings.has_global_index {
			let magic: &[u8; 4] = match settings.header_variant {
				HeaderVariant::Gcix => b"GCIX",
				_ => b"GBIX",
			};
			out.extend_from_slice(magic);
			write_u32(&mut out, family, 8)?;
			write_u32(&mut out, family, settings.global_index)?;
			write_u32(&mut out, family, 0)?;
		}

		out.extend_from_slice(family.chunk_magic());
		let palette_bytes_len = if embed_palette {
			palette.as_ref().map_or(0, |p| pixel_codec.encode_palette(p, data_format.palette_entries()).len())
		} else {
			0
		};
		let body_length = 8 + palette_bytes_len + encoded_pixels.len();
		write_u32(&mut out, family, body_length as u32)?;

		match family {
			Family::SvrPvr => {
				out.push(settings.pixel_format.wire_code());
				out.push(svr_data_format_code(data_format, settings.pixel_format));
				write_u16(&mut out, family, 0)?;
				write_u16(&mut out, family, self.width)?;
				write_u16(&mut out, family, self.height)?;
			}
			Family::Gvr => {
				write_u16(&mut out, family, 0)?;
				out.push(settings.pixel_format.wire_code() << 4);
				out.push(gvr_data_format_code(data_format));
				write_u16(&mut out, family, self.width)?;
				write_u16(&mut out, family, self.height)?;
			}
		}

		if embed_palette {
			if let Some(palette) = &palette {
				out.extend(pixel_codec.encode_palette(palette, data_format.palette_entries()));
			}
		}
		out.extend(encoded_pixels);

		let companion = if palette.is_some() && settings.external_palette {
			let palette = palette.as_deref().unwrap_or_default();
			Some(crate::palette_file::encode(palette, data_format.palette_entries(), settings.pixel_format)?)
		} else {
			None
		};

		Ok((out, companion, data_format, palette))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn solid(width: u16, height: u16, color: Rgba8) -> Vec<Rgba8> {
		vec![color; width as usize * height as usize]
	}

	#[test]
	fn gvr_truecolor_round_trips_with_big_endian_dimensions() {
		let bitmap = solid(4, 4, Rgba8::rgb(255, 0, 0));
		let mut texture = Texture::from_bitmap(4, 4, bitmap.clone()).unwrap();
		let settings =
			TextureSettings { family: Family::Gvr, pixel_format: PixelFormat::Rgb565, ..TextureSettings::default() };
		let (bytes, companion) = texture.encode(&settings, None).unwrap();
		assert!(companion.is_none());

		assert_eq!(&bytes[0..4], b"GVRT");
		assert_eq!(&bytes[12..14], &[0x00, 0x04]);
		assert_eq!(&bytes[14..16], &[0x00, 0x04]);
		assert_eq!(bytes.len(), 16 + 16 * 2);

		let stream = Stream::new(&bytes);
		let mut reopened = Texture::open(&stream).unwrap();
		assert_eq!(reopened.width().unwrap(), 4);
		assert_eq!(reopened.height().unwrap(), 4);
		let decoded = reopened.decode().unwrap();
		assert_eq!(decoded, bitmap);
	}

	#[test]
	fn svr_auto_refines_square_data_format_for_square_bitmaps() {
		let bitmap: Vec<Rgba8> = (0..64 * 64).map(|i| Rgba8::rgb((i % 251) as u8, 0, 0)).collect();
		let mut texture = Texture::from_bitmap(64, 64, bitmap).unwrap();
		let settings = TextureSettings {
			family: Family::SvrPvr,
			pixel_format: PixelFormat::Rgb5a3,
			data_format: DataFormat::index8_rectangle(),
			..TextureSettings::default()
		};
		let (bytes, _) = texture.encode(&settings, None).unwrap();

		let stream = Stream::new(&bytes);
		let reopened = Texture::open(&stream).unwrap();
		assert!(reopened.data_format().unwrap().is_square());
		assert_eq!(reopened.data_format().unwrap().palette_mode, PaletteMode::Index8);
	}

	#[test]
	fn gbix_wrapped_texture_round_trips_global_index() {
		let bitmap = solid(2, 2, Rgba8::rgb(0, 255, 0));
		let mut texture = Texture::from_bitmap(2, 2, bitmap).unwrap();
		let settings = TextureSettings {
			has_global_index: true,
			global_index: 0xDEAD_BEEF,
			pixel_format: PixelFormat::Argb8888,
			..TextureSettings::default()
		};
		let (bytes, _) = texture.encode(&settings, None).unwrap();
		assert_eq!(&bytes[0..4], b"GBIX");

		let stream = Stream::new(&bytes);
		let reopened = Texture::open(&stream).unwrap();
		assert_eq!(reopened.header_variant().unwrap(), HeaderVariant::Gbix);
		assert_eq!(reopened.global_index().unwrap(), 0xDEAD_BEEF);
	}

	#[test]
	fn indexed_texture_needs_external_palette_until_supplied() {
		// Hand-assemble a GVRT chunk whose body_length covers only the index
		// byte (no embedded palette), for a 2x1 Index4/Argb8888 texture.
		let pixel_format = PixelFormat::Argb8888;
		let data_format = DataFormat::index4_rectangle();
		let index_byte = 0x01u8; // indices [0, 1] packed into one byte
		let mut bytes = Vec::new();
		bytes.extend_from_slice(b"GVRT");
		vfs_write::write_u32_be(&mut bytes, 9).unwrap(); // body_length: 8 header + 1 index byte
		vfs_write::write_u16_be(&mut bytes, 0).unwrap(); // reserved
		bytes.push(pixel_format.wire_code() << 4);
		bytes.push(gvr_data_format_code(data_format));
		vfs_write::write_u16_be(&mut bytes, 2).unwrap(); // width
		vfs_write::write_u16_be(&mut bytes, 1).unwrap(); // height
		bytes.push(index_byte);

		let stream = Stream::new(&bytes);
		let mut reopened = Texture::open(&stream).unwrap();
		let err = reopened.decode().unwrap_err();
		assert!(matches!(err, Error::NeedsExternalPalette));
		assert_eq!(reopened.state(), State::Initialized);

		let bitmap = vec![Rgba8::rgb(1, 2, 3), Rgba8::rgb(4, 5, 6)];
		let palette = data::build_palette(&bitmap, 16).unwrap();
		let palette_bytes = pixel::codec_for(pixel_format).unwrap().encode_palette(&palette, 16);
		reopened.set_palette(&palette_bytes, Some(16)).unwrap();
		let decoded = reopened.decode().unwrap();
		assert_eq!(decoded, bitmap);
	}

	#[test]
	fn set_palette_with_a_truncated_raw_payload_reports_truncated_instead_of_panicking() {
		let pixel_format = PixelFormat::Argb8888;
		let data_format = DataFormat::index4_rectangle();
		let mut bytes = Vec::new();
		bytes.extend_from_slice(b"GVRT");
		vfs_write::write_u32_be(&mut bytes, 9).unwrap();
		vfs_write::write_u16_be(&mut bytes, 0).unwrap();
		bytes.push(pixel_format.wire_code() << 4);
		bytes.push(gvr_data_format_code(data_format));
		vfs_write::write_u16_be(&mut bytes, 2).unwrap();
		vfs_write::write_u16_be(&mut bytes, 1).unwrap();
		bytes.push(0x01);

		let stream = Stream::new(&bytes);
		let mut reopened = Texture::open(&stream).unwrap();
		assert!(matches!(reopened.decode().unwrap_err(), Error::NeedsExternalPalette));

		// A caller-supplied raw palette buffer shorter than the claimed
		// count (e.g. a truncated `.gvp` payload) must fail cleanly rather
		// than panic on an out-of-bounds slice.
		let short_palette_bytes = vec![0u8; 4]; // one entry's worth, claiming 16
		let err = reopened.set_palette(&short_palette_bytes, Some(16)).unwrap_err();
		assert!(matches!(err, Error::Truncated(_)));
	}

	#[test]
	fn external_palette_setting_writes_a_companion_payload_instead_of_embedding() {
		let bitmap = vec![Rgba8::rgb(10, 20, 30), Rgba8::rgb(40, 50, 60), Rgba8::rgb(10, 20, 30)];
		let mut texture = Texture::from_bitmap(3, 1, bitmap.clone()).unwrap();
		let settings = TextureSettings {
			family: Family::Gvr,
			pixel_format: PixelFormat::Argb8888,
			data_format: DataFormat::index8_rectangle(),
			external_palette: true,
			..TextureSettings::default()
		};
		let (bytes, companion) = texture.encode(&settings, None).unwrap();
		let companion = companion.expect("indexed + external_palette must yield a companion payload");

		// No palette bytes embedded: body covers only the 8-byte header rest
		// plus 3 one-byte indices.
		assert_eq!(bytes.len(), 16 + 3);

		let stream = Stream::new(&bytes);
		let mut reopened = Texture::open(&stream).unwrap();
		assert!(matches!(reopened.decode().unwrap_err(), Error::NeedsExternalPalette));

		reopened.set_palette(&companion, None).unwrap();
		let decoded = reopened.decode().unwrap();
		assert_eq!(decoded, bitmap);
	}

	#[test]
	fn properties_fail_before_initialization() {
		let texture = Texture { state: State::Uninitialized, ..blank() };
		assert!(matches!(texture.width(), Err(Error::NotInitialized)));
	}

	fn blank() -> Texture<'static> {
		Texture {
			state: State::Initialized,
			family: Family::SvrPvr,
			header_variant: HeaderVariant::None,
			global_index: 0,
			width: 0,
			height: 0,
			pixel_format: PixelFormat::Argb8888,
			data_format: DataFormat::rectangle(),
			palette: None,
			source: Source::Empty,
		}
	}
}
