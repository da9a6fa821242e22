//! Device-specific pixel and data format enums shared across the texture
//! container and its pixel/data codec tables.
//!
//! `PixelFormat` always describes the bit layout of a single color sample —
//! either a direct pixel (truecolor data formats) or a palette entry
//! (indexed data formats). `DataFormat` is orthogonal: it names the on-disk
//! arrangement (linear rows vs. square tiles) and palette mode (none, 16, or
//! 256 entries), independent of which `PixelFormat` fills those slots.

use std::fmt;

/// Per-sample color layout, used both for direct pixels and for palette
/// entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
	/// 1-bit alpha, 5 bits per RGB channel.
	Argb1555,
	/// No alpha, 5/6/5 bits per RGB channel.
	Rgb565,
	/// 4 bits per channel including alpha.
	Argb4444,
	/// 5 bits per RGB channel, 3-bit alpha (GameCube-style).
	Rgb5a3,
	/// 8 bits per channel including alpha.
	Argb8888,
}

impl PixelFormat {
	/// All pixel formats this toolkit ships a codec for.
	pub const ALL: [PixelFormat; 5] =
		[Self::Argb1555, Self::Rgb565, Self::Argb4444, Self::Rgb5a3, Self::Argb8888];

	/// Size of one encoded sample, in bytes.
	pub const fn bytes_per_sample(self) -> usize {
		match self {
			Self::Argb1555 | Self::Rgb565 | Self::Argb4444 | Self::Rgb5a3 => 2,
			Self::Argb8888 => 4,
		}
	}

	/// The on-disk code used in GVRT/PVRT-style headers for this format.
	pub const fn wire_code(self) -> u8 {
		match self {
			Self::Argb1555 => 0x00,
			Self::Rgb565 => 0x01,
			Self::Argb4444 => 0x02,
			Self::Rgb5a3 => 0x03,
			Self::Argb8888 => 0x04,
		}
	}

	/// Looks up a pixel format by its on-disk code.
	pub fn from_wire_code(code: u8) -> Option<Self> {
		Self::ALL.into_iter().find(|f| f.wire_code() == code)
	}
}

impl fmt::Display for PixelFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Argb1555 => "ARGB1555",
			Self::Rgb565 => "RGB565",
			Self::Argb4444 => "ARGB4444",
			Self::Rgb5a3 => "RGB5A3",
			Self::Argb8888 => "ARGB8888",
		};
		f.write_str(name)
	}
}

/// On-disk pixel/index arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
	/// Row-major, left to right, top to bottom.
	Rectangle,
	/// Divided into `block` x `block` tiles, each stored in raster order,
	/// tiles themselves emitted in raster order.
	Square {
		/// Tile edge length in pixels (4 or 8 for the formats this toolkit
		/// supports).
		block: u8,
	},
}

/// Palette mode encoded by a [`DataFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteMode {
	/// Direct (truecolor) pixels, no palette.
	NoPalette,
	/// 4-bit indices into a 16-entry palette, two indices packed per byte.
	Index4,
	/// 8-bit indices into a 256-entry palette.
	Index8,
}

impl PaletteMode {
	/// Number of palette entries this mode requires (0 for truecolor).
	pub const fn entry_count(self) -> usize {
		match self {
			Self::NoPalette => 0,
			Self::Index4 => 16,
			Self::Index8 => 256,
		}
	}
}

/// The on-disk arrangement of a texture's pixel/index data: tiling layout
/// crossed with palette mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataFormat {
	/// Palette mode (none, 4-bit, or 8-bit indices).
	pub palette_mode: PaletteMode,
	/// Storage layout (row-major or square-tiled).
	pub layout: Layout,
}

impl DataFormat {
	/// A truecolor, row-major data format.
	pub const fn rectangle() -> Self {
		Self { palette_mode: PaletteMode::NoPalette, layout: Layout::Rectangle }
	}

	/// A truecolor, square-tiled data format with the given tile size.
	pub const fn square(block: u8) -> Self {
		Self { palette_mode: PaletteMode::NoPalette, layout: Layout::Square { block } }
	}

	/// A 4-bit indexed, row-major data format.
	pub const fn index4_rectangle() -> Self {
		Self { palette_mode: PaletteMode::Index4, layout: Layout::Rectangle }
	}

	/// A 4-bit indexed, square-tiled data format.
	pub const fn index4_square(block: u8) -> Self {
		Self { palette_mode: PaletteMode::Index4, layout: Layout::Square { block } }
	}

	/// An 8-bit indexed, row-major data format.
	pub const fn index8_rectangle() -> Self {
		Self { palette_mode: PaletteMode::Index8, layout: Layout::Rectangle }
	}

	/// An 8-bit indexed, square-tiled data format.
	pub const fn index8_square(block: u8) -> Self {
		Self { palette_mode: PaletteMode::Index8, layout: Layout::Square { block } }
	}

	/// Whether this format requires a palette (internal or external).
	pub const fn needs_palette(&self) -> bool {
		!matches!(self.palette_mode, PaletteMode::NoPalette)
	}

	/// Number of palette entries required (0 for truecolor formats).
	pub const fn palette_entries(&self) -> usize {
		self.palette_mode.entry_count()
	}

	/// Whether this format tiles the image into square blocks.
	pub const fn is_square(&self) -> bool {
		matches!(self.layout, Layout::Square { .. })
	}

	/// Returns a copy of this format with the layout's square-ness swapped to
	/// match `width == height`, used by the Svr/Pvr write-time normalization
	/// rule (§3 of the spec: "`data_format` is auto-refined by the encoder").
	pub fn normalized_for_dimensions(&self, width: u16, height: u16, square_block: u8) -> Self {
		let layout = if width == height {
			Layout::Square { block: square_block }
		} else {
			Layout::Rectangle
		};
		Self { palette_mode: self.palette_mode, layout }
	}
}
