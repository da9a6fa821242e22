//! Benchmark helper utilities for `tessera`.
//!
//! This crate provides synthetic test data generators shared by the
//! benchmark binaries: compressible byte streams for the PRS codec, texture
//! bitmaps for the transcoder, and small archive trees for the AFS engine.

use tessera_types::afs::{AfsEntry, AfsSettings};
use tessera_types::pixel::Rgba8;
use tessera_types::prs;

/// Generates a byte buffer with a repeating pattern, long enough to exercise
/// both the literal and copy paths of the PRS codec.
pub fn generate_prs_source_data(len: usize) -> Vec<u8> {
	(0..len).map(|i| (i % 17) as u8).collect()
}

/// Pre-compresses [`generate_prs_source_data`] so decode benchmarks don't pay
/// for compression inside the measured loop.
pub fn generate_prs_compressed_data(len: usize) -> Vec<u8> {
	prs::compress(&generate_prs_source_data(len))
}

/// Generates a flat RGBA bitmap of solid horizontal bands, wide enough that
/// both indexed and truecolor encoders have real work to do.
pub fn generate_texture_bitmap(width: u16, height: u16) -> Vec<Rgba8> {
	(0..(width as usize * height as usize))
		.map(|i| {
			let band = (i / width.max(1) as usize) % 4;
			match band {
				0 => Rgba8::new(255, 0, 0, 255),
				1 => Rgba8::new(0, 255, 0, 255),
				2 => Rgba8::new(0, 0, 255, 255),
				_ => Rgba8::new(255, 255, 255, 255),
			}
		})
		.collect()
}

/// Builds a small in-memory AFS archive with `count` entries of `entry_size`
/// bytes each, for benchmarking archive read/write.
pub fn generate_afs_archive(count: usize, entry_size: usize) -> Vec<u8> {
	let entries: Vec<AfsEntry> = (0..count)
		.map(|i| AfsEntry::new(format!("entry_{i:03}.bin"), vec![(i % 256) as u8; entry_size]))
		.collect();
	tessera_types::afs::write(&entries, &AfsSettings::default(), |_| {}).expect("synthetic archive should encode")
}

/// Common benchmark sizes for synthetic test data.
pub mod sizes {
	/// Tiny image: 64x64 (4,096 pixels).
	pub const TINY: (u16, u16) = (64, 64);
	/// Small image: 256x256 (65,536 pixels).
	pub const SMALL: (u16, u16) = (256, 256);
	/// Medium image: 512x512 (262,144 pixels).
	pub const MEDIUM: (u16, u16) = (512, 512);
	/// Large image: 1024x768 (786,432 pixels), a typical in-game render target.
	pub const LARGE: (u16, u16) = (1024, 768);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn generated_prs_data_round_trips() {
		let compressed = generate_prs_compressed_data(4096);
		let restored = prs::decompress(&compressed).unwrap();
		assert_eq!(restored, generate_prs_source_data(4096));
	}

	#[test]
	fn generated_bitmap_has_expected_length() {
		let bitmap = generate_texture_bitmap(64, 64);
		assert_eq!(bitmap.len(), 64 * 64);
	}

	#[test]
	fn generated_archive_round_trips_entry_count() {
		let bytes = generate_afs_archive(3, 128);
		let stream = tessera_vfs::Stream::new(&bytes);
		let archive = tessera_types::afs::read(&stream).unwrap();
		assert_eq!(archive.entries.len(), 3);
	}

	#[test]
	fn sizes_constants_match_documented_dimensions() {
		assert_eq!(sizes::TINY, (64, 64));
		assert_eq!(sizes::LARGE, (1024, 768));
	}
}
