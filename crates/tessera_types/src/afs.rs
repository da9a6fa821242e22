//! The AFS archive engine: reads and writes `"AFS\0"`-tagged blocked-entry
//! containers.
//!
//! ```text
//! "AFS\0" | u32 n | (u32 offset, u32 length)[n] | metadata pair | data... | footer
//! ```
//!
//! The metadata offset/length pair sits in one of two places depending on
//! [`AfsVersion`]: immediately after the entry table (V2), or immediately
//! before the first entry's data (V1, recovered by walking back 8 bytes from
//! `entries[0].offset` when the V2 position reads zero). The footer is a flat
//! array of 48-byte records — a 32-byte name, six `i16` timestamp fields, and
//! a 4-byte field of unclear purpose copied verbatim out of the entry table
//! (see the `tag` field below).

use std::fmt;

use chrono::{Datelike, Timelike};
use tessera_vfs::{write as vfs_write, Stream};

use crate::error::{Error, Result};

const FOOTER_ENTRY_SIZE: usize = 48;
const NAME_FIELD_SIZE: usize = 32;

/// Which of the two AFS metadata layouts a container uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfsVersion {
	/// Metadata offset/length pair stored 8 bytes before the first entry's
	/// data.
	V1,
	/// Metadata offset/length pair stored immediately after the entry table.
	V2,
}

impl fmt::Display for AfsVersion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::V1 => "V1",
			Self::V2 => "V2",
		})
	}
}

/// Caller-supplied options for [`write`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AfsSettings {
	/// Alignment quantum entries and the entry table are padded to.
	pub block_size: u32,
	/// Which metadata layout to emit.
	pub version: AfsVersion,
	/// Whether to emit real timestamps (zeros otherwise).
	pub has_timestamps: bool,
}

impl Default for AfsSettings {
	fn default() -> Self {
		Self { block_size: 2048, version: AfsVersion::V1, has_timestamps: true }
	}
}

/// A single entry's footer timestamp: six signed 16-bit fields, per the
/// on-disk layout (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AfsTimestamp {
	/// Calendar year.
	pub year: i16,
	/// Month, 1-12.
	pub month: i16,
	/// Day of month.
	pub day: i16,
	/// Hour, 0-23.
	pub hour: i16,
	/// Minute, 0-59.
	pub minute: i16,
	/// Second, 0-59.
	pub second: i16,
}

impl From<chrono::NaiveDateTime> for AfsTimestamp {
	fn from(dt: chrono::NaiveDateTime) -> Self {
		Self {
			year: dt.year() as i16,
			month: dt.month() as i16,
			day: dt.day() as i16,
			hour: dt.hour() as i16,
			minute: dt.minute() as i16,
			second: dt.second() as i16,
		}
	}
}

impl fmt::Display for AfsTimestamp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:04}-{:02}-{:02} {:02}:{:02}:{:02}", self.year, self.month, self.day, self.hour, self.minute, self.second)
	}
}

/// One archive entry: a name, its bytes, and an optional timestamp.
///
/// `tag` is the raw 4-byte field [`read`] found copied into this entry's
/// footer record; its meaning is unknown (§9 Open Questions). It is exposed
/// for inspection only — [`write`] never reads it back, since the value is
/// fully determined by the entry table layout the writer itself produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AfsEntry {
	/// Entry name, stored in a 32-byte zero-padded field on disk.
	pub name: String,
	/// Entry content.
	pub data: Vec<u8>,
	/// Entry timestamp, if any.
	pub timestamp: Option<AfsTimestamp>,
	/// The footer's unexplained per-entry 4-byte field, as found on disk.
	/// Always 0 on a freshly constructed entry.
	pub tag: u32,
}

impl AfsEntry {
	/// Builds a fresh entry with no timestamp.
	pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
		Self { name: name.into(), data, timestamp: None, tag: 0 }
	}

	/// Attaches a timestamp to this entry.
	pub fn with_timestamp(mut self, timestamp: AfsTimestamp) -> Self {
		self.timestamp = Some(timestamp);
		self
	}
}

impl fmt::Display for AfsEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({} bytes)", self.name, self.data.len())
	}
}

/// A fully parsed AFS archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Afs {
	/// Metadata layout detected while reading.
	pub version: AfsVersion,
	/// Entries, in table order.
	pub entries: Vec<AfsEntry>,
}

/// Reads an AFS archive from `stream` (§4.G read protocol).
pub fn read(stream: &Stream) -> Result<Afs> {
	if !stream.contains(0, b"AFS\0") {
		let end = 4.min(stream.len());
		let found = stream.as_slice().get(0..end).unwrap_or_default().to_vec();
		return Err(Error::BadMagic { expected: "AFS\0", found });
	}

	let mut header = stream.sub_stream(4);
	let num_entries = header.read_u32_le()? as usize;

	let mut table = Vec::with_capacity(num_entries);
	for _ in 0..num_entries {
		let offset = header.read_u32_le()?;
		let length = header.read_u32_le()?;
		table.push((offset, length));
	}

	let candidate_offset = header.read_u32_le()?;
	let (metadata_offset, version) = if candidate_offset != 0 {
		(candidate_offset, AfsVersion::V2)
	} else if let Some(&(first_offset, _)) = table.first() {
		let v1_pos = (first_offset as usize).checked_sub(8).ok_or_else(|| {
			Error::Truncated(format!("first entry offset {first_offset} too small to hold a V1 metadata pair"))
		})?;
		let mut v1 = stream.sub_stream(v1_pos);
		let offset = v1.read_u32_le()?;
		(offset, AfsVersion::V1)
	} else {
		(0, AfsVersion::V1)
	};

	let mut entries = Vec::with_capacity(num_entries);
	for (i, &(offset, length)) in table.iter().enumerate() {
		let mut data_stream = stream.sub_stream(offset as usize);
		let data = data_stream.read_bytes(length as usize)?.to_vec();

		let mut footer = stream.sub_stream(metadata_offset as usize + i * FOOTER_ENTRY_SIZE);
		let name = footer.read_fixed_string(NAME_FIELD_SIZE)?;
		let timestamp = AfsTimestamp {
			year: footer.read_i16_le()?,
			month: footer.read_i16_le()?,
			day: footer.read_i16_le()?,
			hour: footer.read_i16_le()?,
			minute: footer.read_i16_le()?,
			second: footer.read_i16_le()?,
		};
		let tag = footer.read_u32_le()?;

		entries.push(AfsEntry { name, data, timestamp: Some(timestamp), tag });
	}

	Ok(Afs { version, entries })
}

/// Writes `entries` into a complete AFS archive (§4.G write protocol),
/// invoking `on_entry_written` once per entry as its data is copied in (the
/// progress-reporting hook of §9's "event callback" design note).
pub fn write(entries: &[AfsEntry], settings: &AfsSettings, mut on_entry_written: impl FnMut(&AfsEntry)) -> Result<Vec<u8>> {
	if settings.block_size == 0 {
		return Err(Error::InvalidArgument("block_size must be at least 1".to_string()));
	}
	let block_size = settings.block_size as usize;
	let num_entries = entries.len();

	let mut header = Vec::new();
	header.extend_from_slice(b"AFS\0");
	vfs_write::write_u32_le(&mut header, num_entries as u32)?;

	// The pre-round header must leave room for whichever metadata shape this
	// version writes: V2 appends its (offset, length) pair directly after the
	// table (8 bytes), while V1 needs the table end plus a 4-byte zero slot
	// for the V2-detection read in `read` (§4.G step 4) *and* 8 more bytes so
	// the real V1 metadata pair, written at `first_entry_offset - 8`, never
	// overlaps the table or that zero slot.
	let header_min_len = match settings.version {
		AfsVersion::V1 => 20 + num_entries * 8,
		AfsVersion::V2 => 16 + num_entries * 8,
	};
	let first_entry_offset = vfs_write::round_up(header_min_len, block_size);
	let mut offsets = Vec::with_capacity(num_entries);
	let mut cursor = first_entry_offset;
	for entry in entries {
		offsets.push(cursor as u32);
		cursor += vfs_write::round_up(entry.data.len(), block_size);
	}
	let data_end = cursor;
	let metadata_length = (num_entries * FOOTER_ENTRY_SIZE) as u32;

	for (entry, &offset) in entries.iter().zip(&offsets) {
		vfs_write::write_u32_le(&mut header, offset)?;
		vfs_write::write_u32_le(&mut header, entry.data.len() as u32)?;
	}
	if settings.version == AfsVersion::V2 {
		vfs_write::write_u32_le(&mut header, data_end as u32)?;
		vfs_write::write_u32_le(&mut header, metadata_length)?;
	}
	header.resize(first_entry_offset, 0);

	// §9 Open Questions: the per-entry "duplicate tag" is a raw 4-byte copy
	// out of the entry table, meaning unknown. V1 reads one entry-slot
	// further on than entry `i` itself; V2 reads the flat (offset, length)
	// array shifted by one field. Both are fully determined by the table
	// already built above, before any data or footer bytes exist.
	let read_tag = |pos: usize| -> u32 {
		header.get(pos..pos + 4).map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]])).unwrap_or(0)
	};
	let tags: Vec<u32> = (0..num_entries)
		.map(|i| match settings.version {
			AfsVersion::V1 => read_tag(8 + 8 + i * 8),
			AfsVersion::V2 => read_tag(8 + 4 + i * 4),
		})
		.collect();

	let mut out = header;

	for (i, entry) in entries.iter().enumerate() {
		vfs_write::copy_padded(&entry.data, &mut out, block_size, 0)?;
		log::trace!("wrote entry {}/{num_entries}: {} ({} bytes)", i + 1, entry.name, entry.data.len());
		on_entry_written(entry);
	}

	if settings.version == AfsVersion::V1 {
		if let Some(&first_offset) = offsets.first() {
			let metadata_pos = first_offset as usize - 8;
			out[metadata_pos..metadata_pos + 4].copy_from_slice(&(data_end as u32).to_le_bytes());
			out[metadata_pos + 4..metadata_pos + 8].copy_from_slice(&metadata_length.to_le_bytes());
		}
	}

	for (entry, &tag) in entries.iter().zip(&tags) {
		vfs_write::write_fixed_string(&mut out, &entry.name, NAME_FIELD_SIZE)?;
		let ts = entry.timestamp.filter(|_| settings.has_timestamps).unwrap_or_default();
		vfs_write::write_i16_le(&mut out, ts.year)?;
		vfs_write::write_i16_le(&mut out, ts.month)?;
		vfs_write::write_i16_le(&mut out, ts.day)?;
		vfs_write::write_i16_le(&mut out, ts.hour)?;
		vfs_write::write_i16_le(&mut out, ts.minute)?;
		vfs_write::write_i16_le(&mut out, ts.second)?;
		vfs_write::write_u32_le(&mut out, tag)?;
	}

	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn v1_round_trip_preserves_names_and_bytes() {
		let entries = vec![
			AfsEntry::new("hi.dat", b"hello".to_vec()),
			AfsEntry::new("bye.dat", b"goodbye, friend".to_vec()),
		];
		let settings = AfsSettings { has_timestamps: false, ..AfsSettings::default() };
		let bytes = write(&entries, &settings, |_| {}).unwrap();

		let stream = Stream::new(&bytes);
		let archive = read(&stream).unwrap();
		assert_eq!(archive.version, AfsVersion::V1);
		assert_eq!(archive.entries.len(), 2);
		for (original, parsed) in entries.iter().zip(&archive.entries) {
			assert_eq!(parsed.name, original.name);
			assert_eq!(parsed.data, original.data);
		}
	}

	#[test]
	fn v1_single_entry_matches_worked_example_layout() {
		// §8 scenario 3: one 5-byte entry named "hi.dat", block_size 2048,
		// no timestamps. Expected total length 2048 + 2048 + 48 = 4144.
		let entries = vec![AfsEntry::new("hi.dat", b"hello".to_vec())];
		let settings = AfsSettings { block_size: 2048, version: AfsVersion::V1, has_timestamps: false };
		let bytes = write(&entries, &settings, |_| {}).unwrap();

		assert_eq!(bytes.len(), 2048 + 2048 + 48);
		assert_eq!(&bytes[0..4], b"AFS\0");
		assert_eq!(&bytes[8..12], &0x800u32.to_le_bytes()); // first entry offset
		assert_eq!(&bytes[0x800 - 8..0x800 - 4], &0x1000u32.to_le_bytes()); // metadata_offset
		assert_eq!(&bytes[0x800..0x805], b"hello");
		assert_eq!(&bytes[0x1000..0x1000 + 6], b"hi.dat");
	}

	#[test]
	fn v2_places_metadata_pair_immediately_after_entry_table() {
		let entries = vec![AfsEntry::new("a.bin", vec![0xAB; 10])];
		let settings = AfsSettings { version: AfsVersion::V2, ..AfsSettings::default() };
		let bytes = write(&entries, &settings, |_| {}).unwrap();

		let stream = Stream::new(&bytes);
		let archive = read(&stream).unwrap();
		assert_eq!(archive.version, AfsVersion::V2);
		assert_eq!(archive.entries[0].data, vec![0xAB; 10]);
	}

	#[test]
	fn v1_and_v2_produce_identical_payload_regions() {
		let entries =
			vec![AfsEntry::new("one.bin", vec![1u8; 100]), AfsEntry::new("two.bin", vec![2u8; 4000])];
		let v1 = write(&entries, &AfsSettings { version: AfsVersion::V1, ..AfsSettings::default() }, |_| {}).unwrap();
		let v2 = write(&entries, &AfsSettings { version: AfsVersion::V2, ..AfsSettings::default() }, |_| {}).unwrap();

		let stream_v1 = Stream::new(&v1);
		let stream_v2 = Stream::new(&v2);
		let archive_v1 = read(&stream_v1).unwrap();
		let archive_v2 = read(&stream_v2).unwrap();
		for (a, b) in archive_v1.entries.iter().zip(&archive_v2.entries) {
			assert_eq!(a.name, b.name);
			assert_eq!(a.data, b.data);
		}
	}

	#[test]
	fn entries_are_padded_to_block_size_boundaries() {
		let entries = vec![AfsEntry::new("odd.bin", vec![7u8; 17])];
		let bytes = write(&entries, &AfsSettings::default(), |_| {}).unwrap();
		let stream = Stream::new(&bytes);
		let archive = read(&stream).unwrap();
		assert_eq!(archive.entries[0].data.len(), 17);
	}

	#[test]
	fn progress_callback_fires_once_per_entry() {
		let entries = vec![AfsEntry::new("a", vec![1]), AfsEntry::new("b", vec![2]), AfsEntry::new("c", vec![3])];
		let mut seen = Vec::new();
		write(&entries, &AfsSettings::default(), |entry| seen.push(entry.name.clone())).unwrap();
		assert_eq!(seen, vec!["a", "b", "c"]);
	}

	#[test]
	fn timestamps_round_trip_when_enabled() {
		let ts = AfsTimestamp { year: 2003, month: 7, day: 4, hour: 12, minute: 30, second: 0 };
		let entries = vec![AfsEntry::new("dated.bin", vec![9]).with_timestamp(ts)];
		let bytes = write(&entries, &AfsSettings::default(), |_| {}).unwrap();
		let stream = Stream::new(&bytes);
		let archive = read(&stream).unwrap();
		assert_eq!(archive.entries[0].timestamp, Some(ts));
	}

	#[test]
	fn small_block_size_does_not_corrupt_v1_metadata_or_table() {
		// A block_size much smaller than the default leaves little natural
		// slack between the entry table and the first entry's data, which is
		// exactly where the V1 metadata-placement arithmetic could clobber
		// the table if it didn't reserve enough room.
		let entries = vec![AfsEntry::new("a.bin", vec![1u8; 3]), AfsEntry::new("b.bin", vec![2u8; 5])];
		let settings = AfsSettings { block_size: 20, version: AfsVersion::V1, has_timestamps: false };
		let bytes = write(&entries, &settings, |_| {}).unwrap();

		let stream = Stream::new(&bytes);
		let archive = read(&stream).unwrap();
		assert_eq!(archive.version, AfsVersion::V1);
		assert_eq!(archive.entries.len(), 2);
		assert_eq!(archive.entries[0].data, vec![1u8; 3]);
		assert_eq!(archive.entries[1].data, vec![2u8; 5]);
		assert_eq!(archive.entries[0].name, "a.bin");
		assert_eq!(archive.entries[1].name, "b.bin");
	}

	#[test]
	fn small_block_size_does_not_truncate_v2_metadata_pair() {
		let entries = vec![AfsEntry::new("only.bin", vec![9u8; 4])];
		let settings = AfsSettings { block_size: 20, version: AfsVersion::V2, has_timestamps: false };
		let bytes = write(&entries, &settings, |_| {}).unwrap();

		let stream = Stream::new(&bytes);
		let archive = read(&stream).unwrap();
		assert_eq!(archive.version, AfsVersion::V2);
		assert_eq!(archive.entries[0].data, vec![9u8; 4]);
	}

	#[test]
	fn zero_block_size_is_rejected() {
		let settings = AfsSettings { block_size: 0, ..AfsSettings::default() };
		let err = write(&[], &settings, |_| {}).unwrap_err();
		assert!(matches!(err, Error::InvalidArgument(_)));
	}

	#[test]
	fn bad_magic_is_rejected() {
		let stream = Stream::new(b"NOPE....");
		let err = read(&stream).unwrap_err();
		assert!(matches!(err, Error::BadMagic { .. }));
	}
}
