//! Format registry: identifies an input's format from a signature probe plus
//! a filename extension, and yields the matching handler.
//!
//! Per §9 of the spec ("model each handler as a record of function pointers,
//! or a sum type dispatched over `(signature, extension)`"), this toolkit has
//! no process-wide mutable registry: [`FormatKind`] is a compile-time sum
//! type, and [`identify`]/[`get`] are pure functions over it. There is
//! exactly one handler per variant, so "at most one handler may claim a
//! given `(signature, extension)` pair" holds trivially for the two
//! magic-bearing formats; PRS's lack of a magic is handled by requiring the
//! extension instead (§4.B).

use tessera_vfs::Stream;

use crate::error::{Error, Result};

/// The three format families this toolkit's core understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
	/// The headerless PRS compression stream.
	Prs,
	/// A GBIX/GCIX + PVRT/GVRT texture container.
	Texture,
	/// An AFS archive.
	Afs,
}

/// Static metadata describing a [`FormatKind`]'s capabilities, mirroring the
/// "format handler descriptor" of §3: a human name, canonical extension, and
/// capability flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandlerDescriptor {
	/// Human-readable format name.
	pub name: &'static str,
	/// Canonical file extension (without the leading dot), lowercase.
	pub extension: &'static str,
	/// Whether this handler can read (decode) this format.
	pub can_read: bool,
	/// Whether this handler can write (encode) this format.
	pub can_write: bool,
}

impl FormatKind {
	/// Every format kind this registry knows about.
	pub const ALL: [FormatKind; 3] = [FormatKind::Prs, FormatKind::Texture, FormatKind::Afs];

	/// Returns this kind's static descriptor.
	pub const fn descriptor(self) -> HandlerDescriptor {
		match self {
			FormatKind::Prs => {
				HandlerDescriptor { name: "PRS", extension: "prs", can_read: true, can_write: true }
			}
			FormatKind::Texture => {
				HandlerDescriptor { name: "Texture", extension: "pvr", can_read: true, can_write: true }
			}
			FormatKind::Afs => {
				HandlerDescriptor { name: "AFS", extension: "afs", can_read: true, can_write: true }
			}
		}
	}

	/// Direct lookup by case-insensitive name.
	pub fn get(name: &str) -> Option<FormatKind> {
		Self::ALL.into_iter().find(|k| k.descriptor().name.eq_ignore_ascii_case(name))
	}
}

fn extension_of(filename: &str) -> String {
	std::path::Path::new(filename)
		.extension()
		.and_then(|ext| ext.to_str())
		.map(str::to_ascii_lowercase)
		.unwrap_or_default()
}

/// Probes for the AFS signature (`"AFS\0"` at offset 0) without consuming
/// the stream's cursor.
fn looks_like_afs(stream: &Stream) -> bool {
	stream.contains(0, b"AFS\0")
}

/// Probes for a texture container signature: a global-index chunk at offset
/// 0 with a data chunk at offset 16, or a bare data chunk at offset 0
/// (§4.F read protocol step 1).
fn looks_like_texture(stream: &Stream) -> bool {
	let has_global_index = stream.contains(0, b"GBIX") || stream.contains(0, b"GCIX");
	if has_global_index {
		return stream.contains(16, b"PVRT") || stream.contains(16, b"GVRT");
	}
	stream.contains(0, b"PVRT") || stream.contains(0, b"GVRT")
}

/// Identifies `stream`'s format from its signature and `filename`'s
/// extension, without consuming the stream's cursor.
///
/// Texture and AFS both carry a magic signature, so the magic alone decides
/// those two (extension is not required, matching "otherwise the magic is
/// required"). PRS has no magic (§9), so it is only returned when the
/// extension is `.prs` *and* the bytes survive a bounded dry-run decode
/// (§4.C's "extension is required" plus the decode-tolerance heuristic).
///
/// Returns `Err` only in the pathological case where a stream's bytes
/// satisfy both magic-bearing signatures at once — the spec's "ties are an
/// error" policy; this cannot happen with the two disjoint magics this
/// registry checks, but the check is kept explicit rather than assumed.
pub fn identify(stream: &Stream, filename: &str) -> Result<Option<FormatKind>> {
	let is_afs = looks_like_afs(stream);
	let is_texture = looks_like_texture(stream);
	if is_afs && is_texture {
		log::debug!("{filename}: signature matched both AFS and a texture container");
		return Err(Error::InvalidArgument(
			"ambiguous input: matches both the AFS and texture-container signatures".to_string(),
		));
	}
	if is_afs {
		log::trace!("{filename}: identified as AFS by signature");
		return Ok(Some(FormatKind::Afs));
	}
	if is_texture {
		log::trace!("{filename}: identified as a texture container by signature");
		return Ok(Some(FormatKind::Texture));
	}

	let extension = extension_of(filename);
	if extension == FormatKind::Prs.descriptor().extension && crate::prs::looks_like_prs(stream.as_slice()) {
		log::trace!("{filename}: identified as PRS by extension plus a passing dry-run decode");
		return Ok(Some(FormatKind::Prs));
	}

	log::debug!("{filename}: no registered format claimed this input");
	Ok(None)
}
