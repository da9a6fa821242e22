//! PRS: a headerless Lempel-Ziv stream used throughout the asset pipeline.
//!
//! There is no magic signature; a `.prs` file is identified by extension and,
//! optionally, by tolerance of a bounded dry-run decode (see
//! [`looks_like_prs`]). The wire format is a flat byte stream with no framing
//! beyond the control-byte reservoir described below:
//!
//! ```text
//! control byte: 8 flag bits, MSB first, refilled every time it is exhausted
//!
//! flag 1                  -> literal byte follows
//! flag 0, flag 0           -> short copy
//!     2 flag bits  L (0-3)     length = L + 2
//!     1 byte       offset      signed, range [-256, -1]
//! flag 0, flag 1           -> long copy
//!     2 bytes LE   W
//!     offset = (W >> 3) sign-extended from 13 bits
//!     length_field = W & 7
//!     length_field != 0        length = length_field + 2
//!     length_field == 0, byte B
//!         B == 0                end of stream
//!         B != 0                length = B + 1
//! ```
//!
//! `offset` is always relative to the *current end of the decoded output*;
//! copies may overlap themselves (reading bytes the same copy just wrote),
//! which is why decoding proceeds one byte at a time rather than via a single
//! slice copy.

mod decode;
mod encode;

pub use decode::{decompress, decompress_reader};
pub use encode::compress;

/// Runs a bounded dry-run decode to sanity-check that `bytes` plausibly holds
/// a PRS stream, without allocating the full decoded output.
///
/// PRS has no magic signature (§4.B of the spec), so identification leans on
/// the `.prs` extension; this is an additional heuristic an orchestrator may
/// use to reject a mis-extensioned file. It is not a substitute for the
/// extension check: an arbitrary byte sequence can "look like" PRS by chance.
pub fn looks_like_prs(bytes: &[u8]) -> bool {
	decode::dry_run(bytes, 256).is_ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trips_arbitrary_bytes() {
		for sample in [
			&b""[..],
			&b"\x00"[..],
			&b"ABABAB"[..],
			&b"the quick brown fox jumps over the lazy dog"[..],
			&[0u8; 4096][..],
		] {
			let compressed = compress(sample);
			let decompressed = decompress(&compressed).unwrap();
			assert_eq!(decompressed, sample, "round-trip failed for {sample:?}");
		}
	}

	#[test]
	fn bounded_expansion_holds_for_incompressible_input() {
		// Worst case: every byte is a literal, plus one flag byte per 8
		// literals and a 4-byte EOS marker (control + 16-bit word + trailing
		// byte, per the §4.C grammar).
		let sample: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
		let compressed = compress(&sample);
		assert!(compressed.len() <= sample.len() + sample.len().div_ceil(8) + 4);
	}

	#[test]
	fn literal_only_scenario_round_trips() {
		// §8 scenario 1: one literal flag, the literal byte, then the
		// long-copy EOS marker, packed continuously into a single control
		// byte (flags: literal=1, then EOS's 0,1 long-copy prefix) followed
		// by the EOS word and trailing byte.
		let compressed = compress(b"\x00");
		assert_eq!(compressed, vec![0b1010_0000, 0x00, 0x00, 0x00, 0x00]);
		assert_eq!(decompress(&compressed).unwrap(), b"\x00");
	}

	#[test]
	fn decoder_rejects_truncated_input() {
		// A lone literal flag with no literal byte to back it.
		let err = decompress(&[0b1000_0000]).unwrap_err();
		assert!(matches!(err, crate::Error::Truncated(_)));
	}
}
