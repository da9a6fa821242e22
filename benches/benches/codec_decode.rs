//! Benchmark suite for the PRS, texture, and AFS codecs.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tessera_benches::{generate_afs_archive, generate_prs_compressed_data, generate_prs_source_data, generate_texture_bitmap, sizes};
use tessera_types::afs;
use tessera_types::texture::{Texture, TextureSettings};
use tessera_vfs::Stream;

/// Benchmark PRS decompression across a range of input sizes.
fn bench_prs_decompress(c: &mut Criterion) {
	let mut group = c.benchmark_group("prs_decompress");

	for len in [4 * 1024usize, 64 * 1024, 1024 * 1024] {
		let compressed = generate_prs_compressed_data(len);
		group.throughput(Throughput::Bytes(len as u64));
		group.bench_with_input(BenchmarkId::new("decompress", len), &compressed, |b, data| {
			b.iter(|| black_box(tessera_types::prs::decompress(black_box(data)).unwrap()));
		});
	}

	group.finish();
}

/// Benchmark PRS compression across a range of input sizes.
fn bench_prs_compress(c: &mut Criterion) {
	let mut group = c.benchmark_group("prs_compress");

	for len in [4 * 1024usize, 64 * 1024, 1024 * 1024] {
		let source = generate_prs_source_data(len);
		group.throughput(Throughput::Bytes(len as u64));
		group.bench_with_input(BenchmarkId::new("compress", len), &source, |b, data| {
			b.iter(|| black_box(tessera_types::prs::compress(black_box(data))));
		});
	}

	group.finish();
}

/// Benchmark texture encode followed by decode for several bitmap sizes.
fn bench_texture_round_trip(c: &mut Criterion) {
	let mut group = c.benchmark_group("texture_round_trip");

	for (name, (width, height)) in [("tiny", sizes::TINY), ("small", sizes::SMALL), ("medium", sizes::MEDIUM)] {
		let bitmap = generate_texture_bitmap(width, height);
		let pixels = width as u64 * height as u64;
		group.throughput(Throughput::Elements(pixels));

		group.bench_with_input(BenchmarkId::new("encode", name), &bitmap, |b, bitmap| {
			b.iter(|| {
				let mut texture = Texture::from_bitmap(width, height, bitmap.clone()).unwrap();
				black_box(texture.encode(&TextureSettings::default(), None).unwrap())
			});
		});

		let mut texture = Texture::from_bitmap(width, height, bitmap.clone()).unwrap();
		let (encoded, _) = texture.encode(&TextureSettings::default(), None).unwrap();
		group.bench_with_input(BenchmarkId::new("decode", name), &encoded, |b, encoded| {
			b.iter(|| {
				let stream = Stream::new(black_box(encoded));
				let mut texture = Texture::open(&stream).unwrap();
				black_box(texture.decode().unwrap())
			});
		});
	}

	group.finish();
}

/// Benchmark AFS archive reading for a range of entry counts.
fn bench_afs_read(c: &mut Criterion) {
	let mut group = c.benchmark_group("afs_read");

	for count in [4usize, 64, 512] {
		let bytes = generate_afs_archive(count, 256);
		group.throughput(Throughput::Elements(count as u64));
		group.bench_with_input(BenchmarkId::new("read", count), &bytes, |b, bytes| {
			b.iter(|| {
				let stream = Stream::new(black_box(bytes));
				black_box(afs::read(&stream).unwrap())
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_prs_decompress, bench_prs_compress, bench_texture_round_trip, bench_afs_read);
criterion_main!(benches);
