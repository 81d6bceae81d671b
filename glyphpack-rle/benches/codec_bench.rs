//! Performance benchmarks for the glyph codec.
//!
//! This suite evaluates:
//! - Encode/decode throughput for both bit depths
//! - Behaviour across glyph-shaped pixel patterns (flat tiles,
//!   anti-aliased edges, checkers, noise)

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use glyphpack_core::Bpp;
use glyphpack_rle::FontCodec;
use std::hint::black_box;

/// Type alias for pattern generator functions
type PatternGenerator = fn(usize) -> Vec<u8>;

/// Glyph-shaped test rasters for benchmarking
mod test_data {
    /// Flat white tile - best case for the fill commands
    pub fn flat_white(size: usize) -> Vec<u8> {
        vec![0xFF; size]
    }

    /// Anti-aliased vertical edges - exercises the pattern commands
    pub fn antialiased(size: usize) -> Vec<u8> {
        let row = [0x00u8, 0x3B, 0xFF, 0xB3];
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let remaining = size - data.len();
            data.extend_from_slice(&row[..remaining.min(row.len())]);
        }
        data
    }

    /// Checkerboard - short alternating runs
    pub fn checker(size: usize) -> Vec<u8> {
        (0..size)
            .map(|i| if i % 2 == 0 { 0x0F } else { 0xF0 })
            .collect()
    }

    /// Noise - worst case, exercises the copy path and raw fallback
    pub fn noise(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }
}

/// Build a finalized 4bpp codec surveyed over the given raster.
fn surveyed_codec(pixels: &[u8], width: u16, height: u16) -> FontCodec {
    let mut codec = FontCodec::new("bench", Bpp::Four);
    codec.survey(pixels, width, height).unwrap();
    codec.finalize();
    codec
}

fn bench_encode_4bpp(c: &mut Criterion) {
    let patterns: [(&str, PatternGenerator); 4] = [
        ("flat_white", test_data::flat_white),
        ("antialiased", test_data::antialiased),
        ("checker", test_data::checker),
        ("noise", test_data::noise),
    ];

    let mut group = c.benchmark_group("encode_4bpp");
    for (name, generator) in patterns {
        // 32x32 tile: 512 packed bytes.
        let pixels = generator(512);
        let codec = surveyed_codec(&pixels, 32, 32);
        group.throughput(Throughput::Bytes(pixels.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &pixels, |b, pixels| {
            b.iter(|| codec.encode(black_box(pixels), 32, 32, 0x41).unwrap());
        });
    }
    group.finish();
}

fn bench_decode_4bpp(c: &mut Criterion) {
    let patterns: [(&str, PatternGenerator); 3] = [
        ("flat_white", test_data::flat_white),
        ("antialiased", test_data::antialiased),
        ("checker", test_data::checker),
    ];

    let mut group = c.benchmark_group("decode_4bpp");
    for (name, generator) in patterns {
        let pixels = generator(512);
        let codec = surveyed_codec(&pixels, 32, 32);
        let encoded = codec.encode(&pixels, 32, 32, 0x41).unwrap();
        group.throughput(Throughput::Bytes(pixels.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &encoded,
            |b, encoded| {
                b.iter(|| codec.decode(encoded.method, black_box(&encoded.data)).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_1bpp(c: &mut Criterion) {
    // 64x64 glyph with horizontal stripes: long alternating runs.
    let pixels: Vec<u8> = (0..512)
        .map(|i| if (i / 64) % 2 == 0 { 0xFF } else { 0x00 })
        .collect();
    let codec = FontCodec::new("bench", Bpp::One);
    let encoded = codec.encode(&pixels, 64, 64, 0x41).unwrap();

    let mut group = c.benchmark_group("codec_1bpp");
    group.throughput(Throughput::Bytes(pixels.len() as u64));
    group.bench_function("encode", |b| {
        b.iter(|| codec.encode(black_box(&pixels), 64, 64, 0x41).unwrap());
    });
    group.bench_function("decode", |b| {
        b.iter(|| codec.decode(encoded.method, black_box(&encoded.data)).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_encode_4bpp, bench_decode_4bpp, bench_1bpp);
criterion_main!(benches);
