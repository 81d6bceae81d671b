//! Round-trip coverage across glyph-shaped pixel corpora.

use glyphpack_core::Bpp;
use glyphpack_rle::{FontCodec, Method};

/// Deterministic pseudo-random bytes (linear congruential generator).
fn lcg_bytes(len: usize, mut seed: u64) -> Vec<u8> {
    let mut data = Vec::with_capacity(len);
    for _ in 0..len {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        data.push((seed >> 32) as u8);
    }
    data
}

fn assert_roundtrip(codec: &FontCodec, pixels: &[u8], width: u16, height: u16) {
    let encoded = codec
        .encode(pixels, width, height, 0x3042)
        .expect("encode failed");
    let decoded = codec
        .decode(encoded.method, &encoded.data)
        .expect("decode failed");
    assert_eq!(decoded, pixels, "{width}x{height} at {:?}", codec.bpp());
}

#[test]
fn test_4bpp_flat_tiles() {
    let codec = FontCodec::new("corpus", Bpp::Four);
    for fill in [0x00u8, 0xFF, 0x77, 0x33] {
        let pixels = vec![fill; 32];
        assert_roundtrip(&codec, &pixels, 8, 8);
    }
}

#[test]
fn test_4bpp_antialiased_edges() {
    // Vertical fade: the kind of raster the bridge patterns exist for.
    let codec = FontCodec::new("corpus", Bpp::Four);
    let mut pixels = Vec::new();
    for _row in 0..8 {
        // 0 0 3 b f f b 3 per row, packed two per byte
        pixels.extend_from_slice(&[0x00, 0x3B, 0xFF, 0xB3]);
    }
    assert_roundtrip(&codec, &pixels, 8, 8);
}

#[test]
fn test_4bpp_checkerboard() {
    let codec = FontCodec::new("corpus", Bpp::Four);
    let mut pixels = Vec::new();
    for row in 0..8u8 {
        let byte = if row % 2 == 0 { 0x0F } else { 0xF0 };
        pixels.extend_from_slice(&[byte; 4]);
    }
    assert_roundtrip(&codec, &pixels, 8, 8);
}

#[test]
fn test_4bpp_random_buffers() {
    let codec = FontCodec::new("corpus", Bpp::Four);
    for seed in 0..64 {
        let pixels = lcg_bytes(32, 0x9E3779B97F4A7C15 ^ seed);
        assert_roundtrip(&codec, &pixels, 8, 8);
    }
}

#[test]
fn test_4bpp_odd_pixel_count() {
    // 3x3 raster: 9 pixels, 5 packed bytes, one padding nibble.
    let codec = FontCodec::new("corpus", Bpp::Four);
    for seed in 0..16 {
        let mut pixels = lcg_bytes(5, seed);
        // Padding nibble is zero in real rasters.
        pixels[4] &= 0xF0;
        assert_roundtrip(&codec, &pixels, 3, 3);
    }
}

#[test]
fn test_1bpp_glyph_rows() {
    let codec = FontCodec::new("corpus", Bpp::One);
    let rows: [&[u8]; 4] = [
        &[0x0F; 8],
        &[0x00; 8],
        &[0xFF; 8],
        &[0x3C, 0x42, 0x81, 0x81, 0x81, 0x81, 0x42, 0x3C], // ring shape
    ];
    for pixels in rows {
        assert_roundtrip(&codec, pixels, 8, 8);
    }
}

#[test]
fn test_1bpp_random_buffers() {
    let codec = FontCodec::new("corpus", Bpp::One);
    for seed in 0..64 {
        let pixels = lcg_bytes(8, 0xDEADBEEF ^ seed);
        assert_roundtrip(&codec, &pixels, 8, 8);
    }
}

#[test]
fn test_1bpp_long_runs_exceed_count_field() {
    // 64x64 all-black: a 4096-pixel run, split many times on the wire.
    let codec = FontCodec::new("corpus", Bpp::One);
    let pixels = vec![0x00; 512];
    let encoded = codec.encode(&pixels, 64, 64, 0).unwrap();
    assert_eq!(encoded.method, Method::Rle);
    assert_roundtrip(&codec, &pixels, 64, 64);
}

#[test]
fn test_raw_fallback_still_roundtrips() {
    let codec = FontCodec::new("corpus", Bpp::Four);
    // White noise rarely compresses; whatever method is chosen must
    // round-trip.
    let pixels = lcg_bytes(32, 42);
    let encoded = codec.encode(&pixels, 8, 8, 0).unwrap();
    let decoded = codec.decode(encoded.method, &encoded.data).unwrap();
    assert_eq!(decoded, pixels);
}

#[test]
fn test_empty_raster() {
    let codec = FontCodec::new("corpus", Bpp::Four);
    let encoded = codec.encode(&[], 0, 0, 0).unwrap();
    assert!(codec.decode(encoded.method, &encoded.data).unwrap().is_empty());
}
