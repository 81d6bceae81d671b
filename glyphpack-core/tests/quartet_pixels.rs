//! Integration tests for quartet streams and pixel packing.

use glyphpack_core::pixels::{self, Bpp};
use glyphpack_core::quartet::{QuartetReader, QuartetWriter};

#[test]
fn test_quartet_stream_matches_pixel_packing() {
    // Writing the unpacked values of a 4bpp buffer through the quartet
    // writer must reproduce the buffer: same layout, same padding rule.
    let buffers: [&[u8]; 4] = [&[], &[0xAB], &[0x00, 0xFF, 0x12], &[0xF0; 7]];
    for buffer in buffers {
        let values = Bpp::Four.unpack(buffer);
        let mut writer = QuartetWriter::new();
        for value in &values {
            writer.push(*value);
        }
        assert_eq!(writer.finish(), buffer);
        assert_eq!(pixels::pack_4bpp(&values), *buffer);
    }
}

#[test]
fn test_reader_consumes_exactly_what_writer_produced() {
    let mut writer = QuartetWriter::new();
    let quartets: Vec<u8> = (0..33).map(|i| (i * 7) % 16).collect();
    for &q in &quartets {
        writer.push(q);
    }
    let bytes = writer.finish();

    let mut reader = QuartetReader::new(&bytes);
    assert_eq!(reader.total(), 34); // 33 quartets plus the pad
    for &q in &quartets {
        assert_eq!(reader.read().unwrap(), q);
    }
    assert_eq!(reader.read().unwrap(), 0);
    assert!(reader.read().is_err());
}

#[test]
fn test_1bpp_padding_is_reproduced() {
    // 15 bits of data: the packed form zero-pads the final bit, and a
    // full unpack/pack cycle keeps that padding byte-for-byte.
    let buffer = [0b1010_1010, 0b1100_1100];
    let values = Bpp::One.unpack(&buffer);
    assert_eq!(values.len(), 16);
    assert_eq!(Bpp::One.pack(&values), buffer);
}

#[test]
fn test_packed_len_agrees_with_unpack() {
    for (width, height) in [(8u16, 8u16), (13, 7), (1, 1), (64, 64)] {
        for bpp in [Bpp::One, Bpp::Four] {
            let len = bpp.packed_len(width, height);
            let pixels = width as usize * height as usize;
            // Unpacking a buffer of that length yields at least the raster's
            // pixels, plus any padding units of the final byte.
            assert!(bpp.unpack(&vec![0u8; len]).len() >= pixels);
            assert!(bpp.unpack(&vec![0u8; len]).len() < pixels + bpp.pixels_per_byte());
        }
    }
}
