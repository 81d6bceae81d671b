//! # Glyphpack RLE
//!
//! Pattern-aware run-length codec for 1bpp/4bpp glyph and icon rasters,
//! built for embedding compressed pixel tables in firmware images.
//!
//! ## Features
//!
//! - **Lossless and deterministic**: every encode decodes its own output
//!   and compares it against the input before returning
//! - **4bpp path**: run normalization, bridge-pattern detection and a
//!   nibble-oriented command stream with a font-wide, frequency-ranked
//!   pattern dictionary
//! - **1bpp path**: alternating-run counts, one byte (or nibble) each
//! - **Icon container**: self-describing 8-byte header for standalone files
//!
//! ## Two-pass discipline
//!
//! The pattern dictionary is shared across every character of a font, so a
//! font compiles in two passes: survey every glyph (counting), finalize the
//! dictionary, then encode every glyph against the frozen ranking. Encoding
//! before finalization still round-trips - unindexed patterns are spelled
//! out literally - it just compresses worse.
//!
//! ## Example
//!
//! ```rust
//! use glyphpack_core::Bpp;
//! use glyphpack_rle::FontCodec;
//!
//! // An 8x8 4bpp tile: black block fading to white.
//! let mut tile = vec![0x00u8; 16];
//! tile.extend_from_slice(&[0x7F; 16]);
//!
//! let mut codec = FontCodec::new("inter_medium_36", Bpp::Four);
//! codec.survey(&tile, 8, 8).unwrap();
//! codec.finalize();
//!
//! let encoded = codec.encode(&tile, 8, 8, 'A' as u32).unwrap();
//! let decoded = codec.decode(encoded.method, &encoded.data).unwrap();
//! assert_eq!(decoded, tile);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod alternating;
pub mod container;
pub mod dictionary;
pub mod error;
pub mod packer;
pub mod runs;
pub mod wire;

pub use alternating::AltConfig;
pub use container::IconHeader;
pub use dictionary::PatternDictionary;
pub use error::{GlyphId, Result, RleError};

use glyphpack_core::Bpp;

use crate::runs::{merge_adjacent, runs_from_values, values_from_runs};

/// Which codec produced a compressed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Method {
    /// The bytes are the packed input verbatim.
    Raw = 0,
    /// The bytes follow the 4bpp command stream or the 1bpp alternating
    /// format, by bits-per-pixel.
    Rle = 1,
}

impl TryFrom<u8> for Method {
    type Error = RleError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Method::Raw),
            1 => Ok(Method::Rle),
            other => Err(RleError::BadMethod(other)),
        }
    }
}

/// Result of one glyph encode: the method tag plus the bytes it selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    /// Codec the data follows.
    pub method: Method,
    /// Compressed (or verbatim) bytes.
    pub data: Vec<u8>,
}

/// Compress a packed 4bpp buffer into the command stream.
pub fn compress_4bpp(pixels: &[u8], dictionary: &PatternDictionary) -> Vec<u8> {
    let values = Bpp::Four.unpack(pixels);
    let commands = packer::pack(&runs_from_values(&values));
    wire::serialize(&commands, dictionary)
}

/// Decompress a 4bpp command stream back into a packed buffer.
pub fn decompress_4bpp(data: &[u8], dictionary: &PatternDictionary) -> Result<Vec<u8>> {
    let commands = wire::deserialize(data, dictionary)?;
    let mut runs = packer::unpack(&commands);
    merge_adjacent(&mut runs);
    Ok(Bpp::Four.pack(&values_from_runs(&runs)))
}

/// Compress a packed 1bpp buffer with the alternating-run codec.
pub fn compress_1bpp(pixels: &[u8], config: AltConfig) -> Vec<u8> {
    let values = Bpp::One.unpack(pixels);
    alternating::encode(&runs_from_values(&values), config)
}

/// Decompress an alternating-run stream back into a packed buffer.
pub fn decompress_1bpp(data: &[u8], config: AltConfig) -> Vec<u8> {
    let runs = alternating::decode(data, config);
    Bpp::One.pack(&values_from_runs(&runs))
}

/// One font-compilation run: the target format, the font identity used in
/// error reports, and the pattern dictionary shared by all of its glyphs.
#[derive(Debug)]
pub struct FontCodec {
    font: String,
    bpp: Bpp,
    dictionary: PatternDictionary,
}

impl FontCodec {
    /// Create a codec for one font at the given bits-per-pixel.
    pub fn new(font: impl Into<String>, bpp: Bpp) -> Self {
        Self {
            font: font.into(),
            bpp,
            dictionary: PatternDictionary::new(),
        }
    }

    /// Create a decode-side codec from a published dictionary export.
    pub fn with_exported_dictionary(font: impl Into<String>, bpp: Bpp, packed: &[u8]) -> Self {
        Self {
            font: font.into(),
            bpp,
            dictionary: PatternDictionary::from_exported(packed),
        }
    }

    /// Bits-per-pixel this codec targets.
    pub fn bpp(&self) -> Bpp {
        self.bpp
    }

    /// The shared pattern dictionary.
    pub fn dictionary(&self) -> &PatternDictionary {
        &self.dictionary
    }

    /// Export the finalized dictionary entries for publication alongside
    /// the glyph table.
    pub fn export_dictionary(&self) -> Vec<u8> {
        self.dictionary.export()
    }

    fn check_geometry(&self, pixels: &[u8], width: u16, height: u16) -> Result<()> {
        let expected = self.bpp.packed_len(width, height);
        if pixels.len() != expected {
            return Err(RleError::buffer_size(expected, pixels.len()));
        }
        Ok(())
    }

    /// Counting pass over one glyph: feed its double patterns into the
    /// dictionary, discard everything else. Run this over every glyph of
    /// the font before [`finalize`](Self::finalize).
    ///
    /// The 1bpp codec has no dictionary, so at 1bpp this only validates
    /// geometry.
    pub fn survey(&mut self, pixels: &[u8], width: u16, height: u16) -> Result<()> {
        self.check_geometry(pixels, width, height)?;
        if self.bpp == Bpp::Four {
            let values = Bpp::Four.unpack(pixels);
            packer::survey(&runs_from_values(&values), &mut self.dictionary);
        }
        Ok(())
    }

    /// Freeze the dictionary ranking between the counting and encoding
    /// passes. Idempotent.
    pub fn finalize(&mut self) {
        self.dictionary.finalize();
    }

    /// Whether the dictionary ranking is frozen.
    pub fn is_finalized(&self) -> bool {
        self.dictionary.is_finalized()
    }

    /// Encode one glyph, self-checking the result.
    ///
    /// Falls back to [`Method::Raw`] when compression does not shrink the
    /// buffer. The output is always decoded and compared against the
    /// input before being returned; a mismatch aborts with the glyph's
    /// identity rather than ever emitting a corrupt table.
    pub fn encode(
        &self,
        pixels: &[u8],
        width: u16,
        height: u16,
        code_point: u32,
    ) -> Result<Encoded> {
        self.check_geometry(pixels, width, height)?;

        let compressed = match self.bpp {
            Bpp::Four => compress_4bpp(pixels, &self.dictionary),
            Bpp::One => compress_1bpp(pixels, AltConfig::BYTE),
        };
        let (method, data) = if compressed.len() < pixels.len() {
            (Method::Rle, compressed)
        } else {
            (Method::Raw, pixels.to_vec())
        };

        let decoded = self.decode(method, &data)?;
        if decoded != pixels {
            return Err(RleError::verification_failed(GlyphId::new(
                &self.font,
                code_point,
            )));
        }

        Ok(Encoded { method, data })
    }

    /// Decode one glyph by its method tag.
    ///
    /// For 4bpp [`Method::Rle`] data that used indexed double patterns,
    /// this codec must hold the same finalized dictionary the encoder
    /// used (or one rebuilt from its export).
    pub fn decode(&self, method: Method, data: &[u8]) -> Result<Vec<u8>> {
        match (method, self.bpp) {
            (Method::Raw, _) => Ok(data.to_vec()),
            (Method::Rle, Bpp::Four) => decompress_4bpp(data, &self.dictionary),
            (Method::Rle, Bpp::One) => Ok(decompress_1bpp(data, AltConfig::BYTE)),
        }
    }

    /// Encode a standalone icon into a self-describing container file.
    pub fn encode_icon(&self, pixels: &[u8], width: u16, height: u16) -> Result<Vec<u8>> {
        let encoded = self.encode(pixels, width, height, 0)?;
        container::wrap(
            IconHeader {
                width,
                height,
                bpp: self.bpp,
                method: encoded.method,
            },
            &encoded.data,
        )
    }

    /// Decode a standalone icon container back into its packed buffer.
    pub fn decode_icon(&self, file: &[u8]) -> Result<Vec<u8>> {
        let (header, payload) = container::parse(file)?;
        let pixels = match (header.method, header.bpp) {
            (Method::Raw, _) => payload.to_vec(),
            (Method::Rle, Bpp::Four) => decompress_4bpp(payload, &self.dictionary)?,
            (Method::Rle, Bpp::One) => decompress_1bpp(payload, AltConfig::BYTE),
        };
        let expected = header.bpp.packed_len(header.width, header.height);
        if pixels.len() != expected {
            return Err(RleError::buffer_size(expected, pixels.len()));
        }
        Ok(pixels)
    }
}
