//! Codec-level error types.
//!
//! Every failure here is terminal for the glyph being processed: the codec
//! has no retry path. Fatal variants carry enough provenance (font
//! identifier, character code point) for a human to locate the offending
//! raster.

use glyphpack_core::GlyphPackError;
use thiserror::Error;

/// Identifies one glyph within a font-compilation run, for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphId {
    /// Font (or icon table) identifier.
    pub font: String,
    /// Unicode code point of the glyph, 0 for non-character rasters.
    pub code_point: u32,
}

impl GlyphId {
    /// Create a glyph identifier.
    pub fn new(font: impl Into<String>, code_point: u32) -> Self {
        Self {
            font: font.into(),
            code_point,
        }
    }
}

impl std::fmt::Display for GlyphId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} U+{:04X}", self.font, self.code_point)
    }
}

/// Compression/decompression errors for the glyph codec.
#[derive(Debug, Error)]
pub enum RleError {
    /// The encoder's internal decode of its own output did not reproduce
    /// the input. Aborts the build; corrupt static tables must never reach
    /// firmware.
    #[error("Round-trip verification failed for glyph {glyph}")]
    VerificationFailed {
        /// The glyph whose encode could not be verified.
        glyph: GlyphId,
    },

    /// Input buffer length does not match the declared raster geometry.
    #[error("Pixel buffer is {actual} bytes, expected {expected} for the declared geometry")]
    BufferSize {
        /// Byte length implied by width, height and bits-per-pixel.
        expected: usize,
        /// Byte length actually supplied.
        actual: usize,
    },

    /// The wire stream ended inside a command.
    #[error("Compressed stream truncated at quartet {quartet}")]
    Truncated {
        /// Quartet position of the partial command.
        quartet: usize,
    },

    /// An indexed double-pattern command referenced a dictionary slot that
    /// does not exist. The decoder was handed the wrong (or an
    /// unfinalized) pattern dictionary.
    #[error("Pattern index {index} out of range ({available} dictionary entries)")]
    BadPatternIndex {
        /// Index read from the stream.
        index: u8,
        /// Number of indexable entries in the dictionary.
        available: usize,
    },

    /// Unknown compression method tag.
    #[error("Unknown compression method tag: {0}")]
    BadMethod(u8),

    /// Payload too large for the container's 3-byte length field.
    #[error("Payload of {len} bytes exceeds the container length field (max {max})")]
    PayloadTooLarge {
        /// Payload length.
        len: usize,
        /// Largest representable payload length.
        max: usize,
    },

    /// Container data shorter than the fixed header.
    #[error("Container of {len} bytes is shorter than the {header} byte header")]
    HeaderTooShort {
        /// Bytes available.
        len: usize,
        /// Required header size.
        header: usize,
    },

    /// Container payload length disagrees with the bytes that follow.
    #[error("Container declares {declared} payload bytes but {actual} follow")]
    LengthMismatch {
        /// Length from the header.
        declared: usize,
        /// Bytes actually present after the header.
        actual: usize,
    },

    /// Error from the core layer (quartet stream, pixel packing).
    #[error(transparent)]
    Core(#[from] GlyphPackError),
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, RleError>;

impl RleError {
    /// Create a verification failure for the given glyph.
    pub fn verification_failed(glyph: GlyphId) -> Self {
        Self::VerificationFailed { glyph }
    }

    /// Create a buffer-size mismatch error.
    pub fn buffer_size(expected: usize, actual: usize) -> Self {
        Self::BufferSize { expected, actual }
    }

    /// Create a truncated-stream error.
    pub fn truncated(quartet: usize) -> Self {
        Self::Truncated { quartet }
    }

    /// Create a bad-pattern-index error.
    pub fn bad_pattern_index(index: u8, available: usize) -> Self {
        Self::BadPatternIndex { index, available }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_id_display() {
        let glyph = GlyphId::new("inter_medium_36", 0xE8);
        assert_eq!(glyph.to_string(), "inter_medium_36 U+00E8");
    }

    #[test]
    fn test_error_display() {
        let err = RleError::verification_failed(GlyphId::new("inter_regular_28", 0x41));
        assert!(err.to_string().contains("inter_regular_28 U+0041"));

        let err = RleError::bad_pattern_index(12, 5);
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains('5'));
    }

    #[test]
    fn test_core_error_conversion() {
        let core = GlyphPackError::unexpected_eof(3);
        let err: RleError = core.into();
        assert!(matches!(err, RleError::Core(_)));
    }
}
