//! Error types for Glyphpack core operations.

use thiserror::Error;

/// The error type for quartet-stream and pixel-buffer operations.
#[derive(Debug, Error)]
pub enum GlyphPackError {
    /// The quartet stream ended in the middle of a read.
    #[error("Unexpected end of quartet stream at quartet {position}")]
    UnexpectedEof {
        /// Quartet index at which the stream ran out.
        position: usize,
    },

    /// A bits-per-pixel value outside the supported set {1, 4}.
    #[error("Unsupported bits-per-pixel: {0} (must be 1 or 4)")]
    UnsupportedBpp(u8),

    /// A pixel value outside the domain of its bits-per-pixel format.
    #[error("Pixel value {value:#x} does not fit in {bpp} bit(s)")]
    PixelOutOfRange {
        /// The offending value.
        value: u8,
        /// Bits per pixel of the target format.
        bpp: u8,
    },
}

/// Result type alias for Glyphpack core operations.
pub type Result<T> = std::result::Result<T, GlyphPackError>;

impl GlyphPackError {
    /// Create an unexpected EOF error at the given quartet position.
    pub fn unexpected_eof(position: usize) -> Self {
        Self::UnexpectedEof { position }
    }

    /// Create a pixel-out-of-range error.
    pub fn pixel_out_of_range(value: u8, bpp: u8) -> Self {
        Self::PixelOutOfRange { value, bpp }
    }
}
