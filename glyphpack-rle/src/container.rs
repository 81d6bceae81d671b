//! Standalone icon container format.
//!
//! Glyphs live inside font tables and carry their geometry there, but a
//! standalone icon file is self-describing: an 8-byte header followed by
//! the payload.
//!
//! Layout:
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 2 | width, u16 little-endian |
//! | 2 | 2 | height, u16 little-endian |
//! | 4 | 1 | bits-per-pixel class in the high nibble, method in the low |
//! | 5 | 3 | payload length, little-endian |
//!
//! Bpp classes are 1bpp → 0, 2bpp → 1, 4bpp → 2. The 2bpp class exists in
//! the container format for uncompressed images produced elsewhere; this
//! codec never emits it and rejects it on parse.

use glyphpack_core::Bpp;

use crate::Method;
use crate::error::{Result, RleError};

/// Fixed container header size in bytes.
pub const HEADER_SIZE: usize = 8;

/// Largest payload the 3-byte length field can describe.
pub const MAX_PAYLOAD: usize = 0xFF_FFFF;

fn bpp_class(bpp: Bpp) -> u8 {
    match bpp {
        Bpp::One => 0,
        Bpp::Four => 2,
    }
}

fn bpp_from_class(class: u8) -> Result<Bpp> {
    match class {
        0 => Ok(Bpp::One),
        2 => Ok(Bpp::Four),
        // Class 1 is 2bpp; map every unknown class through the same
        // rejection as the bare bits value.
        1 => Err(glyphpack_core::GlyphPackError::UnsupportedBpp(2).into()),
        other => Err(glyphpack_core::GlyphPackError::UnsupportedBpp(other).into()),
    }
}

/// Parsed (or to-be-written) icon file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconHeader {
    /// Raster width in pixels.
    pub width: u16,
    /// Raster height in pixels.
    pub height: u16,
    /// Bits-per-pixel format of the raster.
    pub bpp: Bpp,
    /// Codec that produced the payload.
    pub method: Method,
}

impl IconHeader {
    /// Serialize the header for a payload of `payload_len` bytes.
    pub fn to_bytes(&self, payload_len: usize) -> Result<[u8; HEADER_SIZE]> {
        if payload_len > MAX_PAYLOAD {
            return Err(RleError::PayloadTooLarge {
                len: payload_len,
                max: MAX_PAYLOAD,
            });
        }
        let mut header = [0u8; HEADER_SIZE];
        header[0..2].copy_from_slice(&self.width.to_le_bytes());
        header[2..4].copy_from_slice(&self.height.to_le_bytes());
        header[4] = (bpp_class(self.bpp) << 4) | self.method as u8;
        header[5] = (payload_len & 0xFF) as u8;
        header[6] = ((payload_len >> 8) & 0xFF) as u8;
        header[7] = ((payload_len >> 16) & 0xFF) as u8;
        Ok(header)
    }
}

/// Wrap a payload into a complete icon file.
pub fn wrap(header: IconHeader, payload: &[u8]) -> Result<Vec<u8>> {
    let mut file = Vec::with_capacity(HEADER_SIZE + payload.len());
    file.extend_from_slice(&header.to_bytes(payload.len())?);
    file.extend_from_slice(payload);
    Ok(file)
}

/// Split an icon file into its header and payload.
pub fn parse(data: &[u8]) -> Result<(IconHeader, &[u8])> {
    if data.len() < HEADER_SIZE {
        return Err(RleError::HeaderTooShort {
            len: data.len(),
            header: HEADER_SIZE,
        });
    }
    let width = u16::from_le_bytes([data[0], data[1]]);
    let height = u16::from_le_bytes([data[2], data[3]]);
    let bpp = bpp_from_class(data[4] >> 4)?;
    let method = Method::try_from(data[4] & 0x0F)?;
    let declared =
        data[5] as usize | ((data[6] as usize) << 8) | ((data[7] as usize) << 16);

    let payload = &data[HEADER_SIZE..];
    if payload.len() != declared {
        return Err(RleError::LengthMismatch {
            declared,
            actual: payload.len(),
        });
    }

    Ok((
        IconHeader {
            width,
            height,
            bpp,
            method,
        },
        payload,
    ))
}
