//! Quartet-level I/O for the glyph wire format.
//!
//! The 4bpp wire format is nibble-oriented: every field is a quartet (4-bit
//! unit), packed two per byte with the most-significant nibble first. This
//! module provides `QuartetWriter` and `QuartetReader` over that layout,
//! the fixed-width analogue of a variable-length bit stream.
//!
//! # Example
//!
//! ```
//! use glyphpack_core::quartet::{QuartetReader, QuartetWriter};
//!
//! let mut writer = QuartetWriter::new();
//! writer.push(0xA);
//! writer.push(0xB);
//! writer.push(0xC);
//! let bytes = writer.finish();
//! assert_eq!(bytes, [0xAB, 0xC0]); // final odd quartet padded with zero
//!
//! let mut reader = QuartetReader::new(&bytes);
//! assert_eq!(reader.read().unwrap(), 0xA);
//! assert_eq!(reader.read().unwrap(), 0xB);
//! assert_eq!(reader.read().unwrap(), 0xC);
//! ```

use crate::error::{GlyphPackError, Result};

/// Accumulates quartets into a byte vector, most-significant nibble first.
#[derive(Debug, Default)]
pub struct QuartetWriter {
    bytes: Vec<u8>,
    /// High nibble of a byte still waiting for its low half.
    pending: Option<u8>,
    written: usize,
}

impl QuartetWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `quartets` quartets.
    pub fn with_capacity(quartets: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(quartets.div_ceil(2)),
            pending: None,
            written: 0,
        }
    }

    /// Append one quartet. Values above 0xF are a caller bug.
    pub fn push(&mut self, quartet: u8) {
        debug_assert!(quartet <= 0xF, "quartet field overflow: {quartet:#x}");
        let quartet = quartet & 0xF;
        match self.pending.take() {
            Some(high) => self.bytes.push((high << 4) | quartet),
            None => self.pending = Some(quartet),
        }
        self.written += 1;
    }

    /// Number of quartets pushed so far.
    pub fn len(&self) -> usize {
        self.written
    }

    /// Whether nothing has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Finish the stream, zero-padding a trailing odd quartet, and return
    /// the packed bytes.
    pub fn finish(mut self) -> Vec<u8> {
        if let Some(high) = self.pending.take() {
            self.bytes.push(high << 4);
        }
        self.bytes
    }
}

/// Reads quartets back out of a packed byte slice.
#[derive(Debug)]
pub struct QuartetReader<'a> {
    data: &'a [u8],
    /// Next quartet index (two per byte).
    pos: usize,
}

impl<'a> QuartetReader<'a> {
    /// Create a reader over `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Total number of quartets in the underlying slice.
    pub fn total(&self) -> usize {
        self.data.len() * 2
    }

    /// Current quartet position (for error reporting).
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Quartets left to read.
    pub fn remaining(&self) -> usize {
        self.total() - self.pos
    }

    /// Read the next quartet.
    pub fn read(&mut self) -> Result<u8> {
        let quartet = self
            .peek()
            .ok_or_else(|| GlyphPackError::unexpected_eof(self.pos))?;
        self.pos += 1;
        Ok(quartet)
    }

    /// Look at the next quartet without consuming it.
    pub fn peek(&self) -> Option<u8> {
        let byte = *self.data.get(self.pos / 2)?;
        Some(if self.pos % 2 == 0 {
            byte >> 4
        } else {
            byte & 0xF
        })
    }
}
