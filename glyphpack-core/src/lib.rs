//! # Glyphpack Core
//!
//! Core components for the Glyphpack glyph/icon compression library.
//!
//! This crate provides the fundamental building blocks the codec crate is
//! built on:
//!
//! - [`quartet`]: nibble-oriented stream I/O for the 4bpp wire format
//! - [`pixels`]: packed pixel buffer ⇄ flat value stream conversion
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! Glyphpack is layered:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ L3: Facade                                           │
//! │     FontCodec, method tags, icon container           │
//! ├──────────────────────────────────────────────────────┤
//! │ L2: Codec                                            │
//! │     run normalizer, pattern dictionary, command      │
//! │     packer, alternating-run codec                    │
//! ├──────────────────────────────────────────────────────┤
//! │ L1: Quartet stream + pixel packing (this crate)      │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use glyphpack_core::pixels::Bpp;
//! use glyphpack_core::quartet::QuartetWriter;
//!
//! let values = Bpp::Four.unpack(&[0xF7]);
//! assert_eq!(values, [0xF, 0x7]);
//!
//! let mut writer = QuartetWriter::new();
//! writer.push(0xF);
//! writer.push(0x7);
//! assert_eq!(writer.finish(), [0xF7]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod pixels;
pub mod quartet;

// Re-exports for convenience
pub use error::{GlyphPackError, Result};
pub use pixels::Bpp;
pub use quartet::{QuartetReader, QuartetWriter};
