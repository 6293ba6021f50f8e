//! # zenretro
//!
//! Detection and indexed-color decoding of 1980s home-computer screen dumps.
//!
//! ## Supported Formats
//!
//! | Format | Length | Signature |
//! |---|---|---|
//! | Degas (PI1/PI2/PI3) | 32034 | resolution word, mode bits ≤ 2 |
//! | Degas Elite (uncompressed) | 32066 | same as Degas; animation block recognized only |
//! | NEOchrome (low resolution) | 32128 | flag, resolution and image offsets all 0 |
//! | ZX Spectrum screen | 6912 | length only |
//!
//! Atari pictures decode zero-copy to their interleaved bitplane body plus
//! the raw 16-entry palette. ZX Spectrum screens decode to a 256×192 buffer
//! of indices into the fixed 16-color (normal + bright) palette.
//!
//! ## Non-Goals
//!
//! - Color conversion of palette entries (ST 9-bit, STE 12-bit, ...)
//! - Display, palette cycling or flash playback
//! - Encoding
//! - Compressed Degas Elite (PC1/PC2/PC3) files; [`packbits`] is exposed
//!   for callers that handle those themselves
//!
//! ## Usage
//!
//! ```no_run
//! use zenretro::{DecodeRequest, ImageInfo, ScreenFormat};
//! use enough::Unstoppable;
//!
//! let data: &[u8] = &[]; // your .pi1/.neo/.scr bytes
//!
//! // Classify without decoding
//! if zenretro::detect(data) == ScreenFormat::Unrecognized {
//!     return Ok(());
//! }
//! let info = ImageInfo::from_bytes(data)?;
//! println!("{}x{} {:?}", info.width, info.height, info.format);
//!
//! // One palette index per pixel, whatever the source layout
//! let decoded = DecodeRequest::new(data).decode_indexed(Unstoppable)?;
//! assert_eq!(decoded.pixels().len(), (decoded.width * decoded.height) as usize);
//! # Ok::<(), zenretro::ScreenError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod info;
mod limits;
mod pixel;

pub mod atari;
pub mod degas;
pub mod endian;
pub mod neochrome;
pub mod packbits;
pub mod zx;

mod decode;

// Re-exports
pub use atari::{AtariPalette, Resolution};
pub use decode::{DecodeOutput, DecodeRequest};
pub use enough::{Stop, Unstoppable};
pub use error::ScreenError;
pub use info::{ImageInfo, ScreenFormat, detect};
pub use limits::Limits;
pub use packbits::unpack_bits;
pub use pixel::PixelLayout;

/// Detect the format and decode in its native layout.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput<'_>, ScreenError> {
    DecodeRequest::new(data).decode(stop)
}

/// Detect the format and decode to one palette index per pixel.
pub fn decode_indexed(data: &[u8], stop: impl Stop) -> Result<DecodeOutput<'_>, ScreenError> {
    DecodeRequest::new(data).decode_indexed(stop)
}

/// Decode a Degas or Degas Elite picture. Anything else is
/// [`ScreenError::UnrecognizedFormat`].
pub fn decode_degas(data: &[u8], stop: impl Stop) -> Result<DecodeOutput<'_>, ScreenError> {
    degas::decode(data, None, &stop)
}

/// Decode a NEOchrome picture.
pub fn decode_neochrome(data: &[u8], stop: impl Stop) -> Result<DecodeOutput<'_>, ScreenError> {
    neochrome::decode(data, None, &stop)
}

/// Decode a ZX Spectrum screen dump.
pub fn decode_zx_screen(data: &[u8], stop: impl Stop) -> Result<DecodeOutput<'_>, ScreenError> {
    zx::decode(data, None, &stop)
}
