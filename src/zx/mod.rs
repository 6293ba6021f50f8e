//! ZX Spectrum screen dumps (`.scr`, 6912 bytes).
//!
//! The file is a raw copy of screen memory with no header, so the length is
//! the only signature.

mod decode;

pub use decode::{attr_row_base, decode_screen, decode_screen_into, flash_mask_into, pixel_row_base};

use crate::decode::DecodeOutput;
use crate::error::ScreenError;
use crate::info::ScreenFormat;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use alloc::vec;
use enough::Stop;

pub const WIDTH: usize = 256;
pub const HEIGHT: usize = 192;
/// 1bpp bitmap bytes.
pub const BITMAP_LEN: usize = WIDTH * HEIGHT / 8;
/// One attribute byte per 8×8 cell.
pub const ATTR_LEN: usize = (WIDTH / 8) * (HEIGHT / 8);
pub const SCREEN_LEN: usize = BITMAP_LEN + ATTR_LEN;
pub const PIXEL_COUNT: usize = WIDTH * HEIGHT;
/// Palette size addressed by decoded indices (8 colors, normal and bright).
pub const COLORS: u16 = 16;
/// Bitmap bytes (and attribute cells) per row.
pub(crate) const COLUMNS: usize = WIDTH / 8;

pub(crate) fn is_screen(data: &[u8]) -> bool {
    data.len() == SCREEN_LEN
}

/// One attribute byte: `F B PPP III` (flash, bright, paper, ink).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Attribute(pub u8);

impl Attribute {
    pub fn bright(self) -> bool {
        self.0 & 0b0100_0000 != 0
    }

    pub fn flash(self) -> bool {
        self.0 & 0b1000_0000 != 0
    }

    /// Foreground index, 0..=7, or 8..=15 when bright.
    pub fn ink(self) -> u8 {
        (self.0 & 0b0000_0111) + self.bright_offset()
    }

    /// Background index, 0..=7, or 8..=15 when bright.
    pub fn paper(self) -> u8 {
        ((self.0 & 0b0011_1000) >> 3) + self.bright_offset()
    }

    fn bright_offset(self) -> u8 {
        if self.bright() { 8 } else { 0 }
    }
}

/// Decode a screen dump (called from DecodeRequest). Always allocates the
/// 49152-byte index buffer.
pub(crate) fn decode<'a>(
    data: &'a [u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput<'a>, ScreenError> {
    if !is_screen(data) {
        return Err(ScreenError::UnrecognizedFormat);
    }
    if let Some(limits) = limits {
        limits.check(WIDTH as u32, HEIGHT as u32)?;
        limits.check_memory(PIXEL_COUNT)?;
    }
    stop.check()?;
    let mut pixels = vec![0u8; PIXEL_COUNT];
    decode_screen_into(data, &mut pixels)?;
    log::debug!("zx spectrum: decoded {WIDTH}x{HEIGHT} screen");
    Ok(DecodeOutput::owned(
        pixels,
        WIDTH as u32,
        HEIGHT as u32,
        PixelLayout::Indexed8,
        ScreenFormat::ZxSpectrum,
        None,
        COLORS,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_fields() {
        let attr = Attribute(0b0100_0011);
        assert!(attr.bright());
        assert!(!attr.flash());
        assert_eq!(attr.ink(), 11);
        assert_eq!(attr.paper(), 8);

        let attr = Attribute(0b1011_1110);
        assert!(attr.flash());
        assert!(!attr.bright());
        assert_eq!(attr.ink(), 6);
        assert_eq!(attr.paper(), 7);
    }

    #[test]
    fn geometry() {
        assert_eq!(BITMAP_LEN, 6144);
        assert_eq!(ATTR_LEN, 768);
        assert_eq!(SCREEN_LEN, 6912);
        assert_eq!(PIXEL_COUNT, 49152);
    }
}
