//! ZX Spectrum screen memory to chunky indices.
//!
//! Screen memory is 6144 bytes of 1bpp bitmap followed by 768 attribute
//! bytes. Bitmap rows are interleaved the way the ULA addresses them:
//!
//! ```text
//! pixel byte  010S SRRR CCCX XXXX
//! attribute   0101 10YY YYYX XXXX
//!
//! row = SSCC CRRR   (S = third, C = cell row, R = pixel row in cell)
//!     = YYYY Y000   (Y = attribute row)
//! ```

use alloc::vec;
use alloc::vec::Vec;

use super::{ATTR_LEN, Attribute, BITMAP_LEN, COLUMNS, PIXEL_COUNT, SCREEN_LEN, WIDTH};
use crate::error::ScreenError;

/// Bitmap offset of the first byte of pixel row `row` (0..192).
pub const fn pixel_row_base(row: usize) -> usize {
    ((row & 0xC0) << 5) + ((row & 0x07) << 8) + ((row & 0x38) << 2)
}

/// Offset, from the start of the screen, of the first attribute byte used
/// by pixel row `row`. All eight rows of a cell share the same attributes.
pub const fn attr_row_base(row: usize) -> usize {
    BITMAP_LEN + ((row & 0xF8) << 2)
}

/// Decode a 6912-byte screen into `dst`, one palette index (0..=15) per
/// pixel, row-major, 256 pixels per row.
///
/// Fails with [`ScreenError::UnrecognizedFormat`] unless `screen` is exactly
/// 6912 bytes, and with [`ScreenError::DestinationOverflow`] if `dst` holds
/// fewer than 49152 bytes. Bytes of `dst` past 49152 are left untouched.
pub fn decode_screen_into(screen: &[u8], dst: &mut [u8]) -> Result<(), ScreenError> {
    if screen.len() != SCREEN_LEN {
        return Err(ScreenError::UnrecognizedFormat);
    }
    let capacity = dst.len();
    let dst = dst
        .get_mut(..PIXEL_COUNT)
        .ok_or(ScreenError::DestinationOverflow {
            capacity,
            needed: PIXEL_COUNT,
        })?;

    let (bitmap, attrs) = screen.split_at(BITMAP_LEN);
    debug_assert_eq!(attrs.len(), ATTR_LEN);

    for (row, out_row) in dst.chunks_exact_mut(WIDTH).enumerate() {
        let pixels = &bitmap[pixel_row_base(row)..][..COLUMNS];
        let attr_start = attr_row_base(row) - BITMAP_LEN;
        let cells = &attrs[attr_start..][..COLUMNS];

        for ((&bits, &attr), out) in pixels
            .iter()
            .zip(cells)
            .zip(out_row.chunks_exact_mut(8))
        {
            let attr = Attribute(attr);
            let (ink, paper) = (attr.ink(), attr.paper());
            for (i, px) in out.iter_mut().enumerate() {
                *px = if bits & (0x80 >> i) != 0 { ink } else { paper };
            }
        }
    }

    Ok(())
}

/// Allocating form of [`decode_screen_into`].
pub fn decode_screen(screen: &[u8]) -> Result<Vec<u8>, ScreenError> {
    let mut out = vec![0u8; PIXEL_COUNT];
    decode_screen_into(screen, &mut out)?;
    Ok(out)
}

/// Write a per-pixel flash mask: 1 where the pixel's attribute cell has the
/// flash bit set, 0 elsewhere. Same geometry and capacity rules as
/// [`decode_screen_into`].
///
/// Flashing cells swap ink and paper every 16 frames on real hardware;
/// playing that back is up to the caller.
pub fn flash_mask_into(screen: &[u8], dst: &mut [u8]) -> Result<(), ScreenError> {
    if screen.len() != SCREEN_LEN {
        return Err(ScreenError::UnrecognizedFormat);
    }
    let capacity = dst.len();
    let dst = dst
        .get_mut(..PIXEL_COUNT)
        .ok_or(ScreenError::DestinationOverflow {
            capacity,
            needed: PIXEL_COUNT,
        })?;

    for (row, out_row) in dst.chunks_exact_mut(WIDTH).enumerate() {
        let cells = &screen[attr_row_base(row)..][..COLUMNS];
        for (&attr, out) in cells.iter().zip(out_row.chunks_exact_mut(8)) {
            out.fill(u8::from(Attribute(attr).flash()));
        }
    }

    Ok(())
}
