//! NEOchrome header (128 bytes, all words big-endian).
//!
//! ```text
//! offset  size   field
//!      0     2   flag, always 0
//!      2     2   resolution, always 0 (low) for accepted files
//!      4    32   palette, 16 words
//!     36    12   filename, usually "        .   "
//!     48     2   color animation limits
//!     50     2   color animation speed and direction
//!     52     2   color steps per slide
//!     54     2   image x offset, always 0
//!     56     2   image y offset, always 0
//!     58     2   image width, 320
//!     60     2   image height, 200
//!     62    66   reserved
//!    128 32000   screen body
//! ```

use crate::atari::{AtariPalette, BODY_LEN, Resolution};
use crate::endian::{ByteOrder, read_i16, read_u16};
use crate::error::ScreenError;

const FLAG_OFFSET: usize = 0;
const RESOLUTION_OFFSET: usize = 2;
const PALETTE_OFFSET: usize = 4;
const FILENAME_OFFSET: usize = 36;
const ANIM_LIMITS_OFFSET: usize = 48;
const ANIM_SPEED_OFFSET: usize = 50;
const STEPS_OFFSET: usize = 52;
const X_OFFSET_OFFSET: usize = 54;
const Y_OFFSET_OFFSET: usize = 56;
const WIDTH_OFFSET: usize = 58;
const HEIGHT_OFFSET: usize = 60;
pub(crate) const BODY_OFFSET: usize = 128;

/// File length of a NEOchrome picture.
pub const NEOCHROME_LEN: usize = BODY_OFFSET + BODY_LEN;

/// Whether `data` is a low resolution NEOchrome picture.
///
/// Requires the exact file length and zero flag, resolution and image offset
/// words.
pub(crate) fn is_neochrome(data: &[u8]) -> bool {
    if data.len() != NEOCHROME_LEN {
        return false;
    }
    [FLAG_OFFSET, RESOLUTION_OFFSET, X_OFFSET_OFFSET, Y_OFFSET_OFFSET]
        .into_iter()
        .all(|offset| read_u16(data, offset, ByteOrder::Big) == Some(0))
}

/// Color cycling parameters stored in a NEOchrome header.
///
/// This is metadata only; nothing in this crate animates the palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorAnimation {
    /// Limits word bit 15: the animation fields are meaningful.
    pub valid: bool,
    /// Leftmost (lower) palette index of the cycled range.
    pub left: u8,
    /// Rightmost (upper) palette index of the cycled range.
    pub right: u8,
    /// Speed word bit 15: cycling is switched on.
    pub active: bool,
    /// Signed low byte of the speed word. Negative scrolls left; the delay
    /// between steps is `|vblanks| - 1` vertical blanks.
    pub vblanks: i8,
}

impl ColorAnimation {
    pub fn from_words(limits: u16, speed: u16) -> Self {
        let range = limits as u8;
        Self {
            valid: limits & 0x8000 != 0,
            left: range >> 4,
            right: range & 0x0F,
            active: speed & 0x8000 != 0,
            vblanks: speed as u8 as i8,
        }
    }

    /// Whether cycling runs toward lower palette indices.
    pub fn scrolls_left(&self) -> bool {
        self.vblanks < 0
    }

    /// Vertical blanks to wait between steps.
    pub fn delay_vblanks(&self) -> u8 {
        self.vblanks.unsigned_abs().saturating_sub(1)
    }
}

/// Parsed NEOchrome header fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NeoHeader {
    pub flag: u16,
    pub resolution_word: u16,
    pub palette: AtariPalette,
    /// Raw filename field, not necessarily ASCII or NUL terminated.
    pub filename: [u8; 12],
    pub color_animation: ColorAnimation,
    /// Color steps to show before the next picture in a slide show.
    pub steps: u16,
    pub x_offset: i16,
    pub y_offset: i16,
    /// Declared width. Expected to be 320, not enforced.
    pub width: u16,
    /// Declared height. Expected to be 200, not enforced.
    pub height: u16,
}

impl NeoHeader {
    /// Parse the header of a NEOchrome file.
    ///
    /// Returns [`ScreenError::UnrecognizedFormat`] for anything
    /// [`crate::detect`] would not classify as NEOchrome.
    pub fn parse(data: &[u8]) -> Result<Self, ScreenError> {
        if !is_neochrome(data) {
            return Err(ScreenError::UnrecognizedFormat);
        }
        let word = |offset: usize| {
            read_u16(data, offset, ByteOrder::Big).ok_or(ScreenError::UnrecognizedFormat)
        };
        let signed = |offset: usize| {
            read_i16(data, offset, ByteOrder::Big).ok_or(ScreenError::UnrecognizedFormat)
        };

        let palette =
            AtariPalette::read(data, PALETTE_OFFSET).ok_or(ScreenError::UnrecognizedFormat)?;
        let mut filename = [0u8; 12];
        filename.copy_from_slice(&data[FILENAME_OFFSET..FILENAME_OFFSET + 12]);

        let header = Self {
            flag: word(FLAG_OFFSET)?,
            resolution_word: word(RESOLUTION_OFFSET)?,
            palette,
            filename,
            color_animation: ColorAnimation::from_words(
                word(ANIM_LIMITS_OFFSET)?,
                word(ANIM_SPEED_OFFSET)?,
            ),
            steps: word(STEPS_OFFSET)?,
            x_offset: signed(X_OFFSET_OFFSET)?,
            y_offset: signed(Y_OFFSET_OFFSET)?,
            width: word(WIDTH_OFFSET)?,
            height: word(HEIGHT_OFFSET)?,
        };
        log::trace!(
            "neochrome header: declared {}x{}, animation {:?}",
            header.width,
            header.height,
            header.color_animation
        );
        Ok(header)
    }

    /// Always low resolution; other modes are rejected during detection.
    pub fn resolution(&self) -> Resolution {
        Resolution::Low
    }
}

/// The 32000-byte screen body of a NEOchrome file.
pub(crate) fn body(data: &[u8]) -> Result<&[u8], ScreenError> {
    data.get(BODY_OFFSET..BODY_OFFSET + BODY_LEN)
        .ok_or(ScreenError::UnrecognizedFormat)
}
