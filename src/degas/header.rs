//! Degas / Degas Elite header.
//!
//! ```text
//! offset  size   field
//!      0     2   resolution word (big-endian, bits 0-1 = mode)
//!      2    32   palette, 16 big-endian words
//!     34 32000   screen body
//!  32034    32   Degas Elite only: color animation block
//! ```

use crate::atari::{AtariPalette, BODY_LEN, Resolution};
use crate::endian::{ByteOrder, read_u16};
use crate::error::ScreenError;
use crate::info::ScreenFormat;

pub(crate) const RESOLUTION_OFFSET: usize = 0;
pub(crate) const PALETTE_OFFSET: usize = 2;
pub(crate) const BODY_OFFSET: usize = 34;

/// File length of a plain Degas picture (PI1/PI2/PI3).
pub const DEGAS_LEN: usize = BODY_OFFSET + BODY_LEN;
/// File length of an uncompressed Degas Elite picture.
pub const DEGAS_ELITE_LEN: usize = DEGAS_LEN + ANIMATION_LEN;
/// Length of the Degas Elite animation block.
pub const ANIMATION_LEN: usize = 32;

/// Classify a buffer as Degas, Degas Elite, or neither.
///
/// The length selects the candidate; the resolution word must then carry a
/// valid mode in its low two bits. Other bits of the word are not checked.
pub(crate) fn classify(data: &[u8]) -> ScreenFormat {
    let candidate = match data.len() {
        DEGAS_LEN => ScreenFormat::Degas,
        DEGAS_ELITE_LEN => ScreenFormat::DegasElite,
        _ => return ScreenFormat::Unrecognized,
    };
    match read_u16(data, RESOLUTION_OFFSET, ByteOrder::Big) {
        Some(word) if Resolution::from_word(word).is_some() => candidate,
        _ => ScreenFormat::Unrecognized,
    }
}

/// Parsed Degas header fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DegasHeader {
    /// The resolution word as stored, reserved bits included.
    pub resolution_word: u16,
    pub resolution: Resolution,
    pub palette: AtariPalette,
    /// Whether the file carries the Degas Elite animation block.
    pub elite: bool,
}

impl DegasHeader {
    /// Parse the header of a Degas or Degas Elite file.
    ///
    /// Returns [`ScreenError::UnrecognizedFormat`] for anything
    /// [`crate::detect`] would not classify as Degas.
    pub fn parse(data: &[u8]) -> Result<Self, ScreenError> {
        let elite = match classify(data) {
            ScreenFormat::Degas => false,
            ScreenFormat::DegasElite => true,
            _ => return Err(ScreenError::UnrecognizedFormat),
        };
        let resolution_word = read_u16(data, RESOLUTION_OFFSET, ByteOrder::Big)
            .ok_or(ScreenError::UnrecognizedFormat)?;
        let resolution =
            Resolution::from_word(resolution_word).ok_or(ScreenError::UnrecognizedFormat)?;
        let palette =
            AtariPalette::read(data, PALETTE_OFFSET).ok_or(ScreenError::UnrecognizedFormat)?;

        log::trace!(
            "degas header: resolution word {resolution_word:#06x} ({resolution:?}), elite {elite}"
        );

        Ok(Self {
            resolution_word,
            resolution,
            palette,
            elite,
        })
    }

    pub fn format(&self) -> ScreenFormat {
        if self.elite {
            ScreenFormat::DegasElite
        } else {
            ScreenFormat::Degas
        }
    }
}

/// The 32000-byte screen body of a Degas file.
pub(crate) fn body(data: &[u8]) -> Result<&[u8], ScreenError> {
    data.get(BODY_OFFSET..BODY_OFFSET + BODY_LEN)
        .ok_or(ScreenError::UnrecognizedFormat)
}

/// The raw Degas Elite animation block, if the file has one.
///
/// The block's layout is not decoded; it is handed back byte for byte.
pub fn animation_block(data: &[u8]) -> Option<&[u8]> {
    match classify(data) {
        ScreenFormat::DegasElite => data.get(DEGAS_LEN..DEGAS_ELITE_LEN),
        _ => None,
    }
}
