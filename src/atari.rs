//! Pieces shared by the Atari ST formats (Degas and NEOchrome).
//!
//! Both store a 32000-byte screen body of interleaved bitplanes, preceded
//! by a big-endian resolution word and 16 palette words.

use enough::Stop;

use crate::endian::{ByteOrder, read_u16};
use crate::error::ScreenError;
use crate::pixel::PixelLayout;

/// Size of an ST screen body in bytes.
pub const BODY_LEN: usize = 32000;

/// Number of entries in an ST palette.
pub const PALETTE_ENTRIES: usize = 16;

/// Atari ST video mode, taken from the low two bits of a resolution word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resolution {
    /// 320×200, 4 bitplanes, 16 colors.
    Low,
    /// 640×200, 2 bitplanes, 4 colors.
    Medium,
    /// 640×400, 1 bitplane, 2 colors.
    High,
}

impl Resolution {
    /// Decode the mode bits of a resolution word.
    ///
    /// Only bits 0–1 are inspected; the remaining bits are reserved and
    /// ignored. Mode 3 does not exist and yields `None`.
    pub fn from_word(word: u16) -> Option<Self> {
        match word & 0x3 {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            _ => None,
        }
    }

    /// The mode with `planes` bitplanes.
    pub fn from_planes(planes: u8) -> Option<Self> {
        match planes {
            4 => Some(Self::Low),
            2 => Some(Self::Medium),
            1 => Some(Self::High),
            _ => None,
        }
    }

    pub fn width(self) -> u32 {
        match self {
            Self::Low => 320,
            Self::Medium | Self::High => 640,
        }
    }

    pub fn height(self) -> u32 {
        match self {
            Self::Low | Self::Medium => 200,
            Self::High => 400,
        }
    }

    pub fn planes(self) -> u8 {
        match self {
            Self::Low => 4,
            Self::Medium => 2,
            Self::High => 1,
        }
    }

    /// Number of palette entries the mode can address.
    pub fn colors(self) -> u16 {
        1u16 << self.planes()
    }

    /// Pixel width divided by pixel height on a period monitor.
    /// Medium resolution pixels are half as wide as they are tall.
    pub fn aspect_ratio(self) -> f32 {
        match self {
            Self::Medium => 0.5,
            Self::Low | Self::High => 1.0,
        }
    }

    pub fn layout(self) -> PixelLayout {
        PixelLayout::AtariPlanar {
            planes: self.planes(),
        }
    }
}

/// The 16 palette words of an ST header, kept exactly as stored on disk.
///
/// Entries are opaque: interpreting them as 9-bit ST or 12-bit STE color is
/// left to the caller's palette code.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtariPalette {
    raw: [u8; PALETTE_ENTRIES * 2],
}

impl AtariPalette {
    /// Copy the 32 palette bytes starting at `offset`.
    pub(crate) fn read(data: &[u8], offset: usize) -> Option<Self> {
        let bytes = data.get(offset..offset + PALETTE_ENTRIES * 2)?;
        let mut raw = [0u8; PALETTE_ENTRIES * 2];
        raw.copy_from_slice(bytes);
        Some(Self { raw })
    }

    /// Build a palette from host-order entry values.
    pub fn from_entries(entries: [u16; PALETTE_ENTRIES]) -> Self {
        let mut raw = [0u8; PALETTE_ENTRIES * 2];
        for (dst, entry) in raw.chunks_exact_mut(2).zip(entries) {
            dst.copy_from_slice(&entry.to_be_bytes());
        }
        Self { raw }
    }

    /// Entry `index` as a host-order word, or `None` past entry 15.
    pub fn entry(&self, index: usize) -> Option<u16> {
        if index >= PALETTE_ENTRIES {
            return None;
        }
        read_u16(&self.raw, index * 2, ByteOrder::Big)
    }

    /// All entries as host-order words.
    pub fn entries(&self) -> [u16; PALETTE_ENTRIES] {
        let mut out = [0u16; PALETTE_ENTRIES];
        for (i, entry) in out.iter_mut().enumerate() {
            *entry = read_u16(&self.raw, i * 2, ByteOrder::Big).unwrap_or(0);
        }
        out
    }

    /// The palette bytes exactly as stored (big-endian words).
    pub fn as_bytes(&self) -> &[u8; PALETTE_ENTRIES * 2] {
        &self.raw
    }
}

impl core::fmt::Debug for AtariPalette {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.entries().iter().map(|e| Hex(*e)))
            .finish()
    }
}

struct Hex(u16);

impl core::fmt::Debug for Hex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// Convert an interleaved-bitplane ST body to one palette index per pixel.
///
/// `dst` must hold at least `width * height` bytes for the resolution;
/// otherwise [`ScreenError::DestinationOverflow`] is returned before anything
/// is written. A body shorter than [`BODY_LEN`] is rejected as
/// [`ScreenError::UnrecognizedFormat`].
pub fn planar_to_indexed(
    body: &[u8],
    resolution: Resolution,
    dst: &mut [u8],
    stop: &dyn Stop,
) -> Result<(), ScreenError> {
    let width = resolution.width() as usize;
    let height = resolution.height() as usize;
    let planes = usize::from(resolution.planes());
    let needed = width * height;

    let body = body.get(..BODY_LEN).ok_or(ScreenError::UnrecognizedFormat)?;
    let capacity = dst.len();
    let dst = dst
        .get_mut(..needed)
        .ok_or(ScreenError::DestinationOverflow { capacity, needed })?;

    let row_bytes = resolution.layout().bytes_per_row(resolution.width());
    let group_bytes = planes * 2;

    for (y, (src_row, out_row)) in body
        .chunks_exact(row_bytes)
        .zip(dst.chunks_exact_mut(width))
        .enumerate()
    {
        if y % 16 == 0 {
            stop.check()?;
        }
        for (group, out) in src_row
            .chunks_exact(group_bytes)
            .zip(out_row.chunks_exact_mut(16))
        {
            let mut words = [0u16; 4];
            for (p, word) in group.chunks_exact(2).enumerate() {
                words[p] = u16::from_be_bytes([word[0], word[1]]);
            }
            for (x, px) in out.iter_mut().enumerate() {
                let bit = 15 - x;
                let mut index = 0u8;
                for (p, word) in words[..planes].iter().enumerate() {
                    index |= (((*word >> bit) & 1) as u8) << p;
                }
                *px = index;
            }
        }
    }

    Ok(())
}
