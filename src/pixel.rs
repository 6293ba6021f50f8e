/// Pixel memory layout of a decoded screen.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// One palette index per byte, row-major (chunky).
    Indexed8,
    /// Atari ST interleaved bitplanes: each group of 16 pixels is stored as
    /// `planes` consecutive big-endian words, plane 0 first. Bit 15 of each
    /// word is the leftmost pixel of the group.
    AtariPlanar { planes: u8 },
}

impl PixelLayout {
    /// Bits of index data per pixel.
    pub fn bits_per_pixel(&self) -> usize {
        match self {
            Self::Indexed8 => 8,
            Self::AtariPlanar { planes } => usize::from(*planes),
        }
    }

    /// Bytes occupied by one row of `width` pixels.
    pub fn bytes_per_row(&self, width: u32) -> usize {
        match self {
            Self::Indexed8 => width as usize,
            // 16 pixels per word group, 2 bytes per plane word
            Self::AtariPlanar { planes } => (width as usize).div_ceil(16) * 2 * usize::from(*planes),
        }
    }

    /// Whether the layout already holds one index byte per pixel.
    pub fn is_chunky(&self) -> bool {
        matches!(self, Self::Indexed8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atari_row_sizes() {
        // 32000-byte bodies: 160 x 200 in low/medium, 80 x 400 in high
        assert_eq!(PixelLayout::AtariPlanar { planes: 4 }.bytes_per_row(320), 160);
        assert_eq!(PixelLayout::AtariPlanar { planes: 2 }.bytes_per_row(640), 160);
        assert_eq!(PixelLayout::AtariPlanar { planes: 1 }.bytes_per_row(640), 80);
        assert_eq!(PixelLayout::Indexed8.bytes_per_row(256), 256);
    }
}
