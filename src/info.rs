use crate::atari::Resolution;
use crate::degas::{self, DEGAS_ELITE_LEN, DEGAS_LEN, DegasHeader};
use crate::error::ScreenError;
use crate::neochrome::{self, NEOCHROME_LEN};
use crate::pixel::PixelLayout;
use crate::zx;

/// Screen dump format, decided from the buffer length and header sentinels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScreenFormat {
    /// Degas (PI1/PI2/PI3), 32034 bytes.
    Degas,
    /// Degas Elite uncompressed, 32066 bytes. The trailing animation block
    /// is recognized but not decoded.
    DegasElite,
    /// NEOchrome, 32128 bytes, low resolution only.
    Neochrome,
    /// ZX Spectrum screen memory dump, 6912 bytes.
    ZxSpectrum,
    /// None of the above.
    Unrecognized,
}

impl ScreenFormat {
    pub fn name(self) -> &'static str {
        match self {
            Self::Degas => "Degas",
            Self::DegasElite => "Degas Elite",
            Self::Neochrome => "NEOchrome",
            Self::ZxSpectrum => "ZX Spectrum screen",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Exact file length that identifies the format.
    pub fn file_len(self) -> Option<usize> {
        match self {
            Self::Degas => Some(DEGAS_LEN),
            Self::DegasElite => Some(DEGAS_ELITE_LEN),
            Self::Neochrome => Some(NEOCHROME_LEN),
            Self::ZxSpectrum => Some(zx::SCREEN_LEN),
            Self::Unrecognized => None,
        }
    }

    pub fn is_recognized(self) -> bool {
        self != Self::Unrecognized
    }
}

/// Classify `data`. Total and side-effect free: every buffer maps to exactly
/// one format, and only the length plus a few header words are read.
pub fn detect(data: &[u8]) -> ScreenFormat {
    let format = match data.len() {
        DEGAS_LEN | DEGAS_ELITE_LEN => degas::classify(data),
        NEOCHROME_LEN if neochrome::is_neochrome(data) => ScreenFormat::Neochrome,
        _ if zx::is_screen(data) => ScreenFormat::ZxSpectrum,
        _ => ScreenFormat::Unrecognized,
    };
    log::trace!("detect: {} bytes -> {}", data.len(), format.name());
    format
}

/// Image metadata obtained without decoding pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: ScreenFormat,
    /// Layout [`crate::decode`] returns the pixels in.
    pub native_layout: PixelLayout,
    /// Number of palette entries the pixel indices address.
    pub colors: u16,
    /// Pixel width divided by pixel height.
    pub aspect_ratio: f32,
}

impl ImageInfo {
    /// Probe image header. Returns [`ScreenError::UnrecognizedFormat`] for
    /// anything [`detect`] rejects.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ScreenError> {
        match detect(data) {
            ScreenFormat::Degas | ScreenFormat::DegasElite => {
                let header = DegasHeader::parse(data)?;
                Ok(Self::atari(header.format(), header.resolution))
            }
            ScreenFormat::Neochrome => Ok(Self::atari(ScreenFormat::Neochrome, Resolution::Low)),
            ScreenFormat::ZxSpectrum => Ok(Self {
                width: zx::WIDTH as u32,
                height: zx::HEIGHT as u32,
                format: ScreenFormat::ZxSpectrum,
                native_layout: PixelLayout::Indexed8,
                colors: zx::COLORS,
                aspect_ratio: 1.0,
            }),
            ScreenFormat::Unrecognized => Err(ScreenError::UnrecognizedFormat),
        }
    }

    fn atari(format: ScreenFormat, res: Resolution) -> Self {
        Self {
            width: res.width(),
            height: res.height(),
            format,
            native_layout: res.layout(),
            colors: res.colors(),
            aspect_ratio: res.aspect_ratio(),
        }
    }
}
