use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use crate::atari::{self, AtariPalette, Resolution};
use crate::error::ScreenError;
use crate::info::{ScreenFormat, detect};
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::{degas, neochrome, zx};

/// Decoded screen. Pixels may be borrowed (zero-copy) or owned.
///
/// Atari bodies are borrowed straight from the input in their native
/// bitplane layout; ZX Spectrum screens are always converted, so owned.
#[derive(Clone, Debug)]
pub struct DecodeOutput<'a> {
    pixels: Cow<'a, [u8]>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    pub format: ScreenFormat,
    /// Raw palette from the file header. `None` for ZX Spectrum screens,
    /// whose 16 colors are fixed by the hardware.
    pub palette: Option<AtariPalette>,
    /// Number of palette entries the pixel indices address.
    pub colors: u16,
}

impl<'a> DecodeOutput<'a> {
    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data (copies if borrowed).
    pub fn into_owned(self) -> DecodeOutput<'static> {
        DecodeOutput {
            pixels: Cow::Owned(self.pixels.into_owned()),
            width: self.width,
            height: self.height,
            layout: self.layout,
            format: self.format,
            palette: self.palette,
            colors: self.colors,
        }
    }

    /// Whether the pixel data is borrowed (zero-copy from input).
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }

    /// One palette index per pixel, row-major, `width * height` bytes.
    ///
    /// Copies chunky data as-is and converts Atari bitplanes.
    pub fn to_indexed(&self, stop: impl Stop) -> Result<Vec<u8>, ScreenError> {
        self.indexed_pixels(&stop)
    }

    fn indexed_pixels(&self, stop: &dyn Stop) -> Result<Vec<u8>, ScreenError> {
        let needed = self.width as usize * self.height as usize;
        match self.layout {
            PixelLayout::Indexed8 => Ok(self.pixels.to_vec()),
            PixelLayout::AtariPlanar { planes } => {
                let res = Resolution::from_planes(planes).ok_or(ScreenError::LayoutMismatch {
                    expected: PixelLayout::Indexed8,
                    actual: self.layout,
                })?;
                let mut out = vec![0u8; needed];
                atari::planar_to_indexed(&self.pixels, res, &mut out, stop)?;
                Ok(out)
            }
        }
    }

    /// Zero-copy 2D view of a chunky index buffer.
    ///
    /// Returns [`ScreenError::LayoutMismatch`] for bitplane layouts; convert
    /// with [`DecodeOutput::to_indexed`] or decode with
    /// [`DecodeRequest::decode_indexed`] first.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> Result<imgref::ImgRef<'_, u8>, ScreenError> {
        if !self.layout.is_chunky() {
            return Err(ScreenError::LayoutMismatch {
                expected: PixelLayout::Indexed8,
                actual: self.layout,
            });
        }
        Ok(imgref::ImgRef::new(
            self.pixels(),
            self.width as usize,
            self.height as usize,
        ))
    }

    pub(crate) fn borrowed(
        data: &'a [u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
        format: ScreenFormat,
        palette: Option<AtariPalette>,
        colors: u16,
    ) -> Self {
        Self {
            pixels: Cow::Borrowed(data),
            width,
            height,
            layout,
            format,
            palette,
            colors,
        }
    }

    pub(crate) fn owned(
        data: Vec<u8>,
        width: u32,
        height: u32,
        layout: PixelLayout,
        format: ScreenFormat,
        palette: Option<AtariPalette>,
        colors: u16,
    ) -> Self {
        Self {
            pixels: Cow::Owned(data),
            width,
            height,
            layout,
            format,
            palette,
            colors,
        }
    }
}

/// Builder for decoding a screen dump with optional limits.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Detect the format and decode in its native layout.
    pub fn decode(self, stop: impl Stop) -> Result<DecodeOutput<'a>, ScreenError> {
        self.decode_native(&stop)
    }

    fn decode_native(&self, stop: &dyn Stop) -> Result<DecodeOutput<'a>, ScreenError> {
        let format = detect(self.data);
        log::debug!("decode: {} ({} bytes)", format.name(), self.data.len());
        match format {
            ScreenFormat::Degas | ScreenFormat::DegasElite => {
                degas::decode(self.data, self.limits, stop)
            }
            ScreenFormat::Neochrome => neochrome::decode(self.data, self.limits, stop),
            ScreenFormat::ZxSpectrum => zx::decode(self.data, self.limits, stop),
            ScreenFormat::Unrecognized => Err(ScreenError::UnrecognizedFormat),
        }
    }

    /// Decode and convert to one index byte per pixel.
    pub fn decode_indexed(self, stop: impl Stop) -> Result<DecodeOutput<'a>, ScreenError> {
        let decoded = self.decode_native(&stop)?;
        if decoded.layout.is_chunky() {
            return Ok(decoded);
        }
        let out_bytes = decoded.width as usize * decoded.height as usize;
        if let Some(limits) = self.limits {
            limits.check_memory(out_bytes)?;
        }
        let pixels = decoded.indexed_pixels(&stop)?;
        Ok(DecodeOutput::owned(
            pixels,
            decoded.width,
            decoded.height,
            PixelLayout::Indexed8,
            decoded.format,
            decoded.palette,
            decoded.colors,
        ))
    }
}
