//! NEOchrome pictures (Atari ST, low resolution only).

mod header;

pub use header::{ColorAnimation, NEOCHROME_LEN, NeoHeader};
pub(crate) use header::is_neochrome;

use crate::decode::DecodeOutput;
use crate::error::ScreenError;
use crate::info::ScreenFormat;
use crate::limits::Limits;
use enough::Stop;

/// Decode a NEOchrome file (called from DecodeRequest). Zero-copy.
///
/// The declared width and height fields are reported through
/// [`NeoHeader`] but the output geometry always comes from the resolution.
pub(crate) fn decode<'a>(
    data: &'a [u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput<'a>, ScreenError> {
    let header = NeoHeader::parse(data)?;
    let res = header.resolution();
    if let Some(limits) = limits {
        limits.check(res.width(), res.height())?;
    }
    stop.check()?;
    if u32::from(header.width) != res.width() || u32::from(header.height) != res.height() {
        log::debug!(
            "neochrome: declared size {}x{} ignored, using {}x{}",
            header.width,
            header.height,
            res.width(),
            res.height()
        );
    }
    Ok(DecodeOutput::borrowed(
        header::body(data)?,
        res.width(),
        res.height(),
        res.layout(),
        ScreenFormat::Neochrome,
        Some(header.palette),
        res.colors(),
    ))
}
