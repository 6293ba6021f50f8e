//! Degas and Degas Elite pictures (Atari ST).
//!
//! Uncompressed files only. The body is exposed as-is, in interleaved
//! bitplane layout; use [`crate::DecodeOutput::to_indexed`] for one index
//! per pixel.

mod header;

pub use header::{ANIMATION_LEN, DEGAS_ELITE_LEN, DEGAS_LEN, DegasHeader, animation_block};
pub(crate) use header::classify;

use crate::decode::DecodeOutput;
use crate::error::ScreenError;
use crate::limits::Limits;
use enough::Stop;

/// Decode a Degas file (called from DecodeRequest). Zero-copy: the output
/// borrows the body from `data`.
pub(crate) fn decode<'a>(
    data: &'a [u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<DecodeOutput<'a>, ScreenError> {
    let header = DegasHeader::parse(data)?;
    let res = header.resolution;
    if let Some(limits) = limits {
        limits.check(res.width(), res.height())?;
    }
    stop.check()?;
    let body = header::body(data)?;
    log::debug!(
        "degas: {}x{} in {} planes, elite {}",
        res.width(),
        res.height(),
        res.planes(),
        header.elite
    );
    Ok(DecodeOutput::borrowed(
        body,
        res.width(),
        res.height(),
        res.layout(),
        header.format(),
        Some(header.palette),
        res.colors(),
    ))
}
