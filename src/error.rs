use alloc::string::String;
use enough::StopReason;

/// Errors from screen dump detection and decoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ScreenError {
    #[error("unrecognized screen format (length or header sentinels do not match)")]
    UnrecognizedFormat,

    #[error(
        "truncated PackBits stream: control byte at offset {offset} needs {needed} bytes, {available} remain"
    )]
    TruncatedStream {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("destination overflow: need {needed} bytes, capacity is {capacity}")]
    DestinationOverflow { capacity: usize, needed: usize },

    #[error("pixel layout mismatch: expected {expected:?}, got {actual:?}")]
    LayoutMismatch {
        expected: crate::PixelLayout,
        actual: crate::PixelLayout,
    },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for ScreenError {
    fn from(r: StopReason) -> Self {
        ScreenError::Cancelled(r)
    }
}
