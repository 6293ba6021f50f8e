use crate::error::ScreenError;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit). Every supported format has a
/// fixed geometry, so limits mostly matter to callers that want to refuse
/// hi-res Atari screens or cap the chunky conversion buffer.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for an output buffer allocation.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check screen dimensions. Returns a LimitExceeded error naming the first
    /// limit that fails.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), ScreenError> {
        let pixels = u64::from(width) * u64::from(height);
        exceeds("width", u64::from(width), self.max_width)?;
        exceeds("height", u64::from(height), self.max_height)?;
        exceeds("pixel count", pixels, self.max_pixels)
    }

    /// Check that an output allocation is within the memory limit.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), ScreenError> {
        exceeds("allocation bytes", bytes as u64, self.max_memory_bytes)
    }
}

fn exceeds(what: &str, value: u64, limit: Option<u64>) -> Result<(), ScreenError> {
    match limit {
        Some(max) if value > max => Err(ScreenError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_limits_accepts_everything() {
        let limits = Limits::default();
        assert!(limits.check(u32::MAX, u32::MAX).is_ok());
        assert!(limits.check_memory(usize::MAX).is_ok());
    }

    #[test]
    fn names_the_failing_limit() {
        let limits = Limits {
            max_height: Some(200),
            ..Default::default()
        };
        assert!(limits.check(640, 200).is_ok());
        match limits.check(640, 400) {
            Err(ScreenError::LimitExceeded(msg)) => assert!(msg.starts_with("height 400")),
            other => panic!("expected LimitExceeded, got {other:?}"),
        }
    }
}
