//! PackBits run-length decompression.
//!
//! The stream is a sequence of packets, each starting with an unsigned
//! control byte `k`:
//!
//! - `0..=127`: the next `k + 1` bytes are copied literally.
//! - `128..=255`: the next byte is repeated `256 - k` times (1 to 128).
//!
//! There is no end marker; decoding stops when the input is exhausted. The
//! output capacity is whatever the caller hands in, and running out of it is
//! an error rather than an overrun.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::ScreenError;

/// Decompress `src` into `dst`, returning the number of bytes written.
///
/// `dst.len()` is the declared capacity. A packet that would write past it
/// fails with [`ScreenError::DestinationOverflow`]; a packet whose payload
/// runs past the end of `src` fails with [`ScreenError::TruncatedStream`].
/// Nothing is written for the failing packet.
pub fn unpack_bits(src: &[u8], dst: &mut [u8]) -> Result<usize, ScreenError> {
    let mut pos = 0usize;
    let mut out = 0usize;

    while let Some(&control) = src.get(pos) {
        let payload = &src[pos + 1..];

        if control < 128 {
            let len = usize::from(control) + 1;
            let literal = payload.get(..len).ok_or(ScreenError::TruncatedStream {
                offset: pos,
                needed: len,
                available: payload.len(),
            })?;
            reserve(dst, out, len)?.copy_from_slice(literal);
            out += len;
            pos += 1 + len;
        } else {
            let run = 256 - usize::from(control);
            let &fill = payload.first().ok_or(ScreenError::TruncatedStream {
                offset: pos,
                needed: 1,
                available: 0,
            })?;
            reserve(dst, out, run)?.fill(fill);
            out += run;
            pos += 2;
        }
    }

    Ok(out)
}

/// Decompress `src` into a freshly allocated buffer of at most `capacity`
/// bytes, trimmed to the bytes actually produced.
pub fn unpack_bits_to_vec(src: &[u8], capacity: usize) -> Result<Vec<u8>, ScreenError> {
    let mut out = vec![0u8; capacity];
    let written = unpack_bits(src, &mut out)?;
    out.truncate(written);
    Ok(out)
}

fn reserve(dst: &mut [u8], start: usize, len: usize) -> Result<&mut [u8], ScreenError> {
    let capacity = dst.len();
    let end = start + len;
    dst.get_mut(start..end)
        .ok_or(ScreenError::DestinationOverflow {
            capacity,
            needed: end,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_and_repeat_packets() {
        let mut dst = [0u8; 8];
        let n = unpack_bits(&[0x02, b'A', b'B', b'C', 0xFE, b'X'], &mut dst).unwrap();
        assert_eq!(&dst[..n], b"ABCXX");
    }

    #[test]
    fn control_128_repeats_128_times() {
        let out = unpack_bits_to_vec(&[0x80, 0x55], 256).unwrap();
        assert_eq!(out.len(), 128);
        assert!(out.iter().all(|&b| b == 0x55));
    }

    #[test]
    fn overflow_leaves_earlier_packets_written() {
        let mut dst = [0u8; 3];
        let err = unpack_bits(&[0x01, 1, 2, 0xFE, 9], &mut dst).unwrap_err();
        assert!(matches!(
            err,
            ScreenError::DestinationOverflow {
                capacity: 3,
                needed: 4
            }
        ));
        assert_eq!(dst, [1, 2, 0]);
    }
}
