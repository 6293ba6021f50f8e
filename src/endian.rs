//! Host byte-order detection and 16/32-bit swaps.
//!
//! Every multi-byte header field in the supported formats is stored
//! big-endian (Motorola 68000 order). Pixel bodies are byte streams and are
//! never swapped.

/// Byte order of a stored multi-byte value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    Big,
    Little,
}

impl ByteOrder {
    /// Byte order of the machine this code was compiled for.
    pub const fn host() -> Self {
        if host_is_little_endian() {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }
}

/// Whether the host stores integers little-endian.
pub const fn host_is_little_endian() -> bool {
    cfg!(target_endian = "little")
}

/// Convert a 16-bit value stored in `from` order to host order.
///
/// Swapping is its own inverse, so the same call converts a host value
/// back to `from` order (see [`to_order16`]).
pub const fn swap16(value: u16, from: ByteOrder) -> u16 {
    match from {
        ByteOrder::Big => u16::from_be(value),
        ByteOrder::Little => u16::from_le(value),
    }
}

/// Convert a 32-bit value stored in `from` order to host order.
pub const fn swap32(value: u32, from: ByteOrder) -> u32 {
    match from {
        ByteOrder::Big => u32::from_be(value),
        ByteOrder::Little => u32::from_le(value),
    }
}

/// Convert a host-order 16-bit value to `to` order. Alias of [`swap16`].
pub const fn to_order16(value: u16, to: ByteOrder) -> u16 {
    swap16(value, to)
}

/// Convert a host-order 32-bit value to `to` order. Alias of [`swap32`].
pub const fn to_order32(value: u32, to: ByteOrder) -> u32 {
    swap32(value, to)
}

/// Read a 16-bit field at `offset`, stored in `order`.
///
/// Returns `None` if the field runs past the end of `data`.
pub fn read_u16(data: &[u8], offset: usize, order: ByteOrder) -> Option<u16> {
    let bytes = data.get(offset..offset.checked_add(2)?)?;
    // reinterpret the stored bytes in host order, then normalize
    Some(swap16(u16::from_ne_bytes([bytes[0], bytes[1]]), order))
}

/// Signed form of [`read_u16`].
pub fn read_i16(data: &[u8], offset: usize, order: ByteOrder) -> Option<i16> {
    read_u16(data, offset, order).map(|v| v as i16)
}

/// Read a 32-bit field at `offset`, stored in `order`.
pub fn read_u32(data: &[u8], offset: usize, order: ByteOrder) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(swap32(
        u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        order,
    ))
}
