const U32_SIZE: usize = 4;

/// Reads a little-endian `u32` from `buffer` at `offset`.
///
/// Returns `None` if the buffer does not hold four bytes at `offset`.
#[must_use]
pub fn read_u32_le(buffer: &[u8], offset: usize) -> Option<u32> {
    let end = offset.checked_add(U32_SIZE)?;
    let bytes = buffer.get(offset..end)?;
    bytes.try_into().ok().map(u32::from_le_bytes)
}
