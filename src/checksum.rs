//! CRC-16 checksum of frame payloads.
//!
//! The stage controller uses the reflected polynomial `0xA001` with an initial value of `0xFFFF`
//! and no final XOR. The `crc` crate catalogues these parameters as `CRC-16/MODBUS`.

use crc::{Crc, CRC_16_MODBUS};

/// CRC-16 checksum function used on the wire.
pub const CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_MODBUS);

/// Calculates the CRC-16 checksum of the given bytes.
///
/// # Examples
///
/// ```
/// use stagelink::crc16;
///
/// assert_eq!(crc16(b""), 0xFFFF);
/// assert_eq!(crc16(b"123456789"), 0x4B37);
/// ```
#[must_use]
pub fn crc16(bytes: &[u8]) -> u16 {
    CRC.checksum(bytes)
}
