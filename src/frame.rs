//! Frames as transmitted over the serial link.
//!
//! ```text
//! offset  size  field
//! 0       1     start marker (0x55)
//! 1       N     payload
//! 1+N     2     CRC-16 of the payload, low byte first
//! 3+N     1     end marker (0xAA)
//! ```

use std::fmt::{Display, Formatter, LowerHex, UpperHex};
use std::io::Write;
use std::iter::{once, Chain, Copied, Once};
use std::slice::Iter;

use crate::checksum::crc16;
use crate::error::Error;
use crate::utils::HexSlice;
use crate::validate::Validate;

/// Marker byte opening every frame.
pub const START: u8 = 0x55;

/// Marker byte closing every frame.
pub const END: u8 = 0xAA;

/// A frame wrapping a borrowed payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Frame<'a> {
    payload: &'a [u8],
    crc: u16,
}

impl<'a> Frame<'a> {
    /// Amount of bytes a frame adds to its payload.
    pub const OVERHEAD: usize = 4;

    /// Creates a new frame and calculates the payload's checksum.
    #[must_use]
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            payload,
            crc: crc16(payload),
        }
    }

    /// Returns the payload.
    #[must_use]
    pub const fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Returns the total length of the frame in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.payload.len() + Self::OVERHEAD
    }

    /// Returns the serialized frame.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len());
        bytes.extend(*self);
        bytes
    }

    /// Writes the serialized frame to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an [`std::io::Error`] if writing fails.
    pub fn write_to<W>(&self, writer: &mut W) -> std::io::Result<()>
    where
        W: Write + ?Sized,
    {
        writer.write_all(&self.to_bytes())
    }
}

impl Display for Frame<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "FRAME({} bytes, {:#06X})", self.payload.len(), self.crc)
    }
}

impl LowerHex for Frame<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        LowerHex::fmt(&HexSlice::new(&self.to_bytes()), f)
    }
}

impl UpperHex for Frame<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        UpperHex::fmt(&HexSlice::new(&self.to_bytes()), f)
    }
}

impl Validate for Frame<'_> {
    fn crc(&self) -> u16 {
        self.crc
    }

    fn calculate_crc(&self) -> u16 {
        crc16(self.payload)
    }
}

impl<'a> IntoIterator for Frame<'a> {
    type Item = u8;
    type IntoIter = Chain<
        Chain<Chain<Once<u8>, Copied<Iter<'a, u8>>>, <[u8; 2] as IntoIterator>::IntoIter>,
        Once<u8>,
    >;

    fn into_iter(self) -> Self::IntoIter {
        once(START)
            .chain(self.payload.iter().copied())
            .chain(self.crc.to_le_bytes())
            .chain(once(END))
    }
}

/// Splits a raw frame into payload and received CRC.
///
/// The checksum is not verified and the end marker is not inspected.
impl<'a> TryFrom<&'a [u8]> for Frame<'a> {
    type Error = Error;

    fn try_from(buffer: &'a [u8]) -> Result<Self, Self::Error> {
        match buffer.split_first() {
            Some((&START, rest)) if buffer.len() >= Self::OVERHEAD => {
                let (payload, trailer) = rest.split_at(rest.len() - 3);
                Ok(Self {
                    payload,
                    crc: u16::from_le_bytes([trailer[0], trailer[1]]),
                })
            }
            Some((&start, _)) if buffer.len() >= Self::OVERHEAD => Err(Error::BadStartByte(start)),
            _ => Err(Error::FrameTooShort {
                expected: Self::OVERHEAD,
                found: buffer.len(),
            }),
        }
    }
}

/// Frames `payload` for transmission.
///
/// # Examples
///
/// ```
/// use stagelink::create_packet;
///
/// assert_eq!(create_packet(&[]), [0x55, 0xFF, 0xFF, 0xAA]);
/// ```
#[must_use]
pub fn create_packet(payload: &[u8]) -> Vec<u8> {
    Frame::new(payload).to_bytes()
}
