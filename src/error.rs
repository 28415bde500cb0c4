//! Errors raised while validating received frames.

use std::fmt::{Display, Formatter};

/// A received frame was rejected.
///
/// All variants are recoverable: the frame is discarded and the link keeps listening.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The buffer is shorter than the minimum frame length.
    FrameTooShort {
        /// The minimum frame length.
        expected: usize,
        /// The length of the buffer.
        found: usize,
    },
    /// The first byte is not the start marker.
    BadStartByte(u8),
    /// The received CRC does not match the CRC of the received payload.
    ChecksumMismatch {
        /// The CRC carried by the frame.
        received: u16,
        /// The CRC calculated over the payload.
        calculated: u16,
    },
    /// The payload is too short to hold the telemetry fields.
    PayloadTooShort {
        /// The minimum payload length.
        expected: usize,
        /// The length of the payload.
        found: usize,
    },
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FrameTooShort { expected, found } => write!(
                f,
                "Frame too short. Expected at least {expected} bytes but found {found} bytes."
            ),
            Self::BadStartByte(byte) => write!(f, "Invalid start byte: {byte:#04X}"),
            Self::ChecksumMismatch {
                received,
                calculated,
            } => write!(
                f,
                "CRC mismatch. Received {received:#06X} but calculated {calculated:#06X}."
            ),
            Self::PayloadTooShort { expected, found } => write!(
                f,
                "Payload too short. Expected at least {expected} bytes but found {found} bytes."
            ),
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(error: Error) -> Self {
        Self::new(std::io::ErrorKind::InvalidData, error)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::FrameTooShort {
                expected: 18,
                found: 17
            }
            .to_string(),
            "Frame too short. Expected at least 18 bytes but found 17 bytes."
        );
        assert_eq!(
            Error::BadStartByte(0xAA).to_string(),
            "Invalid start byte: 0xAA"
        );
        assert_eq!(
            Error::ChecksumMismatch {
                received: 0x1234,
                calculated: 0xEB03
            }
            .to_string(),
            "CRC mismatch. Received 0x1234 but calculated 0xEB03."
        );
    }

    #[test]
    fn test_into_io_error() {
        let error: std::io::Error = Error::BadStartByte(0x00).into();
        assert_eq!(error.kind(), std::io::ErrorKind::InvalidData);
    }
}
