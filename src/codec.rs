//! Validation and decoding of received frames.

use log::trace;

use crate::error::Error;
use crate::frame::Frame;
use crate::origin::Origin;
use crate::revision::Revision;
use crate::telemetry::{Reading, Telemetry};
use crate::utils::HexSlice;
use crate::validate::Validate;

/// Validates raw frames against a minimum frame length.
///
/// The codec holds no state besides its configuration and may be shared freely between threads.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Codec {
    min_frame_len: usize,
}

impl Codec {
    /// Creates a codec rejecting frames shorter than `min_frame_len`.
    ///
    /// Lengths below the framing overhead are raised to it.
    #[must_use]
    pub const fn new(min_frame_len: usize) -> Self {
        Self {
            min_frame_len: if min_frame_len < Frame::OVERHEAD {
                Frame::OVERHEAD
            } else {
                min_frame_len
            },
        }
    }

    /// Returns the minimum accepted frame length.
    #[must_use]
    pub const fn min_frame_len(&self) -> usize {
        self.min_frame_len
    }

    /// Validates a raw frame and returns it with its payload.
    ///
    /// Checks are run in order: minimum length, start byte, checksum.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FrameTooShort`], [`Error::BadStartByte`] or [`Error::ChecksumMismatch`]
    /// on the first failed check.
    pub fn unframe<'a>(&self, bytes: &'a [u8]) -> Result<Frame<'a>, Error> {
        trace!("Validating frame: {:X}", HexSlice::new(bytes));

        if bytes.len() < self.min_frame_len {
            return Err(Error::FrameTooShort {
                expected: self.min_frame_len,
                found: bytes.len(),
            });
        }

        Frame::try_from(bytes)?.validate()
    }

    /// Validates a raw telemetry frame and decodes it relative to `origin`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the frame is invalid or its payload does not hold the telemetry
    /// fields.
    pub fn decode(&self, bytes: &[u8], origin: &Origin) -> Result<Reading, Error> {
        let frame = self.unframe(bytes)?;
        let telemetry = Telemetry::try_from(frame.payload())?;
        Ok(Reading::new(telemetry, origin))
    }
}

impl Default for Codec {
    fn default() -> Self {
        Revision::default().into()
    }
}

impl From<Revision> for Codec {
    fn from(revision: Revision) -> Self {
        Self::new(revision.frame_len())
    }
}

/// Validates a raw telemetry frame of the default revision and decodes it relative to `origin`.
///
/// # Errors
///
/// Returns an [`Error`] if the frame is rejected. See [`Codec::decode`].
pub fn validate_and_decode(bytes: &[u8], origin: &Origin) -> Result<Reading, Error> {
    Codec::default().decode(bytes, origin)
}

#[cfg(test)]
mod tests {
    use super::{validate_and_decode, Codec};
    use crate::checksum::crc16;
    use crate::error::Error;
    use crate::frame::{create_packet, Frame, START};
    use crate::origin::Origin;
    use crate::revision::Revision;

    fn telemetry_payload(t_axis: u32, r_axis: u32) -> Vec<u8> {
        let mut payload = vec![0x00; 6];
        payload.extend_from_slice(&t_axis.to_le_bytes());
        payload.extend_from_slice(&r_axis.to_le_bytes());
        payload
    }

    #[test]
    fn test_unframe_recovers_payload() {
        let codec = Codec::new(0);
        let payloads: [&[u8]; 5] = [
            &[],
            &[0x00],
            &[0x00; 13],
            &[0x55, 0xAA, 0x55, 0xAA],
            b"0123456789abcdef",
        ];

        for payload in payloads {
            let bytes = create_packet(payload);
            assert_eq!(codec.unframe(&bytes).unwrap().payload(), payload);
        }
    }

    #[test]
    fn test_every_payload_mutation_is_detected() {
        let codec = Codec::default();
        let payload = telemetry_payload(12345, 9000);
        let bytes = create_packet(&payload);

        for index in 1..=payload.len() {
            for mask in [0x01, 0x10, 0x80, 0xFF] {
                let mut tampered = bytes.clone();
                tampered[index] ^= mask;
                assert!(
                    matches!(
                        codec.unframe(&tampered),
                        Err(Error::ChecksumMismatch { .. })
                    ),
                    "Mutation {mask:#04X} at {index} went undetected."
                );
            }
        }
    }

    #[test]
    fn test_flipped_bit_in_payload() {
        let payload = telemetry_payload(12345, 9000);
        let mut bytes = create_packet(&payload);
        bytes[1 + 5] ^= 0x04;

        assert_eq!(
            validate_and_decode(&bytes, &Origin::default()),
            Err(Error::ChecksumMismatch {
                received: 0x16A0,
                calculated: crc16(&bytes[1..15]),
            })
        );
    }

    #[test]
    fn test_minimum_length_boundary() {
        let codec = Codec::new(Frame::OVERHEAD);
        let bytes = create_packet(&[]);
        assert!(codec.unframe(&bytes).unwrap().payload().is_empty());
        assert_eq!(
            codec.unframe(&bytes[..3]),
            Err(Error::FrameTooShort {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_revision_boundary() {
        let codec = Codec::from(Revision::V1);
        let bytes = create_packet(&telemetry_payload(0, 0));
        assert_eq!(bytes.len(), 18);
        assert!(codec.unframe(&bytes).is_ok());
        assert_eq!(
            codec.unframe(&bytes[..17]),
            Err(Error::FrameTooShort {
                expected: 18,
                found: 17
            })
        );

        let codec = Codec::from(Revision::V2);
        assert_eq!(
            codec.unframe(&bytes),
            Err(Error::FrameTooShort {
                expected: 19,
                found: 18
            })
        );

        let mut payload = telemetry_payload(0, 0);
        payload.push(0x01);
        assert!(codec.unframe(&create_packet(&payload)).is_ok());
    }

    #[test]
    fn test_length_checked_before_start_byte() {
        let codec = Codec::default();
        assert_eq!(
            codec.unframe(&[0x00; 10]),
            Err(Error::FrameTooShort {
                expected: 18,
                found: 10
            })
        );
    }

    #[test]
    fn test_bad_start_byte() {
        let mut bytes = create_packet(&telemetry_payload(12345, 9000));
        bytes[0] = 0xAA;
        assert_eq!(
            validate_and_decode(&bytes, &Origin::default()),
            Err(Error::BadStartByte(0xAA))
        );
    }

    #[test]
    fn test_decode_without_origin() {
        let bytes = create_packet(&telemetry_payload(12345, 9000));
        let reading = validate_and_decode(&bytes, &Origin::default()).unwrap();
        assert_eq!(reading.telemetry().t_axis(), 12345);
        assert!((reading.rotation().t() - 123.45).abs() < 1e-9);
        assert!((reading.rotation().r() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_decode_with_origin() {
        let bytes = create_packet(&telemetry_payload(12345, 9000));
        let reading = validate_and_decode(&bytes, &Origin::new(23.45, 0.0)).unwrap();
        assert!((reading.rotation().t() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_decode_short_payload() {
        let codec = Codec::new(0);
        let bytes = create_packet(&[START; 10]);
        assert_eq!(
            codec.decode(&bytes, &Origin::default()),
            Err(Error::PayloadTooShort {
                expected: 14,
                found: 10
            })
        );
    }

    #[test]
    fn test_min_frame_len_is_clamped() {
        assert_eq!(Codec::new(0).min_frame_len(), Frame::OVERHEAD);
        assert_eq!(Codec::default().min_frame_len(), 18);
    }
}
