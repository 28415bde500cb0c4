//! CRC checksum validation.

use crate::error::Error;

/// A trait for checksum based data validation.
pub trait Validate: Sized {
    /// Returns the received CRC checksum.
    fn crc(&self) -> u16;

    /// Calculates the CRC checksum of the payload.
    fn calculate_crc(&self) -> u16;

    /// Determines whether the CRC checksum is valid.
    fn is_crc_valid(&self) -> bool {
        self.crc() == self.calculate_crc()
    }

    /// Validates whether the CRC checksum is valid.
    ///
    /// # Returns
    ///
    /// Returns `Self` if the checksum is valid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ChecksumMismatch`] carrying both checksums if invalid.
    fn validate(self) -> Result<Self, Error> {
        let calculated = self.calculate_crc();

        if self.crc() == calculated {
            Ok(self)
        } else {
            Err(Error::ChecksumMismatch {
                received: self.crc(),
                calculated,
            })
        }
    }
}
