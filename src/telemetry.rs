//! Telemetry reported by the stage controller.
//!
//! ```text
//! offset  size  field
//! 0       6     status bytes
//! 6       4     T axis angle, centidegrees, little-endian
//! 10      4     R axis angle, centidegrees, little-endian
//! ```

use std::fmt::{Display, Formatter};

use crate::error::Error;
use crate::origin::Origin;
use crate::utils::read_u32_le;

const STATUS_SIZE: usize = 6;
const T_AXIS_OFFSET: usize = 6;
const R_AXIS_OFFSET: usize = 10;
const CENTIDEGREES_PER_DEGREE: f64 = 100.0;

/// Fields decoded from a telemetry payload.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Telemetry {
    status: [u8; STATUS_SIZE],
    t_axis: u32,
    r_axis: u32,
}

impl Telemetry {
    /// Minimum payload length holding all telemetry fields.
    pub const MIN_PAYLOAD_SIZE: usize = 14;

    /// Creates telemetry from raw status bytes and axis angles in centidegrees.
    #[must_use]
    pub const fn new(status: [u8; STATUS_SIZE], t_axis: u32, r_axis: u32) -> Self {
        Self {
            status,
            t_axis,
            r_axis,
        }
    }

    /// Returns the raw status bytes.
    #[must_use]
    pub const fn status(&self) -> [u8; STATUS_SIZE] {
        self.status
    }

    /// Returns the raw T axis angle in centidegrees.
    #[must_use]
    pub const fn t_axis(&self) -> u32 {
        self.t_axis
    }

    /// Returns the raw R axis angle in centidegrees.
    #[must_use]
    pub const fn r_axis(&self) -> u32 {
        self.r_axis
    }

    /// Returns the absolute T axis angle in degrees.
    #[must_use]
    pub fn t_angle(&self) -> f64 {
        f64::from(self.t_axis) / CENTIDEGREES_PER_DEGREE
    }

    /// Returns the absolute R axis angle in degrees.
    #[must_use]
    pub fn r_angle(&self) -> f64 {
        f64::from(self.r_axis) / CENTIDEGREES_PER_DEGREE
    }

    /// Returns the rotation of both axes relative to `origin`.
    #[must_use]
    pub fn relative_to(&self, origin: &Origin) -> Rotation {
        Rotation {
            t: self.t_angle() - origin.t(),
            r: self.r_angle() - origin.r(),
        }
    }
}

impl TryFrom<&[u8]> for Telemetry {
    type Error = Error;

    fn try_from(payload: &[u8]) -> Result<Self, Self::Error> {
        let too_short = || Error::PayloadTooShort {
            expected: Self::MIN_PAYLOAD_SIZE,
            found: payload.len(),
        };

        let status = payload
            .get(..STATUS_SIZE)
            .and_then(|status| status.try_into().ok())
            .ok_or_else(too_short)?;
        let t_axis = read_u32_le(payload, T_AXIS_OFFSET).ok_or_else(too_short)?;
        let r_axis = read_u32_le(payload, R_AXIS_OFFSET).ok_or_else(too_short)?;
        Ok(Self::new(status, t_axis, r_axis))
    }
}

/// Rotation of the axes in degrees relative to an [`Origin`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    t: f64,
    r: f64,
}

impl Rotation {
    /// Returns the T axis rotation in degrees.
    #[must_use]
    pub const fn t(&self) -> f64 {
        self.t
    }

    /// Returns the R axis rotation in degrees.
    #[must_use]
    pub const fn r(&self) -> f64 {
        self.r
    }
}

impl Display for Rotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "T: {:.2}°, R: {:.2}°", self.t, self.r)
    }
}

/// A decoded telemetry frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    telemetry: Telemetry,
    rotation: Rotation,
}

impl Reading {
    /// Creates a reading of `telemetry` relative to `origin`.
    #[must_use]
    pub fn new(telemetry: Telemetry, origin: &Origin) -> Self {
        Self {
            telemetry,
            rotation: telemetry.relative_to(origin),
        }
    }

    /// Returns the decoded telemetry fields.
    #[must_use]
    pub const fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    /// Returns the rotation relative to the origin the reading was decoded against.
    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::{Rotation, Telemetry};
    use crate::error::Error;
    use crate::origin::Origin;

    const PAYLOAD: [u8; 14] = [
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x39, 0x30, 0x00, 0x00, 0x28, 0x23, 0x00, 0x00,
    ];

    #[test]
    fn test_try_from() {
        let telemetry = Telemetry::try_from(PAYLOAD.as_slice()).unwrap();
        assert_eq!(telemetry.status(), [0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        assert_eq!(telemetry.t_axis(), 12345);
        assert_eq!(telemetry.r_axis(), 9000);
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let mut payload = PAYLOAD.to_vec();
        payload.push(0xFF);
        assert_eq!(
            Telemetry::try_from(payload.as_slice()),
            Telemetry::try_from(PAYLOAD.as_slice())
        );
    }

    #[test]
    fn test_payload_too_short() {
        assert_eq!(
            Telemetry::try_from(&PAYLOAD[..13]),
            Err(Error::PayloadTooShort {
                expected: 14,
                found: 13
            })
        );
        assert_eq!(
            Telemetry::try_from(&[0u8; 0][..]),
            Err(Error::PayloadTooShort {
                expected: 14,
                found: 0
            })
        );
    }

    #[test]
    fn test_angles() {
        let telemetry = Telemetry::new([0; 6], 12345, 9000);
        assert!((telemetry.t_angle() - 123.45).abs() < 1e-9);
        assert!((telemetry.r_angle() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_relative_to() {
        let telemetry = Telemetry::new([0; 6], 12345, 9000);
        let rotation = telemetry.relative_to(&Origin::new(23.45, 100.0));
        assert!((rotation.t() - 100.0).abs() < 1e-9);
        assert!((rotation.r() + 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_at() {
        let telemetry = Telemetry::new([0; 6], 12345, 9000);
        let rotation = telemetry.relative_to(&Origin::zero_at(&telemetry));
        assert_eq!(rotation, Rotation::default());
    }

    #[test]
    fn test_rotation_display() {
        let rotation = Telemetry::new([0; 6], 12345, 9000).relative_to(&Origin::default());
        assert_eq!(rotation.to_string(), "T: 123.45°, R: 90.00°");
    }
}
