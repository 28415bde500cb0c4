use crate::frame::Frame;

/// Firmware revisions of the stage controller.
///
/// Revisions differ in the length of their telemetry frames.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Revision {
    /// 14 byte telemetry payload.
    #[default]
    V1,
    /// 15 byte telemetry payload with a trailing status byte.
    V2,
}

impl Revision {
    /// Returns the payload length of telemetry frames.
    #[must_use]
    pub const fn telemetry_payload_len(self) -> usize {
        match self {
            Self::V1 => 14,
            Self::V2 => 15,
        }
    }

    /// Returns the length of telemetry frames, which is also the minimum valid frame length.
    #[must_use]
    pub const fn frame_len(self) -> usize {
        self.telemetry_payload_len() + Frame::OVERHEAD
    }
}

#[cfg(feature = "clap")]
impl clap::ValueEnum for Revision {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::V1, Self::V2]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::V1 => clap::builder::PossibleValue::new("v1").alias("1"),
            Self::V2 => clap::builder::PossibleValue::new("v2").alias("2"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Revision;

    #[test]
    fn test_frame_len() {
        assert_eq!(Revision::V1.frame_len(), 18);
        assert_eq!(Revision::V2.frame_len(), 19);
    }

    #[test]
    fn test_default() {
        assert_eq!(Revision::default(), Revision::V1);
    }
}
