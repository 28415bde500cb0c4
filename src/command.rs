//! Motion commands understood by the stage controller.
//!
//! ```text
//! offset  size  field
//! 0       4     T axis steps, signed, big-endian
//! 4       4     R axis steps, signed, big-endian
//! 8       4     reserved, zero
//! ```

use std::fmt::{Display, Formatter};

use crate::frame::Frame;

/// Size of a motion command payload.
pub const PAYLOAD_SIZE: usize = 12;

/// Axes of the stage.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Axis {
    /// Tilt axis.
    T,
    /// Rotation axis.
    R,
}

/// Direction of a jog.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    /// Positive steps.
    Forward,
    /// Negative steps.
    Backward,
}

impl Direction {
    const fn signum(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Jog speed presets.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Speed {
    /// One step per command.
    #[default]
    Low,
    /// 100 steps per command.
    Medium,
    /// 1000 steps per command.
    High,
}

impl Speed {
    /// Returns the amount of steps sent per command.
    #[must_use]
    pub const fn steps(self) -> i32 {
        match self {
            Self::Low => 1,
            Self::Medium => 100,
            Self::High => 1000,
        }
    }
}

/// A motion command for both axes.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Command {
    t_steps: i32,
    r_steps: i32,
}

impl Command {
    /// Command halting both axes.
    pub const STOP: Self = Self::new(0, 0);

    /// Creates a new command from step counts.
    #[must_use]
    pub const fn new(t_steps: i32, r_steps: i32) -> Self {
        Self { t_steps, r_steps }
    }

    /// Creates a command moving a single axis.
    #[must_use]
    pub const fn jog(axis: Axis, direction: Direction, speed: Speed) -> Self {
        let steps = direction.signum() * speed.steps();

        match axis {
            Axis::T => Self::new(steps, 0),
            Axis::R => Self::new(0, steps),
        }
    }

    /// Returns the T axis step count.
    #[must_use]
    pub const fn t_steps(&self) -> i32 {
        self.t_steps
    }

    /// Returns the R axis step count.
    #[must_use]
    pub const fn r_steps(&self) -> i32 {
        self.r_steps
    }

    /// Returns the command payload.
    #[must_use]
    pub fn payload(&self) -> [u8; PAYLOAD_SIZE] {
        let mut payload = [0; PAYLOAD_SIZE];
        payload[..4].copy_from_slice(&self.t_steps.to_be_bytes());
        payload[4..8].copy_from_slice(&self.r_steps.to_be_bytes());
        payload
    }

    /// Returns the framed command.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        Frame::new(&self.payload()).to_bytes()
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "MOVE(T: {}, R: {})", self.t_steps, self.r_steps)
    }
}

#[cfg(feature = "clap")]
impl clap::ValueEnum for Axis {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::T, Self::R]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::T => clap::builder::PossibleValue::new("t").alias("T"),
            Self::R => clap::builder::PossibleValue::new("r").alias("R"),
        })
    }
}

#[cfg(feature = "clap")]
impl clap::ValueEnum for Direction {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Forward, Self::Backward]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Forward => clap::builder::PossibleValue::new("forward").alias("+"),
            Self::Backward => clap::builder::PossibleValue::new("backward").alias("-"),
        })
    }
}

#[cfg(feature = "clap")]
impl clap::ValueEnum for Speed {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(match self {
            Self::Low => clap::builder::PossibleValue::new("low"),
            Self::Medium => clap::builder::PossibleValue::new("medium"),
            Self::High => clap::builder::PossibleValue::new("high"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, Command, Direction, Speed};

    #[test]
    fn test_stop() {
        assert_eq!(Command::STOP.payload(), [0x00; 12]);
    }

    #[test]
    fn test_low_speed_payloads() {
        assert_eq!(
            Command::jog(Axis::R, Direction::Forward, Speed::Low).payload(),
            [0, 0, 0, 0, 0x00, 0x00, 0x00, 0x01, 0, 0, 0, 0]
        );
        assert_eq!(
            Command::jog(Axis::R, Direction::Backward, Speed::Low).payload(),
            [0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0]
        );
        assert_eq!(
            Command::jog(Axis::T, Direction::Forward, Speed::Low).payload(),
            [0x00, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            Command::jog(Axis::T, Direction::Backward, Speed::Low).payload(),
            [0xFF, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_medium_speed_payloads() {
        assert_eq!(
            Command::jog(Axis::R, Direction::Forward, Speed::Medium).payload(),
            [0, 0, 0, 0, 0x00, 0x00, 0x00, 0x64, 0, 0, 0, 0]
        );
        assert_eq!(
            Command::jog(Axis::T, Direction::Backward, Speed::Medium).payload(),
            [0xFF, 0xFF, 0xFF, 0x9C, 0, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_high_speed_payloads() {
        assert_eq!(
            Command::jog(Axis::T, Direction::Forward, Speed::High).payload(),
            [0x00, 0x00, 0x03, 0xE8, 0, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            Command::jog(Axis::R, Direction::Backward, Speed::High).payload(),
            [0, 0, 0, 0, 0xFF, 0xFF, 0xFC, 0x18, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_to_bytes() {
        let bytes = Command::jog(Axis::T, Direction::Forward, Speed::High).to_bytes();
        assert_eq!(
            bytes,
            [0x55, 0x00, 0x00, 0x03, 0xE8, 0, 0, 0, 0, 0, 0, 0, 0, 0x3A, 0x09, 0xAA]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Command::jog(Axis::R, Direction::Backward, Speed::Medium).to_string(),
            "MOVE(T: 0, R: -100)"
        );
    }
}
