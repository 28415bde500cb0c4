use crate::telemetry::Telemetry;

/// Operator defined zero reference in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Origin {
    t: f64,
    r: f64,
}

impl Origin {
    /// Creates a new origin from T and R axis angles in degrees.
    #[must_use]
    pub const fn new(t: f64, r: f64) -> Self {
        Self { t, r }
    }

    /// Creates an origin at the current absolute angles of `telemetry`.
    #[must_use]
    pub fn zero_at(telemetry: &Telemetry) -> Self {
        Self::new(telemetry.t_angle(), telemetry.r_angle())
    }

    /// Returns the T axis origin angle in degrees.
    #[must_use]
    pub const fn t(&self) -> f64 {
        self.t
    }

    /// Returns the R axis origin angle in degrees.
    #[must_use]
    pub const fn r(&self) -> f64 {
        self.r
    }
}
