use std::fmt::{Display, Formatter, LowerHex, UpperHex};

/// Formats a slice of bytes as space separated hexadecimal pairs, e.g. `55 00 aa`.
pub struct HexSlice<'a>(&'a [u8]);

impl<'a> HexSlice<'a> {
    /// Creates a new `HexSlice` from a slice of bytes.
    #[must_use]
    pub const fn new(slice: &'a [u8]) -> Self {
        Self(slice)
    }

    fn write_with(
        &self,
        f: &mut Formatter<'_>,
        byte: fn(&u8, &mut Formatter<'_>) -> std::fmt::Result,
    ) -> std::fmt::Result {
        for (index, value) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }

            byte(value, f)?;
        }

        Ok(())
    }
}

impl<'a> From<&'a [u8]> for HexSlice<'a> {
    fn from(slice: &'a [u8]) -> Self {
        Self::new(slice)
    }
}

impl Display for HexSlice<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        LowerHex::fmt(self, f)
    }
}

impl LowerHex for HexSlice<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.write_with(f, |byte, f| write!(f, "{byte:02x}"))
    }
}

impl UpperHex for HexSlice<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.write_with(f, |byte, f| write!(f, "{byte:02X}"))
    }
}
