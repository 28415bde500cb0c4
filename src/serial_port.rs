use std::time::Duration;

use serialport::{DataBits, FlowControl, Parity, StopBits};

use crate::BaudRate;

#[cfg(windows)]
pub use serialport::COMPort as SerialPortImpl;

#[cfg(unix)]
pub use serialport::TTYPort as SerialPortImpl;

/// Read timeout of the serial port.
///
/// The listener wakes up at least this often to check whether it should stop.
pub const TIMEOUT: Duration = Duration::from_millis(100);

/// Opens a serial port to the stage controller depending on the local operating system.
///
/// The port is configured for 8 data bits, no parity, one stop bit and no flow control.
///
/// # Errors
/// For errors please refer to [`SerialPortImpl::open()`] and [`serialport::new()`]
pub fn open<'a>(
    path: impl Into<std::borrow::Cow<'a, str>>,
    baud_rate: BaudRate,
) -> serialport::Result<SerialPortImpl> {
    SerialPortImpl::open(
        &serialport::new(path, baud_rate.into())
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(TIMEOUT),
    )
}

/// Clones a serial port into a second handle of the same native type.
pub trait TryCloneNative: Sized {
    /// Tries to clone the native serial port.
    ///
    /// # Errors
    ///
    /// Returns a [`serialport::Error`] if the underlying handle cannot be duplicated.
    fn try_clone_native(&self) -> serialport::Result<Self>;
}

impl TryCloneNative for SerialPortImpl {
    fn try_clone_native(&self) -> serialport::Result<Self> {
        Self::try_clone_native(self)
    }
}
