//! Periodic transmission of the current command.

use std::io::Write;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use log::{debug, error, info, trace};

use crate::command::Command;
use crate::frame::Frame;

/// Default interval between two transmissions of the current command.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(30);

/// Re-sends the current command payload at a fixed period.
///
/// Updates received on the channel overwrite the payload sent on the next tick. There is no queue
/// and no acknowledgement. The transmitter stops once all senders of the channel are dropped.
#[derive(Debug)]
pub struct Transmitter<T> {
    writer: T,
    updates: Receiver<Box<[u8]>>,
    current_payload: Box<[u8]>,
    period: Duration,
}

impl<T> Transmitter<T> {
    /// Creates a new transmitter sending [`Command::STOP`] until told otherwise.
    #[must_use]
    pub fn new(writer: T, updates: Receiver<Box<[u8]>>, period: Duration) -> Self {
        Self {
            writer,
            updates,
            current_payload: Command::STOP.payload().into(),
            period,
        }
    }

    /// Returns the payload sent on the next tick.
    #[must_use]
    pub fn current_payload(&self) -> &[u8] {
        &self.current_payload
    }

    /// Replaces the payload sent on the next tick.
    pub fn set_current_payload(&mut self, payload: impl Into<Box<[u8]>>) {
        self.current_payload = payload.into();
        debug!("Current payload set to {} bytes.", self.current_payload.len());
    }
}

impl<T> Transmitter<T>
where
    T: Write,
{
    /// Frames and writes the current payload.
    ///
    /// # Errors
    ///
    /// Returns an [`std::io::Error`] if writing to the serial port fails.
    pub fn tick(&mut self) -> std::io::Result<()> {
        let frame = Frame::new(&self.current_payload);
        trace!("Sending {frame}: {frame:X}");
        frame.write_to(&mut self.writer)?;
        self.writer.flush()
    }

    /// Runs the transmitter loop until the update channel is closed.
    ///
    /// Returns the inner writer.
    pub fn run(mut self) -> T {
        let mut next_tick = Instant::now();

        loop {
            match self
                .updates
                .recv_timeout(next_tick.saturating_duration_since(Instant::now()))
            {
                Ok(payload) => {
                    self.set_current_payload(payload);
                    continue;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    info!("Update channel closed, transmitter exiting.");
                    return self.writer;
                }
            }

            if let Err(error) = self.tick() {
                error!("Failed to send command: {error}");
            }

            next_tick = (next_tick + self.period).max(Instant::now());
        }
    }
}
