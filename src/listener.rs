//! Reception and decoding of telemetry.

use std::io::{ErrorKind, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

use log::{debug, error, info, warn};

use crate::codec::Codec;
use crate::error::Error;
use crate::frame_reader::FrameReader;
use crate::origin::Origin;
use crate::telemetry::Reading;

/// Decodes telemetry frames and forwards the readings.
///
/// Rejected frames are logged and discarded.
#[derive(Debug)]
pub struct Listener<T> {
    reader: FrameReader<T>,
    codec: Codec,
    origin: Arc<Mutex<Origin>>,
    readings: Sender<Reading>,
    running: Arc<AtomicBool>,
}

impl<T> Listener<T> {
    /// Creates a new listener reading frames of the codec's minimum length.
    ///
    /// # Errors
    ///
    /// Returns an [`std::io::Error`] if the codec's minimum frame length exceeds
    /// [`MAX_FRAME_SIZE`](crate::MAX_FRAME_SIZE).
    pub fn new(
        reader: T,
        codec: Codec,
        origin: Arc<Mutex<Origin>>,
        readings: Sender<Reading>,
        running: Arc<AtomicBool>,
    ) -> std::io::Result<Self> {
        Ok(Self {
            reader: FrameReader::new(reader, codec.min_frame_len())?,
            codec,
            origin,
            readings,
            running,
        })
    }

    fn origin(&self) -> Origin {
        self.origin
            .lock()
            .map_or_else(|poisoned| *poisoned.into_inner(), |origin| *origin)
    }
}

impl<T> Listener<T>
where
    T: Read,
{
    /// Runs the listener loop.
    ///
    /// The loop ends when `running` is cleared, the reading channel is closed or a non time-out
    /// I/O error occurs.
    pub fn run(mut self) {
        while self.running.load(Ordering::Relaxed) {
            match self.receive() {
                Ok(Some(reading)) => {
                    if self.readings.send(reading).is_err() {
                        info!("Reading channel closed, listener exiting.");
                        break;
                    }
                }
                Ok(None) => {}
                Err(error) if error.kind() == ErrorKind::TimedOut => {}
                Err(error) => {
                    error!("Listener exiting due to I/O error: {error}");
                    break;
                }
            }
        }
    }

    /// Receives the next frame.
    ///
    /// Returns `None` if the frame was rejected.
    ///
    /// # Errors
    ///
    /// Returns an [`std::io::Error`] if reading from the serial port fails.
    pub fn receive(&mut self) -> std::io::Result<Option<Reading>> {
        let origin = self.origin();

        let result = self.codec.decode(self.reader.read_frame()?, &origin);

        match result {
            Ok(reading) => {
                debug!("Received reading: {}", reading.rotation());
                self.reader.consume();
                Ok(Some(reading))
            }
            Err(error @ Error::ChecksumMismatch { .. }) => {
                warn!("Discarding frame: {error}");
                self.reader.resync();
                Ok(None)
            }
            Err(error) => {
                warn!("Discarding frame: {error}");
                self.reader.consume();
                Ok(None)
            }
        }
    }
}
