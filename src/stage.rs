use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{spawn, JoinHandle};
use std::time::Duration;

use log::{error, info};

use crate::codec::Codec;
use crate::command::Command;
use crate::listener::Listener;
use crate::origin::Origin;
use crate::serial_port::TryCloneNative;
use crate::telemetry::{Reading, Telemetry};
use crate::transmitter::Transmitter;

/// A handle to a stage controller driven by a transmitter and a listener thread.
///
/// # Usage
///
/// ```no_run
/// use stagelink::{
///     open, Axis, BaudRate, Codec, Command, Direction, Speed, Stage, DEFAULT_PERIOD,
/// };
///
/// let serial_port = open("/dev/ttyUSB0", BaudRate::B115200).unwrap();
/// let (stage, readings) = Stage::open(serial_port, Codec::default(), DEFAULT_PERIOD).unwrap();
/// stage.set_command(Command::jog(Axis::T, Direction::Forward, Speed::Medium));
///
/// for reading in readings.iter().take(10) {
///     println!("{}", reading.rotation());
/// }
/// ```
#[derive(Debug)]
pub struct Stage {
    commands: Sender<Box<[u8]>>,
    origin: Arc<Mutex<Origin>>,
    running: Arc<AtomicBool>,
    transmitter: Option<JoinHandle<()>>,
    listener: Option<JoinHandle<()>>,
}

impl Stage {
    /// Starts the transmitter on `writer` and the listener on `reader`.
    ///
    /// Returns the stage handle and the receiving end of the decoded readings.
    ///
    /// Dropping the stage joins the listener, which checks for shutdown only between reads.
    /// `reader` must therefore return from blocking reads periodically, either with data, with an
    /// [`ErrorKind::TimedOut`](std::io::ErrorKind::TimedOut) error or at the end of the stream.
    /// Ports opened with [`open`](crate::open) have a read timeout. A reader blocking indefinitely
    /// makes the drop block until it returns.
    ///
    /// # Errors
    ///
    /// Returns an [`std::io::Error`] if the codec's minimum frame length exceeds
    /// [`MAX_FRAME_SIZE`](crate::MAX_FRAME_SIZE).
    pub fn spawn<R, W>(
        reader: R,
        writer: W,
        codec: Codec,
        period: Duration,
    ) -> std::io::Result<(Self, Receiver<Reading>)>
    where
        R: Read + Send + 'static,
        W: Write + Send + 'static,
    {
        let (commands, updates) = channel();
        let (readings, output) = channel();
        let origin = Arc::new(Mutex::new(Origin::default()));
        let running = Arc::new(AtomicBool::new(true));
        let listener = Listener::new(reader, codec, origin.clone(), readings, running.clone())?;
        let transmitter = Transmitter::new(writer, updates, period);

        Ok((
            Self {
                commands,
                origin,
                running,
                transmitter: Some(spawn(move || {
                    transmitter.run();
                })),
                listener: Some(spawn(move || listener.run())),
            },
            output,
        ))
    }

    /// Starts the stage on a serial port.
    ///
    /// The port is cloned so that the listener reads from one handle while the transmitter writes
    /// to the other. The read timeout requirement of [`spawn`](Self::spawn) applies to the port.
    ///
    /// # Errors
    ///
    /// Returns a [`serialport::Error`] if the serial port cannot be cloned or the codec's minimum
    /// frame length exceeds [`MAX_FRAME_SIZE`](crate::MAX_FRAME_SIZE).
    pub fn open<T>(
        serial_port: T,
        codec: Codec,
        period: Duration,
    ) -> serialport::Result<(Self, Receiver<Reading>)>
    where
        T: TryCloneNative + Read + Write + Send + 'static,
    {
        let reader = serial_port.try_clone_native()?;
        Self::spawn(reader, serial_port, codec, period).map_err(serialport::Error::from)
    }

    /// Sets the command re-sent to the controller on every tick.
    pub fn set_command(&self, command: Command) {
        info!("Setting command: {command}");
        self.set_payload(command.payload());
    }

    /// Sets a raw payload re-sent to the controller on every tick.
    pub fn set_payload(&self, payload: impl Into<Box<[u8]>>) {
        self.commands.send(payload.into()).unwrap_or_else(|_| {
            error!("Transmitter is not running. Discarding payload.");
        });
    }

    /// Returns the current origin.
    #[must_use]
    pub fn origin(&self) -> Origin {
        self.origin
            .lock()
            .map_or_else(|poisoned| *poisoned.into_inner(), |origin| *origin)
    }

    /// Sets the origin subtracted from subsequent readings.
    pub fn set_origin(&self, origin: Origin) {
        info!("Setting origin to T: {:.2}°, R: {:.2}°", origin.t(), origin.r());
        *self
            .origin
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = origin;
    }

    /// Sets the origin to the absolute angles of `telemetry`.
    pub fn zero(&self, telemetry: &Telemetry) {
        self.set_origin(Origin::zero_at(telemetry));
    }
}

impl Drop for Stage {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        let (commands, _) = channel();
        drop(std::mem::replace(&mut self.commands, commands));

        if let Some(thread) = self.transmitter.take() {
            thread.join().unwrap_or_else(|_| {
                error!("Failed to join transmitter thread.");
            });
        }

        if let Some(thread) = self.listener.take() {
            thread.join().unwrap_or_else(|_| {
                error!("Failed to join listener thread.");
            });
        }
    }
}
