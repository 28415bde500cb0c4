//! Serial command and telemetry link of a two-axis motorized microscope stage.
//!
//! Commands and telemetry travel in frames consisting of a start marker, the payload, a CRC-16
//! checksum of the payload and an end marker. See [`Frame`] for the exact layout.
//!
//! # Examples
//!
//! ```
//! use stagelink::{create_packet, validate_and_decode, Origin};
//!
//! let mut payload = vec![0x00; 6];
//! payload.extend_from_slice(&12345_u32.to_le_bytes());
//! payload.extend_from_slice(&0_u32.to_le_bytes());
//!
//! let reading = validate_and_decode(&create_packet(&payload), &Origin::new(23.45, 0.0)).unwrap();
//! assert!((reading.rotation().t() - 100.0).abs() < 1e-9);
//! ```

pub use baud_rate::BaudRate;
pub use checksum::{crc16, CRC};
pub use codec::{validate_and_decode, Codec};
pub use command::{Axis, Command, Direction, Speed};
pub use error::Error;
pub use frame::{create_packet, Frame, END, START};
pub use frame_reader::{FrameReader, MAX_FRAME_SIZE};
pub use listener::Listener;
pub use origin::Origin;
pub use revision::Revision;
pub use serial_port::{open, SerialPortImpl, TryCloneNative};
pub use stage::Stage;
pub use telemetry::{Reading, Rotation, Telemetry};
pub use transmitter::{Transmitter, DEFAULT_PERIOD};
pub use utils::{read_u32_le, HexSlice};
pub use validate::Validate;

mod baud_rate;
mod checksum;
mod codec;
mod command;
mod error;
mod frame;
mod frame_reader;
mod listener;
mod origin;
mod revision;
mod serial_port;
mod stage;
mod telemetry;
mod transmitter;
mod utils;
mod validate;
