//! Reassembly of frames from a serial byte stream.

use std::io::{Error, ErrorKind, Read};

use log::{debug, trace};

use crate::frame::{Frame, START};
use crate::utils::HexSlice;

/// Maximum frame length the reader can reassemble.
pub const MAX_FRAME_SIZE: usize = 256;

const BUFFER_SIZE: usize = MAX_FRAME_SIZE * 2;

/// Reads fixed-length frames from a byte stream.
///
/// Bytes preceding a start marker are discarded. A returned frame stays at the head of the buffer
/// until the caller either [`consume`](Self::consume)s it or [`resync`](Self::resync)s past its
/// start marker.
#[derive(Debug)]
pub struct FrameReader<T> {
    inner: T,
    frame_len: usize,
    buffer: heapless::Vec<u8, BUFFER_SIZE>,
}

impl<T> FrameReader<T> {
    /// Creates a new `FrameReader` yielding frames of `frame_len` bytes.
    ///
    /// Frame lengths below `Frame::OVERHEAD` are raised to it.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] of kind [`ErrorKind::InvalidInput`] if `frame_len` exceeds
    /// [`MAX_FRAME_SIZE`].
    pub fn new(inner: T, frame_len: usize) -> std::io::Result<Self> {
        if frame_len > MAX_FRAME_SIZE {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("Frame length {frame_len} exceeds maximum of {MAX_FRAME_SIZE} bytes."),
            ));
        }

        Ok(Self {
            inner,
            frame_len: frame_len.max(Frame::OVERHEAD),
            buffer: heapless::Vec::new(),
        })
    }

    /// Returns the length of the frames being read.
    #[must_use]
    pub const fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Return the inner reader.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Drops the frame last returned by [`read_frame`](Self::read_frame).
    pub fn consume(&mut self) {
        self.drain(self.frame_len);
    }

    /// Drops the start marker of the frame last returned by [`read_frame`](Self::read_frame).
    ///
    /// The next read locks onto the following start marker, which recovers from a start byte
    /// value occurring inside of garbage or payload data.
    pub fn resync(&mut self) {
        trace!("Resynchronizing after {:X}", HexSlice::new(&self.buffer));
        self.drain(1);
    }

    fn drain(&mut self, count: usize) {
        let count = count.min(self.buffer.len());
        let remaining = self.buffer.len() - count;
        self.buffer.copy_within(count.., 0);
        self.buffer.truncate(remaining);
    }

    fn discard_garbage(&mut self) {
        match self.buffer.iter().position(|&byte| byte == START) {
            Some(0) => {}
            Some(index) => {
                trace!("Discarding garbage: {:X}", HexSlice::new(&self.buffer[..index]));
                self.drain(index);
            }
            None => {
                if !self.buffer.is_empty() {
                    trace!("Discarding garbage: {:X}", HexSlice::new(&self.buffer));
                    self.buffer.clear();
                }
            }
        }
    }
}

impl<T> FrameReader<T>
where
    T: Read,
{
    /// Reads the next frame candidate.
    ///
    /// The returned bytes begin with a start marker and are exactly [`frame_len`](Self::frame_len)
    /// bytes long. They have not been validated.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if reading from the inner reader fails or the stream ends.
    pub fn read_frame(&mut self) -> std::io::Result<&[u8]> {
        let mut chunk = [0; BUFFER_SIZE];

        loop {
            self.discard_garbage();

            if self.buffer.len() >= self.frame_len {
                debug!("Received frame candidate.");
                trace!("Buffer: {:X}", HexSlice::new(&self.buffer));
                return Ok(&self.buffer[..self.frame_len]);
            }

            let free = self.buffer.capacity() - self.buffer.len();
            let read = self.inner.read(&mut chunk[..free])?;

            if read == 0 {
                return Err(Error::new(
                    ErrorKind::UnexpectedEof,
                    "Byte stream terminated unexpectedly.",
                ));
            }

            self.buffer
                .extend_from_slice(&chunk[..read])
                .map_err(|()| Error::other("Frame buffer overflow."))?;
        }
    }
}
