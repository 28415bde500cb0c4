//! Miscellaneous utility types and functions.

pub use bytes::read_u32_le;
pub use hex_slice::HexSlice;

mod bytes;
mod hex_slice;
