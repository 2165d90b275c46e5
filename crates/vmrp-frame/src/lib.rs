//! Bit-level framing for payloads hidden in carrier LSBs.
//!
//! Every embedded payload is wrapped in a fixed header:
//! - A 5-byte magic marker (`"VMRP\0"`) identifying the format
//! - A 1-byte format version
//! - A 4-byte big-endian payload length
//!
//! The framed bytes are then spread over single bits, most-significant bit
//! first, so a carrier only ever has to deal with a flat bit sequence.

pub mod bits;
pub mod codec;
pub mod error;

pub use bits::{bits_of, bytes_from, BitsOf};
pub use codec::{
    build_frame, encode_frame, frame_bits, parse_frame, read_header, FrameHeader, HEADER_SIZE,
    MAGIC, MAX_PAYLOAD, VERSION,
};
pub use error::{FrameError, Result};
