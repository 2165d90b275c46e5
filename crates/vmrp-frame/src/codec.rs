use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::bits::bytes_from;
use crate::error::{FrameError, Result};

/// Magic marker: `"VMRP\0"`.
pub const MAGIC: [u8; 5] = *b"VMRP\0";

/// The only frame version this codec reads and writes.
pub const VERSION: u8 = 1;

/// Frame header: magic (5) + version (1) + length (4) = 10 bytes.
pub const HEADER_SIZE: usize = MAGIC.len() + 1 + 4;

/// Largest payload the 4-byte length field can describe.
pub const MAX_PAYLOAD: usize = u32::MAX as usize;

/// Decoded frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Format version byte.
    pub version: u8,
    /// Declared payload length in bytes.
    pub length: u32,
}

impl FrameHeader {
    /// Declared payload size in bytes.
    pub fn payload_len(&self) -> usize {
        self.length as usize
    }

    /// Total bits the full frame occupies in a carrier.
    pub fn frame_bits(&self) -> usize {
        frame_bits(self.payload_len())
    }
}

/// Bits needed to carry a frame around a payload of `payload_len` bytes.
///
/// Saturates at `usize::MAX` for lengths no carrier could hold.
pub fn frame_bits(payload_len: usize) -> usize {
    HEADER_SIZE.saturating_add(payload_len).saturating_mul(8)
}

/// Encode a payload into the frame wire format.
///
/// Wire format:
/// ```text
/// ┌──────────────┬─────────┬──────────┬──────────────────┐
/// │ Magic (5B)   │ Version │ Length   │ Payload          │
/// │ "VMRP\0"     │ (1B)    │ (4B BE)  │ (Length bytes)   │
/// └──────────────┴─────────┴──────────┴──────────────────┘
/// ```
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > MAX_PAYLOAD {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_PAYLOAD,
        });
    }
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_slice(&MAGIC);
    dst.put_u8(VERSION);
    dst.put_u32(payload.len() as u32);
    dst.put_slice(payload);
    Ok(())
}

/// Build a standalone frame around `payload`.
pub fn build_frame(payload: &[u8]) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    encode_frame(payload, &mut buf)?;
    Ok(buf.freeze())
}

/// Read and validate the frame header from a bit source.
///
/// Consumes exactly `HEADER_SIZE * 8` bits on success.
pub fn read_header<I>(bits: &mut I) -> Result<FrameHeader>
where
    I: Iterator<Item = u8> + ?Sized,
{
    let raw = bytes_from(bits, HEADER_SIZE)?;

    let mut found = [0u8; 5];
    found.copy_from_slice(&raw[..MAGIC.len()]);
    if found != MAGIC {
        return Err(FrameError::HeaderMismatch { found });
    }

    let version = raw[MAGIC.len()];
    if version != VERSION {
        return Err(FrameError::UnsupportedVersion(version));
    }

    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&raw[MAGIC.len() + 1..HEADER_SIZE]);
    let length = u32::from_be_bytes(len_bytes);

    debug!(version, length, "frame header read");
    Ok(FrameHeader { version, length })
}

/// Parse a complete frame from a bit source and return its payload.
///
/// Fails with `HeaderMismatch`, `UnsupportedVersion` or `TruncatedStream`;
/// nothing is returned unless the whole declared payload was read.
pub fn parse_frame<I>(bits: &mut I) -> Result<Bytes>
where
    I: Iterator<Item = u8> + ?Sized,
{
    let header = read_header(bits)?;
    let payload = bytes_from(bits, header.payload_len())?;
    Ok(Bytes::from(payload))
}
