use std::path::Path;

use bytes::Bytes;
use tracing::debug;
use vmrp_carrier::{ensure_available, Carrier};
use vmrp_frame::{parse_frame, read_header, FrameHeader};
use vmrp_record::ChapterRecord;

use crate::error::Result;

/// Decode the record embedded in the image at `path`.
pub fn decode(path: &Path) -> Result<ChapterRecord> {
    ensure_available()?;
    let carrier = Carrier::open(path)?;
    decode_carrier(&carrier)
}

/// Decode the record embedded in an in-memory image file.
pub fn decode_bytes(bytes: &[u8]) -> Result<ChapterRecord> {
    ensure_available()?;
    let carrier = Carrier::from_image_bytes(bytes)?;
    decode_carrier(&carrier)
}

/// Decode the record embedded in a carrier.
///
/// Header, version and length are checked before any payload byte is read;
/// the record is only returned if every step succeeds.
pub fn decode_carrier(carrier: &Carrier) -> Result<ChapterRecord> {
    let payload = extract_payload(carrier)?;
    let record = vmrp_record::deserialize(&payload)?;
    debug!(chapter = record.chapter(), "decoded record");
    Ok(record)
}

/// Read the framed payload bytes out of a carrier without parsing them.
pub fn extract_payload(carrier: &Carrier) -> Result<Bytes> {
    let mut bits = carrier.lsb_bits();
    let payload = parse_frame(&mut bits)?;
    debug!(
        payload_bytes = payload.len(),
        capacity_bits = carrier.capacity_bits(),
        "extracted frame payload"
    );
    Ok(payload)
}

/// Read only the frame header of a carrier.
///
/// Succeeds even when the declared payload would not fit the carrier; compare
/// [`FrameHeader::frame_bits`] with [`Carrier::capacity_bits`] to check.
pub fn probe_header(carrier: &Carrier) -> Result<FrameHeader> {
    Ok(read_header(&mut carrier.lsb_bits())?)
}
