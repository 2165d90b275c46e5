//! Canonical payload text for chapter records.
//!
//! Compact JSON, keys sorted at every level, non-ASCII text as raw UTF-8.
//! Decoding also accepts `\uXXXX` escapes, so payloads written by encoders
//! that escape non-ASCII still parse to the same record.

use crate::error::{RecordError, Result};
use crate::record::ChapterRecord;

/// Render `record` to its canonical byte form.
pub fn serialize(record: &ChapterRecord) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(record)?)
}

/// Parse canonical bytes back into a validated record.
///
/// Any failure (bad UTF-8, bad JSON, missing or mistyped fields, flags other
/// than exactly `R`/`G`/`B`) is reported as [`RecordError::MalformedPayload`].
pub fn deserialize(bytes: &[u8]) -> Result<ChapterRecord> {
    serde_json::from_slice(bytes).map_err(|err| RecordError::MalformedPayload(err.to_string()))
}
