//! Loading chapter records from metadata documents.
//!
//! Accepts either a single chapter object or a `{"chapters": [...]}`
//! document. Per-entry keys that are not part of the record are ignored.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{RecordError, Result};
use crate::record::ChapterRecord;

/// Read and parse a metadata file.
pub fn load_metadata(path: &Path) -> Result<Vec<ChapterRecord>> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| RecordError::Metadata(format!("{}: {err}", path.display())))?;
    let value: Value = serde_json::from_str(&text)
        .map_err(|err| RecordError::Metadata(format!("{}: {err}", path.display())))?;
    let records = parse_metadata(value)?;
    debug!(?path, count = records.len(), "loaded chapter metadata");
    Ok(records)
}

/// Parse an already-decoded metadata document.
pub fn parse_metadata(value: Value) -> Result<Vec<ChapterRecord>> {
    let Value::Object(mut root) = value else {
        return Err(RecordError::Metadata(
            "metadata root is not an object".to_string(),
        ));
    };

    let Some(chapters) = root.remove("chapters") else {
        return parse_entry(Value::Object(root), None).map(|record| vec![record]);
    };

    let Value::Array(entries) = chapters else {
        return Err(RecordError::Metadata(
            "'chapters' must be an array".to_string(),
        ));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| parse_entry(entry, Some(idx)))
        .collect()
}

/// Find the record for a chapter number.
pub fn find_chapter(records: &[ChapterRecord], chapter: u32) -> Option<&ChapterRecord> {
    records.iter().find(|record| record.chapter() == chapter)
}

fn parse_entry(entry: Value, idx: Option<usize>) -> Result<ChapterRecord> {
    serde_json::from_value(entry).map_err(|err| match idx {
        Some(idx) => RecordError::MalformedPayload(format!("chapter entry {idx}: {err}")),
        None => RecordError::MalformedPayload(err.to_string()),
    })
}
