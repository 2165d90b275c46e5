//! Chapter records and their canonical payload encoding.
//!
//! A [`ChapterRecord`] is the structured value carried inside a stego image.
//! The canonical encoding is compact JSON with object keys in ascending
//! order, so equal records always produce byte-identical payloads.

pub mod canonical;
pub mod error;
pub mod metadata;
pub mod record;

pub use canonical::{deserialize, serialize};
pub use error::{RecordError, Result};
pub use metadata::{find_chapter, load_metadata, parse_metadata};
pub use record::{ChapterRecord, FlagState, Flags};
