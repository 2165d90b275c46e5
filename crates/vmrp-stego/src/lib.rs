//! Embed chapter records in lossless image carriers, and get them back.
//!
//! This is the layer that ties the pieces together:
//!
//! ```text
//! record ─► canonical JSON ─► frame ─► bits ─► carrier LSBs ─► PNG
//! PNG ─► carrier LSBs ─► bits ─► frame ─► canonical JSON ─► record
//! ```
//!
//! Encoding checks capacity before touching the carrier and writes nothing
//! on failure. Decoding is all-or-nothing.

pub mod decoder;
pub mod encoder;
pub mod error;

pub use decoder::{decode, decode_bytes, decode_carrier, extract_payload, probe_header};
pub use encoder::{
    embed_record, encode, encode_file, encode_with_config, ensure_lossless_target, EncodeConfig,
    EncodeReport,
};
pub use error::{ErrorKind, Result, StegoError};

pub use vmrp_carrier::{is_available, Carrier, CarrierConfig};
pub use vmrp_record::{ChapterRecord, FlagState, Flags};
