//! LSB steganography for chapter metadata in lossless PNG carriers.
//!
//! vmrp hides a small structured record in the least-significant bits of an
//! image's colour channels and recovers it byte-exact later.
//!
//! # Crate Structure
//!
//! - [`frame`]: MSB-first bit codec and the magic/version/length frame
//! - [`record`]: Chapter records and their canonical JSON encoding
//! - [`carrier`]: Pixel carriers, capacity, PNG persistence (behind `png`)
//! - [`stego`]: Encode/decode orchestration
//!
//! The most common entry points are re-exported at the root.

/// Re-export frame types.
pub mod frame {
    pub use vmrp_frame::*;
}

/// Re-export record types.
pub mod record {
    pub use vmrp_record::*;
}

/// Re-export carrier types.
pub mod carrier {
    pub use vmrp_carrier::*;
}

/// Re-export encoder/decoder types.
pub mod stego {
    pub use vmrp_stego::*;
}

pub use vmrp_stego::{
    decode, encode, encode_file, is_available, Carrier, ChapterRecord, ErrorKind, FlagState,
    Flags, StegoError,
};
