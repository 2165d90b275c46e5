/// Errors that can occur while building or parsing a frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The leading bytes are not the `VMRP\0` marker.
    #[error("frame header mismatch (found {found:02x?}, expected \"VMRP\\0\")")]
    HeaderMismatch { found: [u8; 5] },

    /// The marker matched but the version byte is not one this codec reads.
    #[error("unsupported frame version {0}")]
    UnsupportedVersion(u8),

    /// The bit source ran dry before the declared bytes were filled.
    #[error("truncated bit stream (needed {needed_bits} bits, {available_bits} available)")]
    TruncatedStream {
        needed_bits: usize,
        available_bits: usize,
    },

    /// The payload does not fit the 4-byte length field.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
