/// Errors that can occur while building, filling or persisting a carrier.
#[derive(Debug, thiserror::Error)]
pub enum CarrierError {
    /// The carrier has fewer channel LSBs than the payload needs.
    #[error("insufficient capacity (need {required} bits, carrier holds {available})")]
    InsufficientCapacity { required: usize, available: usize },

    /// Image codec support was not compiled in.
    #[error("{0} image codec unavailable (built without the `png` feature)")]
    CapabilityUnavailable(&'static str),

    /// Width or height is zero or too large to address.
    #[error("invalid carrier dimensions {width}x{height}")]
    InvalidDimensions { width: u64, height: u64 },

    /// The pixel buffer does not match the declared dimensions.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// A pixel index beyond the carrier was addressed.
    #[error("pixel {index} out of bounds ({pixels} pixels)")]
    OutOfBounds { index: usize, pixels: usize },

    /// The image could not be decoded or encoded.
    #[error("image error: {0}")]
    Image(String),

    /// An I/O error occurred while reading or writing an image.
    #[error("carrier I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CarrierError>;
