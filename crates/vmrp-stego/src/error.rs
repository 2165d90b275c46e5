use std::path::PathBuf;

use vmrp_carrier::CarrierError;
use vmrp_frame::FrameError;
use vmrp_record::RecordError;

/// Errors that can occur while encoding or decoding a stego image.
#[derive(Debug, thiserror::Error)]
pub enum StegoError {
    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Record-level error.
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// Carrier-level error.
    #[error("carrier error: {0}")]
    Carrier(#[from] CarrierError),

    /// The output path names a format other than PNG.
    #[error("refusing to write {}: carriers are only persisted as lossless PNG", path.display())]
    LossyTarget { path: PathBuf },

    /// Writing the output failed.
    #[error("failed writing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse failure class, independent of which layer raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InsufficientCapacity,
    HeaderMismatch,
    UnsupportedVersion,
    TruncatedStream,
    MalformedPayload,
    CapabilityUnavailable,
    InvalidInput,
    Io,
}

impl StegoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StegoError::Frame(err) => match err {
                FrameError::HeaderMismatch { .. } => ErrorKind::HeaderMismatch,
                FrameError::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
                FrameError::TruncatedStream { .. } => ErrorKind::TruncatedStream,
                FrameError::PayloadTooLarge { .. } => ErrorKind::InsufficientCapacity,
            },
            StegoError::Record(err) => match err {
                RecordError::MalformedPayload(_) => ErrorKind::MalformedPayload,
                RecordError::Metadata(_) | RecordError::Json(_) => ErrorKind::InvalidInput,
            },
            StegoError::Carrier(err) => match err {
                CarrierError::InsufficientCapacity { .. } => ErrorKind::InsufficientCapacity,
                CarrierError::CapabilityUnavailable(_) => ErrorKind::CapabilityUnavailable,
                CarrierError::Io(_) => ErrorKind::Io,
                CarrierError::InvalidDimensions { .. }
                | CarrierError::InvalidPixelData { .. }
                | CarrierError::OutOfBounds { .. }
                | CarrierError::Image(_) => ErrorKind::InvalidInput,
            },
            StegoError::LossyTarget { .. } => ErrorKind::InvalidInput,
            StegoError::Io { .. } => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, StegoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_collapses_layers() {
        let err: StegoError = FrameError::UnsupportedVersion(2).into();
        assert_eq!(err.kind(), ErrorKind::UnsupportedVersion);

        let err: StegoError = CarrierError::InsufficientCapacity {
            required: 10,
            available: 3,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::InsufficientCapacity);

        let err: StegoError = RecordError::MalformedPayload("x".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::MalformedPayload);

        let err: StegoError = CarrierError::CapabilityUnavailable("png").into();
        assert_eq!(err.kind(), ErrorKind::CapabilityUnavailable);
    }

    #[test]
    fn messages_carry_context() {
        let err = StegoError::LossyTarget {
            path: PathBuf::from("out/chapter05.jpg"),
        };
        assert!(err.to_string().contains("out/chapter05.jpg"));
    }
}
