/// Errors raised while encoding, decoding or loading chapter records.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The payload is not a well-formed chapter record.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A metadata document could not be read or has the wrong shape.
    #[error("invalid metadata: {0}")]
    Metadata(String),

    /// JSON encoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RecordError>;
