use std::fmt;
use std::io;

use vmrp_record::RecordError;
use vmrp_stego::{ErrorKind, StegoError};

// Exit codes follow sysexits where one fits.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const HEALTH_CHECK_FAILED: i32 = 30;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const CAPABILITY_UNAVAILABLE: i32 = 69;
pub const CANT_CREATE: i32 = 73;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: &io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => FAILURE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn stego_error(context: &str, err: StegoError) -> CliError {
    match &err {
        StegoError::Io { source, .. } => return io_error(context, source),
        StegoError::Carrier(vmrp_carrier::CarrierError::Io(source)) => {
            return io_error(context, source)
        }
        StegoError::LossyTarget { .. } => return CliError::new(USAGE, format!("{context}: {err}")),
        _ => {}
    }

    let code = match err.kind() {
        ErrorKind::InsufficientCapacity => CANT_CREATE,
        ErrorKind::HeaderMismatch
        | ErrorKind::UnsupportedVersion
        | ErrorKind::TruncatedStream
        | ErrorKind::MalformedPayload
        | ErrorKind::InvalidInput => DATA_INVALID,
        ErrorKind::CapabilityUnavailable => CAPABILITY_UNAVAILABLE,
        ErrorKind::Io => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn record_error(context: &str, err: RecordError) -> CliError {
    match err {
        RecordError::Metadata(_) => CliError::new(USAGE, format!("{context}: {err}")),
        RecordError::MalformedPayload(_) => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        RecordError::Json(_) => CliError::new(INTERNAL, format!("{context}: {err}")),
    }
}
