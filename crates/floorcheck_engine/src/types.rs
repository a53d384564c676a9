use std::fmt;

pub type RequestId = u64;

/// User-facing message shown when the service gives us nothing better.
pub const GENERIC_UPLOAD_ERROR: &str = "Failed to calculate area";

/// Area figures parsed from a successful service response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationResult {
    pub square_foot: f64,
    pub variance: f64,
}

/// Decoded, downscaled RGBA8 bitmap ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewBitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Events emitted by the engine back to the UI loop.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    PreviewReady {
        request_id: RequestId,
        bitmap: PreviewBitmap,
    },
    PreviewFailed {
        request_id: RequestId,
        reason: String,
    },
    UploadCompleted {
        request_id: RequestId,
        result: Result<CalculationResult, UploadError>,
    },
}

/// Upload failure with a message fit for direct display.
///
/// `message` is either the service's own `error` string or
/// [`GENERIC_UPLOAD_ERROR`]; transport details stay in the log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct UploadError {
    pub kind: FailureKind,
    pub message: String,
}

impl UploadError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The selected file could not be read from disk.
    FileRead,
    /// The request never reached the service.
    Network,
    Timeout,
    /// Non-2xx response.
    HttpStatus(u16),
    /// 2xx response whose body did not carry the expected numeric fields.
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::FileRead => write!(f, "file read error"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}
