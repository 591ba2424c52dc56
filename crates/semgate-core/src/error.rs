//! Shared error type across semgate crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request or config.
    BadRequest,
    /// Semantic manifest is missing required structure.
    InvalidManifest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::InvalidManifest => "INVALID_MANIFEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SemgateError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum SemgateError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl SemgateError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            SemgateError::BadRequest(_) => ClientCode::BadRequest,
            SemgateError::InvalidManifest(_) => ClientCode::InvalidManifest,
            SemgateError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            SemgateError::Internal(_) => ClientCode::Internal,
        }
    }
}
