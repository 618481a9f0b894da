//! Error types for kakitori-recog

use thiserror::Error;

/// Errors that can occur during library loading and recognition
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] kakitori_core::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Asset does not start with the expected magic bytes
    #[error("bad magic: expected {expected:?}, got {actual:?}")]
    BadMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Asset format version outside the supported range
    #[error("unsupported asset version {version}: supported range is {min}..={max}")]
    UnsupportedVersion { version: u16, min: u16, max: u16 },

    /// Asset content is inconsistent
    #[error("invalid asset: {0}")]
    InvalidAsset(String),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
