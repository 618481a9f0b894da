//! Error types for kakitori-core
//!
//! Provides a unified error type for the fallible operations in the core
//! crate, which are limited to parameter validation and binary decoding.
//! Geometry queries on empty strokes are programmer errors and are checked
//! with debug assertions instead.

use thiserror::Error;

/// kakitori-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Malformed binary data
    #[error("decode error: {0}")]
    DecodeError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
