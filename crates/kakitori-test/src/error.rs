//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while preparing regression test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Building a fixture library failed
    #[error("failed to build fixture library: {0}")]
    Library(#[from] kakitori_recog::RecogError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
