//! Error types for process sampling
//!
//! Per-process failures (access denied, process exited) are not errors: the
//! process simply drops out of the sample. Only losing the whole snapshot is
//! reported through `SampleError`.

use thiserror::Error;

/// Failures that prevent a whole snapshot from being taken.
#[derive(Debug, Error)]
pub enum SampleError {
    /// The host refused to enumerate processes
    #[cfg(any(windows, test))]
    #[error("process enumeration failed: {0}")]
    Enumeration(String),

    /// Enumeration succeeded but reported no processes at all
    #[error("process snapshot was empty")]
    EmptySnapshot,
}

#[cfg(windows)]
impl From<windows::core::Error> for SampleError {
    fn from(err: windows::core::Error) -> Self {
        SampleError::Enumeration(err.to_string())
    }
}

/// Result type for snapshot operations
pub type SampleResult<T> = Result<T, SampleError>;
