//! Error types for the processor.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors returned by the processor and its layers.
///
/// Every variant maps to a small stable status code via [`ProcessorError::code`];
/// `0` is reserved for success.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// A required entry field was empty.
    #[error("invalid argument: {0} must not be empty")]
    InvalidArgument(&'static str),

    /// The store could not grow to hold another entry.
    #[error("allocation failure: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// An operation was attempted before `initialize` or after `teardown`.
    #[error("processor is not initialized")]
    NotInitialized,

    /// `initialize` was called while already initialized.
    #[error("processor is already initialized")]
    AlreadyInitialized,

    /// Configuration values failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// No held alert carries the given id.
    #[error("alert not found: {0}")]
    AlertNotFound(String),
}

impl ProcessorError {
    /// Stable integer status for this error.
    pub fn code(&self) -> u8 {
        match self {
            ProcessorError::InvalidArgument(_) => 1,
            ProcessorError::AllocationFailure(_) => 2,
            ProcessorError::NotInitialized => 3,
            ProcessorError::AlreadyInitialized => 4,
            ProcessorError::InvalidConfig(_) => 5,
            ProcessorError::AlertNotFound(_) => 6,
        }
    }
}

/// Result alias for processor operations.
pub type Result<T> = std::result::Result<T, ProcessorError>;
