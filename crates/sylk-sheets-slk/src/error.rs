//! SYLK error types

use thiserror::Error;

/// Result type for SYLK operations
pub type SlkResult<T> = std::result::Result<T, SlkError>;

/// Errors that can occur while writing SYLK
#[derive(Debug, Error)]
pub enum SlkError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] sylk_sheets_core::Error),
}

impl From<SlkError> for sylk_sheets_core::Error {
    fn from(err: SlkError) -> Self {
        match err {
            SlkError::Io(e) => sylk_sheets_core::Error::Other(format!("IO error: {}", e)),
            SlkError::Core(e) => e,
        }
    }
}
