//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing, resolution or evaluation
#[derive(Debug, Error)]
pub enum FormulaError {
    /// Formula text could not be bound, resolved or evaluated
    #[error("Syntax error in '{text}': {reason}")]
    Syntax { text: String, reason: String },

    /// Unknown function
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Formula evaluation error
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Circular reference
    #[error("Circular reference detected at {0}")]
    CircularReference(String),

    /// Error from the grid
    #[error(transparent)]
    Core(#[from] sylk_sheets_core::Error),
}

impl FormulaError {
    /// Wrap any failure as a syntax error carrying the raw formula text
    pub fn syntax<S: Into<String>>(text: S, reason: impl std::fmt::Display) -> Self {
        FormulaError::Syntax {
            text: text.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<FormulaError> for sylk_sheets_core::Error {
    fn from(err: FormulaError) -> Self {
        use sylk_sheets_core::Error;

        match err {
            FormulaError::Syntax { text, reason } => Error::FormulaSyntax { text, reason },
            FormulaError::UnknownFunction(name) => Error::UnknownFunction(name),
            FormulaError::CircularReference(at) => Error::CircularReference(at),
            FormulaError::Evaluation(msg) => Error::Other(msg),
            FormulaError::Core(e) => e,
        }
    }
}
