//! Error types for sylk-sheets-core

use crate::row::CellId;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur anywhere in sylk-sheets
///
/// The formula and writer crates convert their own errors into this type, so
/// callers of the facade only ever match on one enum.
#[derive(Debug, Error)]
pub enum Error {
    /// Address or range text that matches none of the recognized grammars
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// A cell could not be found inside the sheet that claims to own it
    #[error("Cell {cell} not found in sheet '{sheet}'")]
    CoordinateNotFound { sheet: String, cell: CellId },

    /// A relative offset points above row 1 or left of column A
    #[error("Reference R[{row}]C[{col}] falls outside the grid")]
    ReferenceOutOfGrid { row: i64, col: i64 },

    /// Slice assignment with a sequence of the wrong length
    #[error("Length mismatch: slice spans {expected} cells, got {actual} values")]
    LengthMismatch { expected: usize, actual: usize },

    /// Assignment with a value of the wrong shape
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Formula text could not be bound, resolved or evaluated
    #[error("Formula syntax error in '{text}': {reason}")]
    FormulaSyntax { text: String, reason: String },

    /// Function name with no implementation at evaluation time
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Circular reference detected
    #[error("Circular reference detected involving {0}")]
    CircularReference(String),

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
