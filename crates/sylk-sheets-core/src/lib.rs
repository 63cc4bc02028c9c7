//! # sylk-sheets-core
//!
//! Core data structures for the sylk-sheets spreadsheet engine.
//!
//! This crate provides the fundamental types used throughout sylk-sheets:
//! - [`Coordinate`] and [`Offset`] - Cell positions and the relative-offset algebra
//! - [`CellValue`] and [`Scalar`] - What a cell holds and what it evaluates to
//! - [`FormulaRecord`] - A compiled formula with its memoized forms
//! - [`Workbook`], [`Worksheet`], [`Row`], [`Cell`] - The grid itself
//! - [`Range`] and [`Group`] - Rectangular blocks and column/row groups
//!
//! ## Example
//!
//! ```rust
//! use sylk_sheets_core::{CellValue, Coordinate, Scalar, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! let b2 = Coordinate::parse("B2").unwrap();
//! sheet.store(b2, CellValue::Literal(Scalar::Number(42.0))).unwrap();
//!
//! assert_eq!(sheet.row_count(), 2);
//! assert_eq!(sheet.cell_at(1, 1).unwrap().value(), &CellValue::from(42.0));
//! ```

mod cache;
pub mod cell;
pub mod error;
pub mod range;
pub mod row;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{
    Argument, CellReference, CellValue, Coordinate, FormulaRecord, FunctionCall, Offset,
    RangeReference, RangeSpan, Scalar,
};
pub use error::{Error, Result};
pub use range::{Axis, Group, Range};
pub use row::{Cell, CellId, Row};
pub use workbook::Workbook;
pub use worksheet::{RowSnapshot, Worksheet};

/// Maximum number of rows in a worksheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet
pub const MAX_COLS: u32 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
