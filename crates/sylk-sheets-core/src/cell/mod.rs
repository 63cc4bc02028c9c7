//! Cell-related types and utilities
//!
//! This module contains:
//! - [`Coordinate`] / [`Offset`] - A cell's location and relative offsets between locations
//! - [`Scalar`] / [`CellValue`] - What a cell evaluates to and what it stores
//! - [`FormulaRecord`] - A compiled formula with resolved arguments

mod address;
mod formula;
mod value;

pub use address::{Coordinate, Offset};
pub use formula::{
    Argument, CellReference, FormulaRecord, FunctionCall, RangeReference, RangeSpan,
};
pub use value::{CellValue, Scalar};
