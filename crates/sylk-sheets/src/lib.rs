//! # sylk-sheets
//!
//! An in-memory spreadsheet engine with relative formula references and
//! SYLK output.
//!
//! ## Features
//!
//! - Cells addressed as `A1`, ranges as `A1:B2`, `A:C`, `2:5` or `Sheet!A1`
//! - Formulas of the form `=NAME(arg;arg;...)`, with nested calls
//! - Same-sheet references stored as offsets, so copied cells keep pointing
//!   at the same relative position
//! - A pluggable function registry with `SUM`, `AVERAGE`, `MIN`, `MAX` and
//!   `COUNT` built in
//! - SYLK (`.slk`) output with formulas written as `R[-1]C` offsets
//!
//! ## Example
//!
//! ```rust
//! use sylk_sheets::prelude::*;
//!
//! let mut book = Spreadsheet::new();
//! book.append_row("Sheet1", vec![1]).unwrap();
//! book.append_row("Sheet1", vec![2]).unwrap();
//! book.append_row("Sheet1", vec![3]).unwrap();
//! book.set("Sheet1", "A4", "=SUM(A1:A3)").unwrap();
//!
//! assert_eq!(book.get("Sheet1", "A4").unwrap(), Scalar::Number(6.0));
//!
//! let slk = book.to_sylk("Sheet1").unwrap();
//! assert!(slk.contains("C;Y4;X1;ESUM(R[-3]C:R[-1]C)"));
//! ```

pub mod prelude;
pub mod spreadsheet;
pub mod sylk;

pub use spreadsheet::Spreadsheet;
pub use sylk::SylkExt;

// Re-export core types
pub use sylk_sheets_core::{
    Argument, Axis, Cell, CellId, CellReference, CellValue, Coordinate, Error, FormulaRecord,
    FunctionCall, Group, Offset, Range, RangeReference, RangeSpan, Result, Row, Scalar, Workbook,
    Worksheet, MAX_COLS, MAX_ROWS, MAX_SHEET_NAME_LEN,
};

// Re-export formula types
pub use sylk_sheets_formula::{
    classify, compile, evaluate_call, evaluate_cell, parse_formula, CellInput,
    EvaluationContext, FormulaError, FormulaExpr, FormulaResult, FunctionDef, FunctionImpl,
    FunctionRegistry, Reference, ReferenceResolver,
};

// Re-export SYLK types
pub use sylk_sheets_slk::{relativize, LineTerminator, SlkError, SlkWriteOptions, SlkWriter};
