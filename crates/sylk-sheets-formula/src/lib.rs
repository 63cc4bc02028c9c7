//! # sylk-sheets-formula
//!
//! Formula compiler and evaluator for sylk-sheets.
//!
//! This crate provides:
//! - Formula parsing (text → [`FormulaExpr`])
//! - Reference resolution (A1 / range / column / row / cross-sheet grammar)
//! - Compilation into a [`FormulaRecord`](sylk_sheets_core::FormulaRecord)
//! - Evaluation against a [`Workbook`](sylk_sheets_core::Workbook)
//! - A named-function registry with the default aggregates
//!
//! ## Example
//!
//! ```rust
//! use sylk_sheets_core::{CellValue, Coordinate, Scalar, Workbook};
//! use sylk_sheets_formula::{compile, evaluate_cell, EvaluationContext, FunctionRegistry};
//!
//! let mut workbook = Workbook::new();
//! let mut functions = FunctionRegistry::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.store(Coordinate::new(0, 0), CellValue::from(2.0)).unwrap();
//! sheet.store(Coordinate::new(1, 0), CellValue::from(3.0)).unwrap();
//!
//! let a3 = Coordinate::parse("A3").unwrap();
//! let value = compile("=SUM(A1:A2)", &workbook, &mut functions, "Sheet1", a3).unwrap();
//! workbook.worksheet_mut(0).unwrap().store(a3, value).unwrap();
//!
//! let sheet = workbook.worksheet(0).unwrap();
//! let ctx = EvaluationContext::new(&workbook, &functions, sheet);
//! let cell = sheet.cell_at(2, 0).unwrap();
//! assert_eq!(evaluate_cell(&ctx, cell).unwrap(), Scalar::Number(5.0));
//! ```

pub mod ast;
pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;
pub mod resolver;

pub use ast::FormulaExpr;
pub use compiler::compile;
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate_call, evaluate_cell, range_values, value_at, EvaluationContext};
pub use functions::{FunctionDef, FunctionImpl, FunctionRegistry};
pub use parser::{parse_formula, MAX_NESTING};
pub use resolver::{classify, CellInput, Reference, ReferenceResolver};
