//! Prelude module - common imports for sylk-sheets users
//!
//! ```rust
//! use sylk_sheets::prelude::*;
//! ```

pub use crate::{
    // Cell types
    CellInput,
    CellReference,
    CellValue,
    Coordinate,
    // Error types
    Error,
    FormulaRecord,
    // Functions
    FunctionImpl,
    FunctionRegistry,
    Range,
    Result,
    Scalar,
    // Output
    SlkWriteOptions,
    // Main types
    Spreadsheet,
    SylkExt,
    Workbook,
    Worksheet,
};
