//! Cell value types

use super::address::Offset;
use super::formula::{CellReference, FormulaRecord};
use std::fmt;

/// A plain value: what a literal cell holds and what every cell evaluates to
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scalar {
    /// Empty value
    #[default]
    Blank,
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
}

impl Scalar {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        Scalar::Text(s.into())
    }

    /// Check if the value is blank
    ///
    /// Empty text counts as blank, matching how `count` treats it.
    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Blank => true,
            Scalar::Text(s) => s.is_empty(),
            Scalar::Number(_) => false,
        }
    }

    /// Try to get the value as a number
    ///
    /// Text that parses as a number is accepted.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Blank => None,
        }
    }

    /// Try to get the value as text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Blank => "blank",
            Scalar::Number(_) => "number",
            Scalar::Text(_) => "text",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Blank => Ok(()),
            Scalar::Number(n) => {
                // Integral values print without a fractional part
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(n as f64)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

/// What a cell stores
///
/// Only `Literal` holds its value directly; the other variants are resolved
/// against the grid every time the cell is read.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// A plain number, text or blank
    Literal(Scalar),

    /// Same-sheet reference stored as an offset from the holding cell
    RelativeRef(Offset),

    /// Cross-sheet reference stored as a fixed target
    AbsoluteRef(CellReference),

    /// Compiled formula
    Formula(Box<FormulaRecord>),
}

impl CellValue {
    /// The blank literal
    pub fn blank() -> Self {
        CellValue::Literal(Scalar::Blank)
    }

    /// Check if the cell is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Literal(s) if s.is_blank())
    }

    /// Check if the cell contains a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Formula(_))
    }

    /// Get the literal value if this is a literal cell
    pub fn as_literal(&self) -> Option<&Scalar> {
        match self {
            CellValue::Literal(s) => Some(s),
            _ => None,
        }
    }

    /// Get the formula record if this is a formula cell
    pub fn as_formula(&self) -> Option<&FormulaRecord> {
        match self {
            CellValue::Formula(record) => Some(record),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Literal(s) => s.type_name(),
            CellValue::RelativeRef(_) => "relative reference",
            CellValue::AbsoluteRef(_) => "absolute reference",
            CellValue::Formula(_) => "formula",
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::blank()
    }
}

impl From<Scalar> for CellValue {
    fn from(value: Scalar) -> Self {
        CellValue::Literal(value)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Literal(Scalar::Number(n))
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Literal(Scalar::from(s))
    }
}
