//! Compiled formula types
//!
//! These are the resolved forms the formula compiler produces: every
//! reference is already a concrete coordinate or span, and every function
//! name is normalized to lowercase. Rendering back to text lives here too,
//! in both A1 notation (canonical form) and absolute R1C1 notation
//! (serialized form).

use super::address::Coordinate;
use super::value::Scalar;
use std::fmt;

/// Cell reference with optional sheet
///
/// `sheet: None` means the sheet that holds the formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellReference {
    pub sheet: Option<String>,
    pub coord: Coordinate,
}

impl CellReference {
    /// Reference to a cell on the current sheet
    pub fn local(coord: Coordinate) -> Self {
        Self { sheet: None, coord }
    }

    /// Reference to a cell on a named sheet
    pub fn on_sheet<S: Into<String>>(sheet: S, coord: Coordinate) -> Self {
        Self {
            sheet: Some(sheet.into()),
            coord,
        }
    }

    pub fn to_r1c1_string(&self) -> String {
        qualify(self.sheet.as_deref(), self.coord.to_r1c1_string())
    }
}

impl fmt::Display for CellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            qualify(self.sheet.as_deref(), self.coord.to_a1_string())
        )
    }
}

/// The shape of a range reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeSpan {
    /// Rectangular block, `A1:B2` (start is top-left, end is bottom-right)
    Cells { start: Coordinate, end: Coordinate },
    /// Whole columns, `A:C`
    Columns { first: u32, last: u32 },
    /// Whole rows, `3:5`
    Rows { first: u32, last: u32 },
}

impl RangeSpan {
    /// Block between two corners, normalized to top-left / bottom-right
    pub fn cells(a: Coordinate, b: Coordinate) -> Self {
        RangeSpan::Cells {
            start: Coordinate::new(a.row.min(b.row), a.col.min(b.col)),
            end: Coordinate::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn columns(a: u32, b: u32) -> Self {
        RangeSpan::Columns {
            first: a.min(b),
            last: a.max(b),
        }
    }

    pub fn rows(a: u32, b: u32) -> Self {
        RangeSpan::Rows {
            first: a.min(b),
            last: a.max(b),
        }
    }

    /// Resolve to a concrete block against a sheet of `row_count` rows and
    /// `width` columns.
    ///
    /// Returns `(top_left, height, width)`. Column spans cover every existing
    /// row, row spans cover the widest existing row.
    pub fn block(&self, row_count: u32, width: u32) -> (Coordinate, u32, u32) {
        match *self {
            RangeSpan::Cells { start, end } => {
                (start, end.row - start.row + 1, end.col - start.col + 1)
            }
            RangeSpan::Columns { first, last } => {
                (Coordinate::new(0, first), row_count, last - first + 1)
            }
            RangeSpan::Rows { first, last } => {
                (Coordinate::new(first, 0), last - first + 1, width)
            }
        }
    }

    pub fn to_a1_string(&self) -> String {
        match *self {
            RangeSpan::Cells { start, end } if start == end => start.to_a1_string(),
            RangeSpan::Cells { start, end } => {
                format!("{}:{}", start.to_a1_string(), end.to_a1_string())
            }
            RangeSpan::Columns { first, last } => format!(
                "{}:{}",
                Coordinate::column_to_letters(first),
                Coordinate::column_to_letters(last)
            ),
            RangeSpan::Rows { first, last } => format!("{}:{}", first + 1, last + 1),
        }
    }

    pub fn to_r1c1_string(&self) -> String {
        match *self {
            RangeSpan::Cells { start, end } if start == end => start.to_r1c1_string(),
            RangeSpan::Cells { start, end } => {
                format!("{}:{}", start.to_r1c1_string(), end.to_r1c1_string())
            }
            RangeSpan::Columns { first, last } if first == last => format!("C{}", first + 1),
            RangeSpan::Columns { first, last } => format!("C{}:C{}", first + 1, last + 1),
            RangeSpan::Rows { first, last } if first == last => format!("R{}", first + 1),
            RangeSpan::Rows { first, last } => format!("R{}:R{}", first + 1, last + 1),
        }
    }
}

/// Range reference with optional sheet
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeReference {
    pub sheet: Option<String>,
    pub span: RangeSpan,
}

impl RangeReference {
    pub fn to_r1c1_string(&self) -> String {
        qualify(self.sheet.as_deref(), self.span.to_r1c1_string())
    }
}

impl fmt::Display for RangeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            qualify(self.sheet.as_deref(), self.span.to_a1_string())
        )
    }
}

/// A resolved function argument
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Cell(CellReference),
    Range(RangeReference),
    Literal(Scalar),
    Call(FunctionCall),
}

impl Argument {
    fn render(&self, r1c1: bool) -> String {
        match self {
            Argument::Cell(r) if r1c1 => r.to_r1c1_string(),
            Argument::Cell(r) => r.to_string(),
            Argument::Range(r) if r1c1 => r.to_r1c1_string(),
            Argument::Range(r) => r.to_string(),
            Argument::Literal(Scalar::Text(s)) => format!("\"{}\"", s.replace('"', "\"\"")),
            Argument::Literal(s) => s.to_string(),
            Argument::Call(call) => call.render(r1c1),
        }
    }
}

/// A function call with resolved arguments
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Function name (lowercase)
    pub name: String,
    pub args: Vec<Argument>,
}

impl FunctionCall {
    pub fn new<S: AsRef<str>>(name: S, args: Vec<Argument>) -> Self {
        Self {
            name: name.as_ref().to_lowercase(),
            args,
        }
    }

    /// A1-style rendering, e.g. `SUM(A1:A3;5)`
    pub fn to_a1_string(&self) -> String {
        self.render(false)
    }

    /// Absolute R1C1-style rendering, e.g. `SUM(R1C1:R3C1;5)`
    pub fn to_r1c1_string(&self) -> String {
        self.render(true)
    }

    fn render(&self, r1c1: bool) -> String {
        let args: Vec<String> = self.args.iter().map(|a| a.render(r1c1)).collect();
        format!("{}({})", self.name.to_uppercase(), args.join(";"))
    }
}

/// A compiled formula
///
/// Holds the raw text it was compiled from, the resolved call tree (the
/// re-evaluable form), its A1 canonical rendering, its R1C1 serialized
/// rendering and the value computed at assignment time. `result` is `None`
/// when the formula names a function that was not yet registered.
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaRecord {
    text: String,
    call: FunctionCall,
    canonical: String,
    serialized: String,
    result: Option<Scalar>,
}

impl FormulaRecord {
    pub fn new<S: Into<String>>(text: S, call: FunctionCall, result: Option<Scalar>) -> Self {
        let canonical = call.to_a1_string();
        let serialized = call.to_r1c1_string();
        Self {
            text: text.into(),
            call,
            canonical,
            serialized,
            result,
        }
    }

    /// Original formula text, including the leading `=`
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn call(&self) -> &FunctionCall {
        &self.call
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Serialized form with absolute R1C1 coordinates
    pub fn serialized(&self) -> &str {
        &self.serialized
    }

    /// Value computed when the formula was assigned
    pub fn result(&self) -> Option<&Scalar> {
        self.result.as_ref()
    }
}

fn qualify(sheet: Option<&str>, body: String) -> String {
    match sheet {
        Some(sheet) => format!("{}!{}", sheet, body),
        None => body,
    }
}
