//! Reference resolution
//!
//! Turns address text into cell or range references, and classifies values
//! being assigned to a cell into what the cell stores: a literal, a
//! relative offset, an absolute cross-sheet reference or a compiled formula.
//!
//! Address text is matched against three grammars, in order:
//!
//! 1. `LETTERS DIGITS (":" LETTERS DIGITS)?`: a cell or cell range
//! 2. `LETTERS (":" LETTERS)?`: a column or column range
//! 3. `DIGITS (":" DIGITS)?`: a row or row range
//!
//! Each may carry a `SHEET!` prefix. Matching ignores case.

use lazy_regex::regex;
use sylk_sheets_core::{
    Argument, CellReference, CellValue, Coordinate, Error, RangeReference, RangeSpan, Result,
    Scalar, Workbook,
};

use crate::compiler::compile;
use crate::error::FormulaResult;
use crate::functions::FunctionRegistry;

/// A parsed reference
#[derive(Debug, Clone, PartialEq)]
pub enum Reference {
    /// Single cell, `A1`
    Cell(CellReference),
    /// Cell block, whole columns or whole rows
    Range(RangeReference),
}

/// Resolves address text written on a given sheet
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver<'a> {
    sheet: &'a str,
}

impl<'a> ReferenceResolver<'a> {
    /// Create a resolver for text written on `sheet`
    pub fn new(sheet: &'a str) -> Self {
        Self { sheet }
    }

    /// Parse reference text such as `B2`, `a1:b3`, `A:C`, `5:10` or `Data!A1`
    ///
    /// A qualifier naming the current sheet is dropped, so the result is a
    /// local reference.
    ///
    /// # Example
    /// ```rust
    /// use sylk_sheets_core::{Coordinate, RangeSpan};
    /// use sylk_sheets_formula::{Reference, ReferenceResolver};
    ///
    /// let resolver = ReferenceResolver::new("Sheet1");
    /// match resolver.parse_reference("A:C").unwrap() {
    ///     Reference::Range(r) => assert_eq!(r.span, RangeSpan::columns(0, 2)),
    ///     other => panic!("unexpected {:?}", other),
    /// }
    /// ```
    pub fn parse_reference(&self, text: &str) -> Result<Reference> {
        let text = text.trim();

        if let Some(caps) = regex!(
            r"(?i)^(?:(?P<sheet>[^!]+)!)?(?P<c1>[a-z]+)(?P<r1>\d+)(?::(?P<c2>[a-z]+)(?P<r2>\d+))?$"
        )
        .captures(text)
        {
            let sheet = self.qualifier(caps.name("sheet").map(|m| m.as_str()));
            let start = Coordinate::new(
                Coordinate::parse_row_number(&caps["r1"])?,
                Coordinate::letters_to_column(&caps["c1"])?,
            );
            return match (caps.name("c2"), caps.name("r2")) {
                (Some(c2), Some(r2)) => {
                    let end = Coordinate::new(
                        Coordinate::parse_row_number(r2.as_str())?,
                        Coordinate::letters_to_column(c2.as_str())?,
                    );
                    Ok(Reference::Range(RangeReference {
                        sheet,
                        span: RangeSpan::cells(start, end),
                    }))
                }
                _ => Ok(Reference::Cell(CellReference {
                    sheet,
                    coord: start,
                })),
            };
        }

        if let Some(caps) =
            regex!(r"(?i)^(?:(?P<sheet>[^!]+)!)?(?P<first>[a-z]+)(?::(?P<last>[a-z]+))?$")
                .captures(text)
        {
            let first = Coordinate::letters_to_column(&caps["first"])?;
            let last = match caps.name("last") {
                Some(m) => Coordinate::letters_to_column(m.as_str())?,
                None => first,
            };
            return Ok(Reference::Range(RangeReference {
                sheet: self.qualifier(caps.name("sheet").map(|m| m.as_str())),
                span: RangeSpan::columns(first, last),
            }));
        }

        if let Some(caps) =
            regex!(r"^(?:(?P<sheet>[^!]+)!)?(?P<first>\d+)(?::(?P<last>\d+))?$").captures(text)
        {
            let first = Coordinate::parse_row_number(&caps["first"])?;
            let last = match caps.name("last") {
                Some(m) => Coordinate::parse_row_number(m.as_str())?,
                None => first,
            };
            return Ok(Reference::Range(RangeReference {
                sheet: self.qualifier(caps.name("sheet").map(|m| m.as_str())),
                span: RangeSpan::rows(first, last),
            }));
        }

        Err(Error::InvalidAddress(text.to_string()))
    }

    /// Resolve one formula argument
    ///
    /// Text matching none of the reference grammars becomes a literal: a
    /// number when it parses as one, otherwise text.
    pub fn resolve_argument(&self, text: &str) -> Argument {
        match self.parse_reference(text) {
            Ok(Reference::Cell(r)) => Argument::Cell(r),
            Ok(Reference::Range(r)) => Argument::Range(r),
            Err(_) => {
                let text = text.trim();
                match text.parse::<f64>() {
                    Ok(n) => Argument::Literal(Scalar::Number(n)),
                    Err(_) => Argument::Literal(Scalar::text(text)),
                }
            }
        }
    }

    /// What a cell at `at` stores when it refers to `target`
    ///
    /// Same-sheet targets become an offset from `at`; targets on other
    /// sheets stay absolute.
    pub fn reference_value(&self, target: &CellReference, at: Coordinate) -> CellValue {
        match self.qualifier(target.sheet.as_deref()) {
            None => CellValue::RelativeRef(target.coord.offset_from(at)),
            Some(sheet) => CellValue::AbsoluteRef(CellReference::on_sheet(sheet, target.coord)),
        }
    }

    fn qualifier(&self, sheet: Option<&str>) -> Option<String> {
        let sheet = sheet.map(str::trim)?;
        if sheet.eq_ignore_ascii_case(self.sheet) {
            None
        } else {
            Some(sheet.to_string())
        }
    }
}

/// A value offered for assignment to a cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellInput {
    Blank,
    Number(f64),
    /// Text; a leading `=` makes it a formula
    Text(String),
    /// Another cell
    Reference(CellReference),
    /// A sequence, only valid for slice assignment
    List(Vec<CellInput>),
}

impl CellInput {
    pub fn type_name(&self) -> &'static str {
        match self {
            CellInput::Blank => "blank",
            CellInput::Number(_) => "number",
            CellInput::Text(_) => "text",
            CellInput::Reference(_) => "reference",
            CellInput::List(_) => "list",
        }
    }
}

impl From<f64> for CellInput {
    fn from(n: f64) -> Self {
        CellInput::Number(n)
    }
}

impl From<i32> for CellInput {
    fn from(n: i32) -> Self {
        CellInput::Number(n as f64)
    }
}

impl From<&str> for CellInput {
    fn from(s: &str) -> Self {
        CellInput::Text(s.to_string())
    }
}

impl From<String> for CellInput {
    fn from(s: String) -> Self {
        CellInput::Text(s)
    }
}

impl From<Scalar> for CellInput {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Blank => CellInput::Blank,
            Scalar::Number(n) => CellInput::Number(n),
            Scalar::Text(s) => CellInput::Text(s),
        }
    }
}

impl From<CellReference> for CellInput {
    fn from(r: CellReference) -> Self {
        CellInput::Reference(r)
    }
}

impl<T: Into<CellInput>> From<Vec<T>> for CellInput {
    fn from(items: Vec<T>) -> Self {
        CellInput::List(items.into_iter().map(Into::into).collect())
    }
}

/// Classify a value assigned to `at` on `sheet` into what the cell stores
///
/// Formula text is compiled against the workbook as it is now. Fails with
/// `TypeMismatch` for a [`CellInput::List`], which only slices accept.
pub fn classify(
    workbook: &Workbook,
    functions: &mut FunctionRegistry,
    sheet: &str,
    at: Coordinate,
    input: CellInput,
) -> FormulaResult<CellValue> {
    match input {
        CellInput::Blank => Ok(CellValue::blank()),
        CellInput::Number(n) => Ok(CellValue::Literal(Scalar::Number(n))),
        CellInput::Text(text) if text.trim_start().starts_with('=') => {
            compile(&text, workbook, functions, sheet, at)
        }
        CellInput::Text(text) => Ok(CellValue::Literal(Scalar::Text(text))),
        CellInput::Reference(target) => {
            let resolver = ReferenceResolver::new(sheet);
            let value = resolver.reference_value(&target, at);
            if let CellValue::AbsoluteRef(r) = &value {
                // Validate the target sheet exists
                workbook.sheet(r.sheet.as_deref().unwrap_or(sheet))?;
            }
            Ok(value)
        }
        CellInput::List(_) => Err(Error::TypeMismatch {
            expected: "single value",
            actual: "list",
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sylk_sheets_core::Offset;

    fn at(a1: &str) -> Coordinate {
        Coordinate::parse(a1).unwrap()
    }

    fn resolver() -> ReferenceResolver<'static> {
        ReferenceResolver::new("Sheet1")
    }

    #[test]
    fn test_cell_and_cell_range() {
        assert_eq!(
            resolver().parse_reference("b2").unwrap(),
            Reference::Cell(CellReference::local(at("B2")))
        );
        assert_eq!(
            resolver().parse_reference("B3:A1").unwrap(),
            Reference::Range(RangeReference {
                sheet: None,
                span: RangeSpan::cells(at("A1"), at("B3")),
            })
        );
    }

    #[test]
    fn test_column_and_row_ranges() {
        assert_eq!(
            resolver().parse_reference("a:c").unwrap(),
            Reference::Range(RangeReference {
                sheet: None,
                span: RangeSpan::columns(0, 2),
            })
        );
        assert_eq!(
            resolver().parse_reference("D").unwrap(),
            Reference::Range(RangeReference {
                sheet: None,
                span: RangeSpan::columns(3, 3),
            })
        );
        assert_eq!(
            resolver().parse_reference("5:10").unwrap(),
            Reference::Range(RangeReference {
                sheet: None,
                span: RangeSpan::rows(4, 9),
            })
        );
    }

    #[test]
    fn test_sheet_qualifier() {
        assert_eq!(
            resolver().parse_reference("Data!A1").unwrap(),
            Reference::Cell(CellReference::on_sheet("Data", at("A1")))
        );
        assert_eq!(
            resolver().parse_reference("My Sheet!2:3").unwrap(),
            Reference::Range(RangeReference {
                sheet: Some("My Sheet".into()),
                span: RangeSpan::rows(1, 2),
            })
        );
        // Own sheet name collapses to a local reference
        assert_eq!(
            resolver().parse_reference("sheet1!A1").unwrap(),
            Reference::Cell(CellReference::local(at("A1")))
        );
    }

    #[test]
    fn test_invalid_addresses() {
        for bad in ["", "A1:B", "1A", "A0", "A-1", "!A1", "A1:B2:C3", "1.5"] {
            assert!(
                matches!(
                    resolver().parse_reference(bad),
                    Err(Error::InvalidAddress(_))
                ),
                "{:?} should not parse",
                bad
            );
        }
    }

    #[test]
    fn test_argument_fallback_to_literal() {
        let r = resolver();
        assert_eq!(
            r.resolve_argument(" 2.5 "),
            Argument::Literal(Scalar::Number(2.5))
        );
        assert_eq!(
            r.resolve_argument("hello world"),
            Argument::Literal(Scalar::text("hello world"))
        );
        assert_eq!(
            r.resolve_argument("A1"),
            Argument::Cell(CellReference::local(at("A1")))
        );
    }

    #[test]
    fn test_reference_value() {
        let r = resolver();
        assert_eq!(
            r.reference_value(&CellReference::local(at("A1")), at("B2")),
            CellValue::RelativeRef(Offset::new(-1, -1))
        );
        assert_eq!(
            r.reference_value(&CellReference::on_sheet("Data", at("A1")), at("B2")),
            CellValue::AbsoluteRef(CellReference::on_sheet("Data", at("A1")))
        );
    }

    #[test]
    fn test_classify_literals_and_lists() {
        let workbook = Workbook::new();
        let mut functions = FunctionRegistry::new();
        let mut run = |input: CellInput| classify(&workbook, &mut functions, "Sheet1", at("A1"), input);

        assert_eq!(run(CellInput::from(3)).unwrap(), CellValue::from(3.0));
        assert_eq!(run(CellInput::from("x")).unwrap(), CellValue::from("x"));
        assert_eq!(run(CellInput::Blank).unwrap(), CellValue::blank());
        assert!(run(CellInput::from(vec![1, 2])).is_err());
    }

    #[test]
    fn test_classify_cross_sheet_reference_needs_sheet() {
        let workbook = Workbook::new();
        let mut functions = FunctionRegistry::new();
        let missing = CellInput::from(CellReference::on_sheet("Nope", at("A1")));
        assert!(classify(&workbook, &mut functions, "Sheet1", at("B1"), missing).is_err());
    }
}
