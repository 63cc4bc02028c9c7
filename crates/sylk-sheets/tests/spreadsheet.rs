//! Tests for assignment, references and evaluation through the public API

use pretty_assertions::assert_eq;
use sylk_sheets::prelude::*;
use sylk_sheets::Offset;

fn num(n: f64) -> Scalar {
    Scalar::Number(n)
}

/// A formula naming a single cell reads through to it
#[test]
fn test_bare_reference_formula() {
    let mut book = Spreadsheet::new();
    book.set("Sheet1", "A1", 5).unwrap();
    book.set("Sheet1", "B1", "=A1").unwrap();

    assert_eq!(book.get("Sheet1", "B1").unwrap(), num(5.0));
    assert_eq!(
        book.cell("Sheet1", "B1").unwrap().unwrap().value(),
        &CellValue::RelativeRef(Offset::new(0, -1))
    );

    // Later edits to the target show up on the next read
    book.set("Sheet1", "A1", 7).unwrap();
    assert_eq!(book.get("Sheet1", "B1").unwrap(), num(7.0));
}

/// SUM over a cell range
#[test]
fn test_sum_formula() {
    let mut book = Spreadsheet::new();
    for (i, n) in [1, 2, 3].into_iter().enumerate() {
        book.set_at("Sheet1", Coordinate::new(i as u32, 0), n).unwrap();
    }
    book.set("Sheet1", "A4", "=SUM(A1:A3)").unwrap();

    assert_eq!(book.get("Sheet1", "A4").unwrap(), num(6.0));

    let record = book.cell("Sheet1", "A4").unwrap().unwrap().value().as_formula().unwrap().clone();
    assert_eq!(record.canonical(), "SUM(A1:A3)");
    assert_eq!(record.serialized(), "SUM(R1C1:R3C1)");
    assert_eq!(record.result(), Some(&num(6.0)));

    // Values are recomputed on read
    book.set("Sheet1", "A2", 12).unwrap();
    assert_eq!(book.get("Sheet1", "A4").unwrap(), num(16.0));
}

/// Aggregates, nested calls and quoted text
#[test]
fn test_default_functions() {
    let mut book = Spreadsheet::new();
    book.append_row("Sheet1", vec![CellInput::from(4), "8".into(), "n/a".into(), CellInput::Blank])
        .unwrap();

    let cases = [
        ("=AVERAGE(1:1)", num(6.0)),
        ("=min(A1:D1)", num(4.0)),
        ("=Max(1:1)", num(8.0)),
        ("=COUNT(A1:D1)", num(3.0)),
        ("=SUM(A1;MAX(A1:B1);0.5)", num(12.5)),
        ("=COUNT(\"A1\";\"\")", num(1.0)),
    ];
    for (formula, expected) in cases {
        book.set("Sheet1", "A5", formula).unwrap();
        assert_eq!(book.get("Sheet1", "A5").unwrap(), expected, "{}", formula);
    }
}

/// Range query agrees with direct indexing, in row-major order
#[test]
fn test_range_matches_indexing() {
    let mut book = Spreadsheet::new();
    book.add_sheet(Some("Grid"), vec![vec![1, 2], vec![3, 4]])
        .unwrap();

    let range = book.range("Grid", "A1:B2").unwrap();
    let direct: Vec<Scalar> = [(0, 0), (0, 1), (1, 0), (1, 1)]
        .into_iter()
        .map(|(r, c)| book.get_at("Grid", Coordinate::new(r, c)).unwrap())
        .collect();

    assert_eq!(range.values(), direct.as_slice());
    assert_eq!(range.height(), 2);
    assert_eq!(range.width(), 2);
}

/// Column range returns its columns in order
#[test]
fn test_column_range() {
    let mut book = Spreadsheet::new();
    book.add_sheet(
        Some("Grid"),
        vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8]],
    )
    .unwrap();

    let columns = book.range("Grid", "A:C").unwrap().columns();
    assert_eq!(
        columns,
        vec![
            vec![num(1.0), num(5.0)],
            vec![num(2.0), num(6.0)],
            vec![num(3.0), num(7.0)],
        ]
    );

    let rows = book.range("Grid", "2:2").unwrap();
    assert_eq!(rows.values(), &[num(5.0), num(6.0), num(7.0), num(8.0)]);
}

/// Cross-sheet references stay absolute
#[test]
fn test_cross_sheet_reference() {
    let mut book = Spreadsheet::new();
    book.add_sheet(Some("Sheet2"), Vec::<Vec<f64>>::new()).unwrap();
    book.set("Sheet1", "A1", 9).unwrap();
    book.set("Sheet2", "B1", "=Sheet1!A1").unwrap();
    book.set("Sheet2", "B2", "=SUM(Sheet1!A:A;B1)").unwrap();

    assert_eq!(book.get("Sheet2", "B1").unwrap(), num(9.0));
    assert_eq!(book.get("Sheet2", "B2").unwrap(), num(18.0));
    assert_eq!(
        book.cell("Sheet2", "B1").unwrap().unwrap().value(),
        &CellValue::AbsoluteRef(CellReference::on_sheet("Sheet1", Coordinate::new(0, 0)))
    );

    // Once the sheet is gone the reference fails
    book.remove_sheet("Sheet1").unwrap();
    assert!(matches!(book.get("Sheet2", "B1"), Err(Error::SheetNotFound(_))));
}

/// Assigning a cell reference directly
#[test]
fn test_direct_reference_assignment() {
    let mut book = Spreadsheet::new();
    book.set("Sheet1", "A1", "hello").unwrap();
    book.set("Sheet1", "C3", CellReference::local(Coordinate::new(0, 0)))
        .unwrap();

    assert_eq!(book.get("Sheet1", "C3").unwrap(), Scalar::text("hello"));
    assert_eq!(
        book.cell("Sheet1", "C3").unwrap().unwrap().value(),
        &CellValue::RelativeRef(Offset::new(-2, -2))
    );
}

/// Slice assignment checks shape
#[test]
fn test_slice_assignment() {
    let mut book = Spreadsheet::new();

    let ids = book.set_slice("Sheet1", 0, 1..=2, vec![10, 20]).unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(book.get("Sheet1", "C1").unwrap(), num(20.0));

    assert!(matches!(
        book.set_slice("Sheet1", 0, 0..=1, vec![1, 2, 3]),
        Err(Error::LengthMismatch {
            expected: 2,
            actual: 3
        })
    ));
    assert!(matches!(
        book.set_slice("Sheet1", 0, 0..=1, 5),
        Err(Error::TypeMismatch { .. })
    ));

    // A rejected element leaves the whole slice unassigned
    assert!(book
        .set_slice("Sheet1", 1, 0..=1, vec!["=A1", "=SUM(A1"])
        .is_err());
    assert_eq!(book.get("Sheet1", "A2").unwrap(), Scalar::Blank);
}

/// A plain value is not a slice and a list is not a cell value
#[test]
fn test_list_into_single_cell() {
    let mut book = Spreadsheet::new();
    assert!(matches!(
        book.set("Sheet1", "A1", vec![1, 2]),
        Err(Error::TypeMismatch { .. })
    ));
}

/// Errors carry the formula text
#[test]
fn test_formula_syntax_errors() {
    let mut book = Spreadsheet::new();
    for bad in ["=SUM(A1", "=A1:B2", "=Nowhere!A1", "=SUM(Nowhere!A1)"] {
        match book.set("Sheet1", "B1", bad) {
            Err(Error::FormulaSyntax { text, .. }) => assert_eq!(text, bad),
            other => panic!("expected a syntax error for {}, got {:?}", bad, other),
        }
    }
    assert!(matches!(
        book.set("Sheet1", "ZZZZ1", 1),
        Err(Error::InvalidAddress(_))
    ));
}

fn fn_double(args: &[Scalar]) -> sylk_sheets::FormulaResult<Scalar> {
    Ok(Scalar::Number(
        args.iter().filter_map(Scalar::as_number).sum::<f64>() * 2.0,
    ))
}

/// Functions can be registered after formulas that use them
#[test]
fn test_lazy_function_binding() {
    let mut book = Spreadsheet::new();
    book.set("Sheet1", "A1", 4).unwrap();
    book.set("Sheet1", "B1", "=DOUBLE(A1)").unwrap();

    let record = book.cell("Sheet1", "B1").unwrap().unwrap().value().as_formula().unwrap().clone();
    assert_eq!(record.result(), None);
    assert!(matches!(
        book.get("Sheet1", "B1"),
        Err(Error::UnknownFunction(name)) if name == "double"
    ));

    book.register_function("double", fn_double);
    assert_eq!(book.get("Sheet1", "B1").unwrap(), num(8.0));
}

/// Reference cycles are reported instead of overflowing the stack
#[test]
fn test_circular_reference() {
    let mut book = Spreadsheet::new();
    book.set("Sheet1", "A1", "=B1").unwrap();
    book.set("Sheet1", "B1", "=SUM(A1)").unwrap();

    assert!(matches!(
        book.get("Sheet1", "A1"),
        Err(Error::CircularReference(_))
    ));
}

/// Runaway call nesting is rejected as a syntax error
#[test]
fn test_deeply_nested_formula() {
    let mut book = Spreadsheet::new();
    let text = format!("={}", "a(".repeat(100_000));

    assert!(matches!(
        book.set("Sheet1", "A1", text.as_str()),
        Err(Error::FormulaSyntax { .. })
    ));
    assert!(book.cell("Sheet1", "A1").unwrap().is_none());
}

/// Duplicate sheet names are rejected
#[test]
fn test_duplicate_sheet_name() {
    let mut book = Spreadsheet::new();
    assert!(matches!(
        book.add_sheet(Some("sheet1"), Vec::<Vec<f64>>::new()),
        Err(Error::DuplicateSheetName(_))
    ));
    assert!(matches!(
        book.add_sheet(Some("a:b"), Vec::<Vec<f64>>::new()),
        Err(Error::InvalidSheetName(_))
    ));
}
