//! The spreadsheet: a workbook together with its function registry
//!
//! Every assignment goes through the same path: the value is classified
//! (literal, reference or formula), compiled against the workbook as it is
//! at that moment, and stored as a fresh cell. Reads evaluate the stored
//! value against the cell's current position.

use std::ops::RangeInclusive;
use std::path::Path;

use sylk_sheets_core::{
    Cell, CellId, Coordinate, Error, Group, Range, RangeReference, RangeSpan, Result, Row, Scalar,
    Workbook, Worksheet, MAX_COLS, MAX_ROWS,
};
use sylk_sheets_formula::{
    classify, range_values, value_at, CellInput, EvaluationContext, FunctionImpl,
    FunctionRegistry, Reference, ReferenceResolver,
};
use sylk_sheets_slk::{SlkWriteOptions, SlkWriter};

/// An in-memory spreadsheet
///
/// # Example
///
/// ```rust
/// use sylk_sheets::{Scalar, Spreadsheet};
///
/// let mut book = Spreadsheet::new();
/// book.set("Sheet1", "A1", 5).unwrap();
/// book.set("Sheet1", "B1", "=A1").unwrap();
///
/// assert_eq!(book.get("Sheet1", "B1").unwrap(), Scalar::Number(5.0));
/// ```
#[derive(Debug)]
pub struct Spreadsheet {
    workbook: Workbook,
    functions: FunctionRegistry,
}

impl Spreadsheet {
    /// Create a spreadsheet with one empty sheet, `Sheet1`, and the default
    /// functions
    pub fn new() -> Self {
        Self::from_parts(Workbook::new(), FunctionRegistry::new())
    }

    /// Create a spreadsheet with no sheets
    pub fn empty() -> Self {
        Self::from_parts(Workbook::empty(), FunctionRegistry::new())
    }

    pub fn from_parts(workbook: Workbook, functions: FunctionRegistry) -> Self {
        Self {
            workbook,
            functions,
        }
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn functions_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.functions
    }

    /// Register (or replace) a named function
    pub fn register_function(&mut self, name: &str, implementation: FunctionImpl) {
        self.functions.register(name, implementation);
    }

    pub fn into_parts(self) -> (Workbook, FunctionRegistry) {
        (self.workbook, self.functions)
    }

    // === Sheets ===

    /// Add a sheet, optionally named, filled with `rows`
    ///
    /// Without a name the sheet is called `SheetN`. Each row is assigned
    /// like [`Spreadsheet::append_row`]. If any value fails to assign, the
    /// sheet is removed again and the error returned. Returns the sheet
    /// name.
    pub fn add_sheet<I, R, V>(&mut self, name: Option<&str>, rows: I) -> Result<String>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = V>,
        V: Into<CellInput>,
    {
        let index = match name {
            Some(name) => self.workbook.add_worksheet_with_name(name)?,
            None => self.workbook.add_worksheet()?,
        };
        let name = self
            .workbook
            .worksheet(index)
            .map(|ws| ws.name().to_string())
            .ok_or_else(|| Error::other(format!("sheet {} vanished after creation", index)))?;

        for (r, row) in rows.into_iter().enumerate() {
            let inputs = row.into_iter().map(Into::into).collect();
            if let Err(e) = self.assign_row(&name, r as u32, 0, inputs) {
                self.workbook.remove_worksheet(&name)?;
                return Err(e);
            }
        }

        Ok(name)
    }

    /// Remove a sheet; references to it fail from then on
    pub fn remove_sheet(&mut self, name: &str) -> Result<Worksheet> {
        self.workbook.remove_worksheet(name)
    }

    /// Get a sheet by name (case-insensitive)
    pub fn sheet(&self, name: &str) -> Result<&Worksheet> {
        self.workbook.sheet(name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.workbook.worksheets().map(Worksheet::name).collect()
    }

    // === Assignment ===

    /// Assign to a cell by address (`"B2"`)
    ///
    /// Text starting with `=` is compiled as a formula; a
    /// [`CellReference`](sylk_sheets_core::CellReference) is stored as a
    /// reference. The cell is left unchanged if the value is rejected.
    pub fn set<V: Into<CellInput>>(&mut self, sheet: &str, address: &str, value: V) -> Result<CellId> {
        let coord = Coordinate::parse(address)?;
        self.set_at(sheet, coord, value)
    }

    /// Assign to a cell by coordinate
    pub fn set_at<V: Into<CellInput>>(
        &mut self,
        sheet: &str,
        coord: Coordinate,
        value: V,
    ) -> Result<CellId> {
        let name = self.sheet_name(sheet)?;
        let value = classify(
            &self.workbook,
            &mut self.functions,
            &name,
            coord,
            value.into(),
        )?;
        self.workbook.sheet_mut(&name)?.store(coord, value)
    }

    /// Assign a sequence to columns `cols` (inclusive) of `row`
    ///
    /// Fails with [`Error::LengthMismatch`] unless the sequence has exactly
    /// one value per column, and with [`Error::TypeMismatch`] for a value
    /// that is not a sequence. Values are stored left to right, so a formula
    /// may refer to an earlier value of the same sequence. Nothing is kept
    /// unless every value is accepted.
    pub fn set_slice<V: Into<CellInput>>(
        &mut self,
        sheet: &str,
        row: u32,
        cols: RangeInclusive<u32>,
        value: V,
    ) -> Result<Vec<CellId>> {
        let items = match value.into() {
            CellInput::List(items) => items,
            other => {
                return Err(Error::TypeMismatch {
                    expected: "list",
                    actual: other.type_name(),
                })
            }
        };

        let span = if cols.is_empty() {
            0
        } else {
            (cols.end() - cols.start()) as usize + 1
        };
        if items.len() != span {
            return Err(Error::LengthMismatch {
                expected: span,
                actual: items.len(),
            });
        }

        self.assign_row(sheet, row, *cols.start(), items)
    }

    /// Append a row after the last one; returns its index
    pub fn append_row<I, V>(&mut self, sheet: &str, values: I) -> Result<u32>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellInput>,
    {
        let row = self.sheet(sheet)?.row_count();
        let inputs = values.into_iter().map(Into::into).collect();
        self.assign_row(sheet, row, 0, inputs)?;
        Ok(row)
    }

    // === Reading ===

    /// Evaluated value of a cell by address
    pub fn get(&self, sheet: &str, address: &str) -> Result<Scalar> {
        self.get_at(sheet, Coordinate::parse(address)?)
    }

    /// Evaluated value of a cell by coordinate; blank where no cell exists
    pub fn get_at(&self, sheet: &str, coord: Coordinate) -> Result<Scalar> {
        let ctx = self.context(sheet)?;
        Ok(value_at(&ctx, coord)?)
    }

    /// The stored cell at an address, if any
    pub fn cell(&self, sheet: &str, address: &str) -> Result<Option<&Cell>> {
        self.sheet(sheet)?.cell(address)
    }

    /// Evaluated values of a range such as `A1:B2`, `A:C`, `2:3` or
    /// `Data!A1:A3`
    pub fn range(&self, sheet: &str, text: &str) -> Result<Range> {
        let ctx = self.context(sheet)?;
        let reference = match ReferenceResolver::new(ctx.worksheet.name()).parse_reference(text)? {
            Reference::Cell(r) => RangeReference {
                sheet: r.sheet,
                span: RangeSpan::cells(r.coord, r.coord),
            },
            Reference::Range(r) => r,
        };
        Ok(range_values(&ctx, &reference)?)
    }

    /// Whole columns `span` (inclusive) of a sheet
    pub fn columns(&self, sheet: &str, span: RangeInclusive<u32>) -> Result<Group<'_>> {
        Ok(self.sheet(sheet)?.column_group(span))
    }

    /// Whole rows `span` (inclusive) of a sheet
    pub fn rows(&self, sheet: &str, span: RangeInclusive<u32>) -> Result<Group<'_>> {
        Ok(self.sheet(sheet)?.row_group(span))
    }

    // === Structure ===

    /// Insert an empty row before `at`; fails once the sheet is full
    pub fn insert_row(&mut self, sheet: &str, at: u32) -> Result<()> {
        self.workbook.sheet_mut(sheet)?.insert_row(at)
    }

    /// Remove row `at`, if it exists
    pub fn remove_row(&mut self, sheet: &str, at: u32) -> Result<Option<Row>> {
        Ok(self.workbook.sheet_mut(sheet)?.remove_row(at))
    }

    /// Copy the stored value of one cell into another
    ///
    /// A copied relative reference points at the same offset from its new
    /// position. References to the source cell are not updated.
    pub fn copy_cell(&mut self, sheet: &str, from: &str, to: &str) -> Result<CellId> {
        let from = Coordinate::parse(from)?;
        let to = Coordinate::parse(to)?;
        self.workbook.sheet_mut(sheet)?.copy_cell(from, to)
    }

    // === SYLK ===

    /// Render a sheet as a SYLK document
    pub fn to_sylk(&self, sheet: &str) -> Result<String> {
        self.to_sylk_with(sheet, &SlkWriteOptions::default())
    }

    pub fn to_sylk_with(&self, sheet: &str, options: &SlkWriteOptions) -> Result<String> {
        Ok(SlkWriter::to_string(self.sheet(sheet)?, options)?)
    }

    /// Write a sheet to a `.slk` file
    pub fn save_sylk<P: AsRef<Path>>(&self, sheet: &str, path: P) -> Result<()> {
        SlkWriter::write_file(self.sheet(sheet)?, path, &SlkWriteOptions::default())?;
        Ok(())
    }

    fn sheet_name(&self, sheet: &str) -> Result<String> {
        Ok(self.sheet(sheet)?.name().to_string())
    }

    fn context(&self, sheet: &str) -> Result<EvaluationContext<'_>> {
        Ok(EvaluationContext::new(
            &self.workbook,
            &self.functions,
            self.sheet(sheet)?,
        ))
    }

    /// Assign `inputs` one by one from `first_col` along `row`
    ///
    /// Each value is compiled after the ones before it are stored, so a
    /// formula can use an earlier value of the same row. If any value fails
    /// the row is put back as it was.
    fn assign_row(
        &mut self,
        sheet: &str,
        row: u32,
        first_col: u32,
        inputs: Vec<CellInput>,
    ) -> Result<Vec<CellId>> {
        let name = self.sheet_name(sheet)?;
        if row >= MAX_ROWS || first_col as usize + inputs.len() > MAX_COLS as usize {
            return Err(Error::InvalidAddress(format!(
                "row {} columns {}..{} fall outside the grid",
                row,
                first_col,
                first_col as usize + inputs.len()
            )));
        }

        log::debug!(
            "assigning {} cells to row {} of '{}'",
            inputs.len(),
            row + 1,
            name
        );
        let snapshot = self.workbook.sheet(&name)?.snapshot_row(row);
        let mut ids = Vec::with_capacity(inputs.len());
        for (i, input) in inputs.into_iter().enumerate() {
            let coord = Coordinate::new(row, first_col + i as u32);
            match self.set_at(&name, coord, input) {
                Ok(id) => ids.push(id),
                Err(e) => {
                    log::debug!("rolling back row {} of '{}': {}", row + 1, name, e);
                    self.workbook.sheet_mut(&name)?.restore_row(snapshot);
                    return Err(e);
                }
            }
        }
        Ok(ids)
    }
}

impl Default for Spreadsheet {
    fn default() -> Self {
        Self::new()
    }
}
