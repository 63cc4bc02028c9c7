//! Formula evaluator
//!
//! Evaluates stored cell values and compiled calls against a workbook.
//! Nothing is cached: every read dereferences cells and ranges afresh.

use crate::error::{FormulaError, FormulaResult};
use crate::functions::FunctionRegistry;
use sylk_sheets_core::{
    Argument, Cell, CellValue, Coordinate, FunctionCall, Range, RangeReference, Scalar, Workbook,
    Worksheet,
};

/// Maximum number of nested cell dereferences before evaluation gives up
pub const MAX_DEPTH: usize = 256;

/// Context for formula evaluation
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// Workbook for cross-sheet lookups
    pub workbook: &'a Workbook,
    /// Function registry
    pub functions: &'a FunctionRegistry,
    /// Sheet that unqualified references point into
    pub worksheet: &'a Worksheet,
    depth: usize,
}

impl<'a> EvaluationContext<'a> {
    /// Create a new evaluation context
    pub fn new(
        workbook: &'a Workbook,
        functions: &'a FunctionRegistry,
        worksheet: &'a Worksheet,
    ) -> Self {
        Self {
            workbook,
            functions,
            worksheet,
            depth: 0,
        }
    }

    /// Context one dereference deeper, switched to `sheet` if given
    pub fn on_sheet(&self, sheet: Option<&str>) -> FormulaResult<EvaluationContext<'a>> {
        if self.depth >= MAX_DEPTH {
            return Err(FormulaError::CircularReference(format!(
                "'{}'",
                self.worksheet.name()
            )));
        }

        let worksheet = match sheet {
            Some(name) => self.workbook.sheet(name)?,
            None => self.worksheet,
        };

        Ok(EvaluationContext {
            worksheet,
            depth: self.depth + 1,
            ..*self
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Evaluate a cell of `ctx.worksheet`
pub fn evaluate_cell(ctx: &EvaluationContext<'_>, cell: &Cell) -> FormulaResult<Scalar> {
    match cell.value() {
        CellValue::Literal(value) => Ok(value.clone()),
        CellValue::RelativeRef(offset) => {
            let here = ctx.worksheet.locate(cell.id())?;
            let target = here.apply(*offset)?;
            value_at(&ctx.on_sheet(None)?, target)
        }
        CellValue::AbsoluteRef(reference) => {
            value_at(&ctx.on_sheet(reference.sheet.as_deref())?, reference.coord)
        }
        CellValue::Formula(record) => evaluate_call(ctx, record.call()),
    }
}

/// Value at a coordinate of `ctx.worksheet`; blank where no cell exists
pub fn value_at(ctx: &EvaluationContext<'_>, coord: Coordinate) -> FormulaResult<Scalar> {
    match ctx.worksheet.cell_at(coord.row, coord.col) {
        Some(cell) => evaluate_cell(ctx, cell),
        None => Ok(Scalar::Blank),
    }
}

/// Evaluate every cell of a range reference
///
/// Column ranges cover the rows the sheet has, row ranges cover its widest
/// row.
pub fn range_values(ctx: &EvaluationContext<'_>, reference: &RangeReference) -> FormulaResult<Range> {
    let ctx = ctx.on_sheet(reference.sheet.as_deref())?;
    let sheet = ctx.worksheet;
    let (start, height, width) = reference.span.block(sheet.row_count(), sheet.width());

    let mut values = Vec::with_capacity(height as usize * width as usize);
    for row in start.row..start.row + height {
        for col in start.col..start.col + width {
            values.push(value_at(&ctx, Coordinate::new(row, col))?);
        }
    }

    Ok(Range::new(start, height, width, values)?)
}

/// Evaluate a compiled call
///
/// Arguments are flattened into one scalar list: ranges contribute their
/// values in row-major order, nested calls contribute their result.
pub fn evaluate_call(ctx: &EvaluationContext<'_>, call: &FunctionCall) -> FormulaResult<Scalar> {
    let implementation = ctx.functions.resolve(&call.name)?;

    let mut args = Vec::with_capacity(call.args.len());
    for arg in &call.args {
        match arg {
            Argument::Cell(reference) => args.push(value_at(
                &ctx.on_sheet(reference.sheet.as_deref())?,
                reference.coord,
            )?),
            Argument::Range(reference) => args.extend(range_values(ctx, reference)?.into_values()),
            Argument::Literal(value) => args.push(value.clone()),
            Argument::Call(inner) => args.push(evaluate_call(ctx, inner)?),
        }
    }

    log::trace!("calling {} with {} arguments", call.name, args.len());
    implementation(&args)
}
