//! Formula compiler
//!
//! Compiles formula text written into a cell into the value the cell
//! stores. A bare address becomes a reference; a call is bound against the
//! function registry, its arguments resolved, and the result evaluated once
//! so it can be kept alongside the compiled form.

use sylk_sheets_core::{
    Argument, CellValue, Coordinate, FormulaRecord, FunctionCall, Scalar, Workbook,
};

use crate::ast::FormulaExpr;
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::{evaluate_call, EvaluationContext};
use crate::functions::FunctionRegistry;
use crate::parser::parse_formula;
use crate::resolver::{Reference, ReferenceResolver};

/// Compile `text` as written into `at` on `sheet`
///
/// Every failure is reported as [`FormulaError::Syntax`] carrying the raw
/// text, except a function name that is not registered yet: that formula is
/// kept with no result and fails on evaluation until the name is
/// registered.
pub fn compile(
    text: &str,
    workbook: &Workbook,
    functions: &mut FunctionRegistry,
    sheet: &str,
    at: Coordinate,
) -> FormulaResult<CellValue> {
    log::debug!("compiling '{}' at {}!{}", text, sheet, at);

    let expr = parse_formula(text)?;
    let resolver = ReferenceResolver::new(sheet);

    match expr {
        FormulaExpr::Operand(address) => {
            let target = match resolver.parse_reference(&address) {
                Ok(Reference::Cell(target)) => target,
                Ok(Reference::Range(_)) => {
                    return Err(FormulaError::syntax(
                        text,
                        "a reference outside a function must name a single cell",
                    ))
                }
                Err(e) => return Err(FormulaError::syntax(text, e)),
            };

            let value = resolver.reference_value(&target, at);
            if let CellValue::AbsoluteRef(reference) = &value {
                if let Some(name) = reference.sheet.as_deref() {
                    workbook
                        .sheet(name)
                        .map_err(|e| FormulaError::syntax(text, e))?;
                }
            }
            Ok(value)
        }
        FormulaExpr::Quoted(_) => Err(FormulaError::syntax(
            text,
            "expected a function call or a cell reference",
        )),
        FormulaExpr::Call { name, args } => {
            let call = build_call(&resolver, functions, &name, args);
            let worksheet = workbook
                .sheet(sheet)
                .map_err(|e| FormulaError::syntax(text, e))?;
            let ctx = EvaluationContext::new(workbook, functions, worksheet);

            let result = match evaluate_call(&ctx, &call) {
                Ok(value) => Some(value),
                Err(FormulaError::UnknownFunction(name)) => {
                    log::warn!(
                        "formula '{}' at {}!{} calls unregistered function '{}'",
                        text,
                        sheet,
                        at,
                        name
                    );
                    None
                }
                Err(e) => return Err(FormulaError::syntax(text, e)),
            };

            Ok(CellValue::Formula(Box::new(FormulaRecord::new(
                text.trim(),
                call,
                result,
            ))))
        }
    }
}

fn build_call(
    resolver: &ReferenceResolver<'_>,
    functions: &mut FunctionRegistry,
    name: &str,
    args: Vec<FormulaExpr>,
) -> FunctionCall {
    functions.bind(name);

    let mut resolved = Vec::with_capacity(args.len());
    for arg in args {
        resolved.push(match arg {
            FormulaExpr::Call { name, args } => {
                Argument::Call(build_call(resolver, functions, &name, args))
            }
            FormulaExpr::Operand(text) => resolver.resolve_argument(&text),
            FormulaExpr::Quoted(text) => Argument::Literal(Scalar::Text(text)),
        });
    }

    FunctionCall::new(name, resolved)
}
