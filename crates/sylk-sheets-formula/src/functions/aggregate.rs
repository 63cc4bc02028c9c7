//! Aggregate functions: SUM, AVERAGE, MIN, MAX, COUNT
//!
//! Numbers and numeric text take part; blanks and other text are skipped.

use crate::error::{FormulaError, FormulaResult};
use sylk_sheets_core::Scalar;

fn numbers(args: &[Scalar]) -> impl Iterator<Item = f64> + '_ {
    args.iter().filter_map(Scalar::as_number)
}

fn non_empty(name: &str, values: Vec<f64>) -> FormulaResult<Vec<f64>> {
    if values.is_empty() {
        Err(FormulaError::Evaluation(format!(
            "{} requires at least one number",
            name.to_uppercase()
        )))
    } else {
        Ok(values)
    }
}

/// SUM function
pub fn fn_sum(args: &[Scalar]) -> FormulaResult<Scalar> {
    Ok(Scalar::Number(numbers(args).sum()))
}

/// AVERAGE function
pub fn fn_average(args: &[Scalar]) -> FormulaResult<Scalar> {
    let values = non_empty("average", numbers(args).collect())?;
    Ok(Scalar::Number(
        values.iter().sum::<f64>() / values.len() as f64,
    ))
}

/// MIN function
pub fn fn_min(args: &[Scalar]) -> FormulaResult<Scalar> {
    let values = non_empty("min", numbers(args).collect())?;
    Ok(Scalar::Number(
        values.into_iter().fold(f64::INFINITY, f64::min),
    ))
}

/// MAX function
pub fn fn_max(args: &[Scalar]) -> FormulaResult<Scalar> {
    let values = non_empty("max", numbers(args).collect())?;
    Ok(Scalar::Number(
        values.into_iter().fold(f64::NEG_INFINITY, f64::max),
    ))
}

/// COUNT function: number of non-blank values
pub fn fn_count(args: &[Scalar]) -> FormulaResult<Scalar> {
    Ok(Scalar::Number(
        args.iter().filter(|v| !v.is_blank()).count() as f64,
    ))
}
