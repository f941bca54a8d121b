//! Math and aggregate functions

use sheetplot_core::CellError;

use super::flatten;
use crate::evaluator::FormulaValue;

/// Numbers an aggregate sees: range members must be numbers, direct
/// arguments are coerced and fail with `#VALUE!` when they cannot be
fn numbers(args: &[FormulaValue]) -> Result<Vec<f64>, CellError> {
    let mut out = Vec::new();
    for (value, from_range) in flatten(args) {
        match value {
            FormulaValue::Error(e) => return Err(*e),
            FormulaValue::Number(n) => out.push(*n),
            _ if from_range => {}
            FormulaValue::Empty => {}
            other => out.push(other.to_number()?),
        }
    }
    Ok(out)
}

fn aggregate(args: &[FormulaValue], f: impl FnOnce(Vec<f64>) -> FormulaValue) -> FormulaValue {
    match numbers(args) {
        Ok(values) => f(values),
        Err(e) => FormulaValue::Error(e),
    }
}

/// SUM(number1, ...)
pub fn fn_sum(args: &[FormulaValue]) -> FormulaValue {
    aggregate(args, |v| FormulaValue::Number(v.iter().sum()))
}

/// AVERAGE(number1, ...)
pub fn fn_average(args: &[FormulaValue]) -> FormulaValue {
    aggregate(args, |v| {
        if v.is_empty() {
            FormulaValue::Error(CellError::Div0)
        } else {
            FormulaValue::Number(v.iter().sum::<f64>() / v.len() as f64)
        }
    })
}

/// MIN(number1, ...); 0 when there are no numbers
pub fn fn_min(args: &[FormulaValue]) -> FormulaValue {
    aggregate(args, |v| {
        FormulaValue::Number(v.into_iter().reduce(f64::min).unwrap_or(0.0))
    })
}

/// MAX(number1, ...); 0 when there are no numbers
pub fn fn_max(args: &[FormulaValue]) -> FormulaValue {
    aggregate(args, |v| {
        FormulaValue::Number(v.into_iter().reduce(f64::max).unwrap_or(0.0))
    })
}

/// COUNT(value1, ...): numbers, plus direct arguments that coerce to one
pub fn fn_count(args: &[FormulaValue]) -> FormulaValue {
    let count = flatten(args)
        .into_iter()
        .filter(|(value, from_range)| match value {
            FormulaValue::Number(_) => true,
            FormulaValue::Boolean(_) | FormulaValue::String(_) if !from_range => {
                value.to_number().is_ok()
            }
            _ => false,
        })
        .count();
    FormulaValue::Number(count as f64)
}

/// COUNTA(value1, ...): every non-blank value, errors included
pub fn fn_counta(args: &[FormulaValue]) -> FormulaValue {
    let count = flatten(args)
        .into_iter()
        .filter(|(value, _)| !matches!(value, FormulaValue::Empty))
        .count();
    FormulaValue::Number(count as f64)
}

/// ABS(number)
pub fn fn_abs(args: &[FormulaValue]) -> FormulaValue {
    match args[0].to_number() {
        Ok(n) => FormulaValue::Number(n.abs()),
        Err(e) => FormulaValue::Error(e),
    }
}

/// ROUND(number, digits), half away from zero; negative digits round left
/// of the decimal point
pub fn fn_round(args: &[FormulaValue]) -> FormulaValue {
    let (n, digits) = match (args[0].to_number(), args[1].to_number()) {
        (Ok(n), Ok(d)) => (n, d.trunc() as i32),
        (Err(e), _) | (_, Err(e)) => return FormulaValue::Error(e),
    };
    let factor = 10f64.powi(digits);
    let scaled = n * factor;
    // nudge past representation error so 2.345 rounds like the decimal it was typed as
    let scaled = scaled + scaled.signum() * scaled.abs() * f64::EPSILON * 4.0;
    let rounded = scaled.round() / factor;
    if rounded.is_finite() {
        FormulaValue::Number(rounded)
    } else {
        FormulaValue::Number(n)
    }
}
