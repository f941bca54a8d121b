//! Logical functions

use sheetplot_core::CellError;

use super::flatten;
use crate::evaluator::FormulaValue;

/// IF(condition, value_if_true, [value_if_false])
pub fn fn_if(args: &[FormulaValue]) -> FormulaValue {
    match args[0].to_bool() {
        Ok(true) => args[1].clone(),
        Ok(false) => args.get(2).cloned().unwrap_or(FormulaValue::Boolean(false)),
        Err(e) => FormulaValue::Error(e),
    }
}

/// IFERROR(value, value_if_error)
pub fn fn_iferror(args: &[FormulaValue]) -> FormulaValue {
    match &args[0] {
        FormulaValue::Error(_) => args[1].clone(),
        value => value.clone(),
    }
}

/// Booleans the logical aggregates see; text and blanks in ranges are skipped
fn logicals(args: &[FormulaValue]) -> Result<Vec<bool>, CellError> {
    let mut out = Vec::new();
    for (value, from_range) in flatten(args) {
        match value {
            FormulaValue::Error(e) => return Err(*e),
            FormulaValue::Empty => {}
            FormulaValue::String(_) if from_range => {}
            other => out.push(other.to_bool()?),
        }
    }
    if out.is_empty() {
        return Err(CellError::Value);
    }
    Ok(out)
}

/// AND(logical1, ...)
pub fn fn_and(args: &[FormulaValue]) -> FormulaValue {
    match logicals(args) {
        Ok(values) => FormulaValue::Boolean(values.iter().all(|b| *b)),
        Err(e) => FormulaValue::Error(e),
    }
}

/// OR(logical1, ...)
pub fn fn_or(args: &[FormulaValue]) -> FormulaValue {
    match logicals(args) {
        Ok(values) => FormulaValue::Boolean(values.iter().any(|b| *b)),
        Err(e) => FormulaValue::Error(e),
    }
}

/// NOT(logical)
pub fn fn_not(args: &[FormulaValue]) -> FormulaValue {
    match args[0].to_bool() {
        Ok(b) => FormulaValue::Boolean(!b),
        Err(e) => FormulaValue::Error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_if() {
        let yes = FormulaValue::String("yes".into());
        assert_eq!(fn_if(&[FormulaValue::Number(1.0), yes.clone()]), yes);
        assert_eq!(
            fn_if(&[FormulaValue::Boolean(false), yes.clone()]),
            FormulaValue::Boolean(false)
        );
        assert_eq!(
            fn_if(&[FormulaValue::String("maybe".into()), yes]),
            FormulaValue::Error(CellError::Value)
        );
    }

    #[test]
    fn test_iferror() {
        let fallback = FormulaValue::Number(0.0);
        assert_eq!(
            fn_iferror(&[FormulaValue::Error(CellError::Div0), fallback.clone()]),
            fallback
        );
        assert_eq!(
            fn_iferror(&[FormulaValue::Number(2.0), fallback]),
            FormulaValue::Number(2.0)
        );
    }

    #[test]
    fn test_and_or_not() {
        let t = FormulaValue::Boolean(true);
        let f = FormulaValue::Boolean(false);
        assert_eq!(fn_and(&[t.clone(), f.clone()]), f);
        assert_eq!(fn_or(&[t.clone(), f.clone()]), t);
        assert_eq!(fn_not(&[f]), t);
        assert_eq!(
            fn_and(&[FormulaValue::Array(vec![vec![FormulaValue::String("x".into())]])]),
            FormulaValue::Error(CellError::Value)
        );
    }
}
