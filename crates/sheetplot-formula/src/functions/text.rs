//! Text functions

use crate::evaluator::FormulaValue;

/// CONCATENATE(text1, ...)
pub fn fn_concatenate(args: &[FormulaValue]) -> FormulaValue {
    if let Some(e) = args.iter().find_map(FormulaValue::error) {
        return FormulaValue::Error(e);
    }
    FormulaValue::String(args.iter().map(FormulaValue::as_text).collect())
}

/// LEN(text), counted in characters
pub fn fn_len(args: &[FormulaValue]) -> FormulaValue {
    match &args[0] {
        FormulaValue::Error(e) => FormulaValue::Error(*e),
        value => FormulaValue::Number(value.as_text().chars().count() as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_concatenate() {
        let args = [
            FormulaValue::String("Reef ".into()),
            FormulaValue::Number(2.0),
            FormulaValue::Boolean(true),
        ];
        assert_eq!(fn_concatenate(&args), FormulaValue::String("Reef 2TRUE".into()));
    }

    #[test]
    fn test_len() {
        assert_eq!(fn_len(&[FormulaValue::String("Жук".into())]), FormulaValue::Number(3.0));
        assert_eq!(fn_len(&[FormulaValue::Number(12.5)]), FormulaValue::Number(4.0));
    }
}
