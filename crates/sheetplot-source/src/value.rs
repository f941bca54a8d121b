//! Resolved cell values

use std::fmt;

use sheetplot_core::{CellData, CellValue, NumberFormat, Workbook};

use crate::error::FormatPatternError;

/// The one pattern [`Value::format`] recognizes
pub const VALUE_PATTERN: &str = "value";

/// Kind of a resolved value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Boolean,
    Number,
    String,
    Blank,
    Error,
}

/// Immutable snapshot of one resolved cell
///
/// Formula cells are evaluated when the value is taken, so later changes to
/// the workbook do not affect an existing `Value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    value: CellValue,
    number_format: NumberFormat,
}

impl Value {
    /// Wrap an already evaluated cell value
    pub fn new(value: CellValue, number_format: NumberFormat) -> Self {
        Self {
            value,
            number_format,
        }
    }

    /// Snapshot a stored cell, evaluating it first if it holds a formula
    pub(crate) fn resolve(
        workbook: &Workbook,
        sheet: usize,
        row: u32,
        col: u16,
        cell: &CellData,
    ) -> Self {
        let value = if cell.value.is_formula() {
            sheetplot_formula::evaluate_cell(workbook, sheet, row, col)
        } else {
            cell.value.clone()
        };
        Self::new(value, cell.number_format.clone())
    }

    /// Render with a named pattern
    ///
    /// `"value"` gives the semantic value: `true`/`false`, the plain decimal
    /// form of a number (`3.0`, never an exponent), the literal string, `""` for blank, or the error code.
    pub fn format(&self, pattern: &str) -> Result<String, FormatPatternError> {
        if pattern != VALUE_PATTERN {
            return Err(FormatPatternError::UnknownPattern(pattern.to_string()));
        }

        Ok(match &self.value {
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Number(n) => decimal(*n),
            CellValue::String(s) => s.clone(),
            CellValue::Empty => String::new(),
            CellValue::Error(e) => e.as_str().to_string(),
            CellValue::Formula { text, .. } => {
                log::error!("unevaluated formula '{}' reached value formatting", text);
                return Err(FormatPatternError::UnevaluatedFormula(text.clone()));
            }
        })
    }

    /// Render with an optional pattern; `None` uses the display rendering
    pub fn format_with(&self, pattern: Option<&str>) -> Result<String, FormatPatternError> {
        match pattern {
            Some(p) => self.format(p),
            None => Ok(self.to_string()),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match &self.value {
            CellValue::Boolean(_) => ValueKind::Boolean,
            CellValue::Number(_) => ValueKind::Number,
            CellValue::String(_) | CellValue::Formula { .. } => ValueKind::String,
            CellValue::Empty => ValueKind::Blank,
            CellValue::Error(_) => ValueKind::Error,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.value.is_empty()
    }

    /// The number, if this is a numeric cell
    pub fn as_number(&self) -> Option<f64> {
        match self.value {
            CellValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The underlying cell value
    pub fn cell_value(&self) -> &CellValue {
        &self.value
    }

    pub fn number_format(&self) -> &NumberFormat {
        &self.number_format
    }
}

/// Display rendering: what a spreadsheet application would show
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.number_format.format_value(&self.value))
    }
}

/// Shortest round-tripping decimal digits, with `.0` on integral values
fn decimal(n: f64) -> String {
    let mut out = n.to_string();
    if n.is_finite() && !out.contains('.') {
        out.push_str(".0");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetplot_core::CellError;

    #[test]
    fn test_value_pattern() {
        let cases = [
            (CellValue::Boolean(true), "true"),
            (CellValue::Boolean(false), "false"),
            (CellValue::Number(3.0), "3.0"),
            (CellValue::Number(0.25), "0.25"),
            (CellValue::Number(-2.5), "-2.5"),
            (CellValue::Number(1e21), "1000000000000000000000.0"),
            (CellValue::Number(1e-7), "0.0000001"),
            (CellValue::Number(0.1 + 0.2), "0.30000000000000004"),
            (CellValue::string("Coral"), "Coral"),
            (CellValue::Empty, ""),
            (CellValue::Error(CellError::Div0), "#DIV/0!"),
        ];
        for (cell, expected) in cases {
            let value = Value::new(cell, NumberFormat::General);
            assert_eq!(value.format("value").unwrap(), expected);
        }
    }

    #[test]
    fn test_display_differs_from_semantic_value() {
        let value = Value::new(CellValue::Number(3.0), NumberFormat::General);
        assert_eq!(value.format("value").unwrap(), "3.0");
        assert_eq!(value.to_string(), "3");

        let pct = Value::new(
            CellValue::Number(0.125),
            NumberFormat::BuiltIn(NumberFormat::ID_PERCENT_DEC2),
        );
        assert_eq!(pct.format_with(None).unwrap(), "12.50%");
        assert_eq!(pct.format_with(Some("value")).unwrap(), "0.125");

        let flag = Value::new(CellValue::Boolean(true), NumberFormat::General);
        assert_eq!(flag.to_string(), "TRUE");
    }

    #[test]
    fn test_unknown_pattern() {
        let value = Value::new(CellValue::Number(1.0), NumberFormat::General);
        assert_eq!(
            value.format("0.00"),
            Err(FormatPatternError::UnknownPattern("0.00".into()))
        );
    }

    #[test]
    fn test_unevaluated_formula_is_internal_error() {
        let value = Value::new(CellValue::formula("A1"), NumberFormat::General);
        assert!(matches!(
            value.format("value"),
            Err(FormatPatternError::UnevaluatedFormula(_))
        ));
    }
}
