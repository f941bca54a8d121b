//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that stop a formula from producing a value
///
/// Spreadsheet-level failures such as division by zero are not errors here;
/// they evaluate to [`CellError`](sheetplot_core::CellError) values.
#[derive(Debug, Error)]
pub enum FormulaError {
    /// Formula text could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Function name not in the registry
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number of arguments
    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    /// The formula depends on its own result
    #[error("Circular reference at {0}")]
    CircularReference(String),
}
