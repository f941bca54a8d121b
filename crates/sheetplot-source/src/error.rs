//! Error types for selection, formatting and loading

use thiserror::Error;

/// A selector could not be resolved to a cell
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The selector string is not `[Sheet!]<columns><row>`
    #[error("invalid selector '{0}'")]
    InvalidSelector(String),

    /// No sheet matched the requested name under any rule
    #[error("sheet '{sheet}' not found")]
    SheetNotFound { sheet: String },

    /// The workbook has no sheets at all
    #[error("workbook has no sheets")]
    NoSheets,

    /// The row holds no cells
    #[error("row {row} not found in sheet '{sheet}'")]
    RowNotFound { sheet: String, row: u32 },

    /// The row exists but has no cell in the referenced column
    #[error("cell {cell} not found in sheet '{sheet}'")]
    CellNotFound { sheet: String, cell: String },
}

/// `Value::format` was called with a pattern it does not know
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatPatternError {
    /// Only `"value"` is recognized
    #[error("unknown pattern '{0}'")]
    UnknownPattern(String),

    /// A formula reached formatting without being evaluated
    #[error("formula '{0}' was not evaluated before formatting")]
    UnevaluatedFormula(String),
}

/// A byte stream could not be loaded as a workbook
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XLSX error
    #[error(transparent)]
    Xlsx(#[from] sheetplot_xlsx::XlsxError),

    /// CSV error
    #[error(transparent)]
    Csv(#[from] sheetplot_csv::CsvError),
}
