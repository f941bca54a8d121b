//! # sheetplot
//!
//! Charts from spreadsheet data.
//!
//! sheetplot reads XLSX or CSV workbooks, pulls one block of categories and
//! series per region through `[Sheet!]A1` selectors, and renders the result
//! as SVG, PNG, CSV, HTML, DOCX, EMF or EPS.
//!
//! ## Features
//!
//! - XLSX and CSV loading with formula evaluation
//! - Fuzzy sheet-name resolution (exact, trimmed, case-insensitive, substring)
//! - Bar, stacked bar, line and pie charts plus a tabular view
//! - Width/height negotiation against each chart's natural size
//! - Interactive SVG tooltips
//!
//! ## Example
//!
//! ```rust
//! use sheetplot::prelude::*;
//!
//! let mut wb = Workbook::empty();
//! let idx = wb.add_worksheet_with_name("Wet Tropics").unwrap();
//! let sheet = wb.worksheet_mut(idx).unwrap();
//! sheet.set_cell_value("B1", 2020.0).unwrap();
//! sheet.set_cell_value("C1", 2021.0).unwrap();
//! sheet.set_cell_value("A2", "Coral").unwrap();
//! sheet.set_cell_value("B2", 12.5).unwrap();
//! sheet.set_cell_value("C2", 14.0).unwrap();
//!
//! let source = WorkbookSource::new(&wb);
//! let request = ChartRequest::new(ChartType::Bar, Format::Csv).region(Region::WetTropics);
//! let outputs = render_charts(&[&source], &request).unwrap();
//!
//! assert_eq!(
//!     std::str::from_utf8(outputs[0].content()).unwrap(),
//!     "Wet Tropics Bar Chart,2020,2021\r\nCoral,12.5,14\r\n"
//! );
//! ```

pub mod pipeline;
pub mod prelude;

pub use pipeline::{render_charts, ChartRequest};

// Re-export core types
pub use sheetplot_core::{
    CellAddress, CellData, CellError, CellRange, CellValue, Error, NumberFormat, Result, Row,
    Workbook, Worksheet,
};

// Re-export formula types
pub use sheetplot_formula::{evaluate_cell, FormulaError, FormulaValue};

// Re-export data access types
pub use sheetplot_source::{
    DataSource, FormatPatternError, LoadError, LoadOptions, SelectionError, Selector,
    Spreadsheet, SpreadsheetKind, Value, ValueKind, WorkbookSource,
};

// Re-export chart types
pub use sheetplot_chart::{
    builder_for, encoder_for, Chart, ChartBuilder, ChartError, ChartParams, ChartResult,
    ChartType, DataBlock, Dimension, Dimensions, Encoder, Format, LineStyle, RasterOptions,
    Region, Representation, Series,
};

// Re-export I/O types
pub use sheetplot_csv::{CsvError, CsvReadOptions, CsvReader, CsvWriteOptions};
pub use sheetplot_xlsx::{XlsxError, XlsxReader};
