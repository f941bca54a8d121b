//! # sheetplot-source
//!
//! Uniform, selector-addressable access to spreadsheet data.
//!
//! - [`Selector`] parses `[Sheet!]A1` references and resolves them against a
//!   [`Workbook`](sheetplot_core::Workbook)
//! - [`Value`] is an immutable snapshot of one resolved cell
//! - [`DataSource`] is the capability chart builders read through;
//!   [`WorkbookSource`] implements it over a borrowed workbook
//! - [`Spreadsheet`] loads XLSX or CSV byte streams
//!
//! ## Example
//!
//! ```rust
//! use sheetplot_core::Workbook;
//! use sheetplot_source::{DataSource, WorkbookSource};
//!
//! let mut wb = Workbook::empty();
//! let idx = wb.add_worksheet_with_name("Coral").unwrap();
//! wb.worksheet_mut(idx).unwrap().set_cell_value("B2", 3.0).unwrap();
//!
//! let source = WorkbookSource::new(&wb);
//! let value = source.select("coral!B2").unwrap();
//! assert_eq!(value.format("value").unwrap(), "3.0");
//! assert_eq!(value.to_string(), "3");
//! ```

pub mod datasource;
pub mod error;
pub mod loader;
pub mod selector;
pub mod value;

pub use datasource::{DataSource, WorkbookSource};
pub use error::{FormatPatternError, LoadError, SelectionError};
pub use loader::{LoadOptions, Spreadsheet, SpreadsheetKind};
pub use selector::{resolve_sheet, SheetMatch, Selector};
pub use value::{Value, ValueKind};
