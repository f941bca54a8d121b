//! # sheetplot-core
//!
//! Core data structures for sheetplot.
//!
//! This crate provides the fundamental types shared by the readers, the
//! selector resolver and the chart builders:
//! - [`CellValue`] - Represents cell values (numbers, strings, booleans, errors, formulas)
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`NumberFormat`] - Number formats and display formatting
//! - [`Workbook`], [`Worksheet`] - The document structures
//!
//! ## Example
//!
//! ```rust
//! use sheetplot_core::{Workbook, CellValue};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! // Using string addresses
//! sheet.set_cell_value("A1", "Hello").unwrap();
//! sheet.set_cell_value("B1", 42.0).unwrap();
//!
//! // Or using row/column indices (0-based)
//! sheet.set_cell_value_at(1, 0, CellValue::string("World")).unwrap();
//! ```

pub mod cell;
pub mod error;
pub mod number_format;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellData, CellError, CellRange, CellValue};
pub use error::{Error, Result};
pub use number_format::NumberFormat;
pub use workbook::Workbook;
pub use worksheet::{Row, Worksheet};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
