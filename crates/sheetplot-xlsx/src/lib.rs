//! # sheetplot-xlsx
//!
//! XLSX (Office Open XML) reader for sheetplot.
//!
//! Only what chart extraction needs is read: sheet order and names, cell
//! values (shared strings, inline strings, booleans, errors, numbers),
//! formulas with their cached results, and per-cell number formats.

pub mod error;
pub mod reader;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
