//! # sheetplot-csv
//!
//! CSV reader and writer for sheetplot.
//!
//! - [`CsvReader`] loads a CSV stream as a one-sheet workbook.
//! - [`CsvDocumentWriter`] serializes whole documents through one lock, so a
//!   single writer can be shared by concurrent callers.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvDocumentWriter;
