//! Cell-related types
//!
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`CellRange`] - A range of cells (e.g., "A1:B10")
//! - [`CellData`] - A stored cell: value plus number format

mod address;
mod value;

pub use address::{CellAddress, CellRange};
pub use value::{CellError, CellValue};

use crate::number_format::NumberFormat;

/// A stored cell
///
/// A `CellData` holding [`CellValue::Empty`] is a *blank* cell: it exists in
/// its row (it may carry a format) but has no content. That is distinct from
/// an absent cell, which the worksheet has no entry for at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellData {
    /// Cell content
    pub value: CellValue,
    /// Display format
    pub number_format: NumberFormat,
}

impl CellData {
    /// Create a cell with the General format
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            number_format: NumberFormat::General,
        }
    }

    /// Create a cell with an explicit format
    pub fn with_format(value: CellValue, number_format: NumberFormat) -> Self {
        Self {
            value,
            number_format,
        }
    }

    /// Check if the cell is blank
    pub fn is_blank(&self) -> bool {
        self.value.is_empty()
    }
}
