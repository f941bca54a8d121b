//! Worksheet type

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::cell::{CellAddress, CellData, CellRange, CellValue};
use crate::error::{Error, Result};
use crate::number_format::NumberFormat;
use crate::{MAX_COLS, MAX_ROWS};

/// One stored row of a worksheet
///
/// A row exists as soon as any cell in it has been set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: BTreeMap<u16, CellData>,
}

impl Row {
    /// Get a cell by column index
    pub fn cell(&self, col: u16) -> Option<&CellData> {
        self.cells.get(&col)
    }

    /// Iterate over the stored cells in column order
    pub fn cells(&self) -> impl Iterator<Item = (u16, &CellData)> {
        self.cells.iter().map(|(col, cell)| (*col, cell))
    }

    /// Iterate over the stored cells whose column lies in `cols`
    pub fn cells_in(&self, cols: RangeInclusive<u16>) -> impl Iterator<Item = (u16, &CellData)> {
        self.cells.range(cols).map(|(col, cell)| (*col, cell))
    }

    /// Number of stored cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check whether the row holds no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A worksheet (single sheet in a workbook)
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    rows: BTreeMap<u32, Row>,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
        }
    }

    /// Get the sheet name exactly as stored
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    // === Cell Access ===

    /// Get a stored row by zero-based index
    pub fn row(&self, row: u32) -> Option<&Row> {
        self.rows.get(&row)
    }

    /// Iterate over stored rows in order
    pub fn rows(&self) -> impl Iterator<Item = (u32, &Row)> {
        self.rows.iter().map(|(idx, row)| (*idx, row))
    }

    /// Iterate over the stored rows whose index lies in `rows`
    pub fn rows_in(&self, rows: RangeInclusive<u32>) -> impl Iterator<Item = (u32, &Row)> {
        self.rows.range(rows).map(|(idx, row)| (*idx, row))
    }

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellData>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr.row, addr.col))
    }

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row).and_then(|r| r.cell(col))
    }

    /// Get a cell value, treating absent cells as [`CellValue::Empty`]
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cell_at(row, col)
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Empty)
    }

    /// Get a cell value by address string
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    ///
    /// Setting [`CellValue::Empty`] stores a blank cell; use
    /// [`clear_cell`](Self::clear_cell) to remove it.
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column indices, keeping its number format
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.rows
            .entry(row)
            .or_default()
            .cells
            .entry(col)
            .or_default()
            .value = value.into();
        Ok(())
    }

    /// Set a cell formula by address string
    pub fn set_cell_formula(&mut self, address: &str, formula: &str) -> Result<()> {
        self.set_cell_value(address, CellValue::formula(formula))
    }

    /// Store a complete cell (value and format)
    pub fn set_cell_at(&mut self, row: u32, col: u16, cell: CellData) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.rows.entry(row).or_default().cells.insert(col, cell);
        Ok(())
    }

    /// Set the number format of a cell, creating a blank cell if needed
    pub fn set_number_format(&mut self, address: &str, format: NumberFormat) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.validate_cell_position(addr.row, addr.col)?;
        self.rows
            .entry(addr.row)
            .or_default()
            .cells
            .entry(addr.col)
            .or_default()
            .number_format = format;
        Ok(())
    }

    /// Remove a cell by address string
    pub fn clear_cell(&mut self, address: &str) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.clear_cell_at(addr.row, addr.col);
        Ok(())
    }

    /// Remove a cell; its row is dropped once it holds no cells
    pub fn clear_cell_at(&mut self, row: u32, col: u16) {
        if let Some(r) = self.rows.get_mut(&row) {
            r.cells.remove(&col);
            if r.cells.is_empty() {
                self.rows.remove(&row);
            }
        }
    }

    /// Smallest range covering every stored cell
    pub fn used_range(&self) -> Option<CellRange> {
        let first_row = *self.rows.keys().next()?;
        let last_row = *self.rows.keys().next_back()?;
        let cols = self.rows.values().flat_map(|r| r.cells.keys().copied());
        let (min_col, max_col) = cols.fold((u16::MAX, 0), |(lo, hi), c| (lo.min(c), hi.max(c)));
        Some(CellRange::new(
            CellAddress::new(first_row, min_col),
            CellAddress::new(last_row, max_col),
        ))
    }

    /// Number of stored cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(Row::len).sum()
    }

    /// Check whether the sheet holds no cells
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn validate_cell_position(&self, row: u32, col: u16) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        Ok(())
    }
}
