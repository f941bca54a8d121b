//! Reading a chart's data block through data sources
//!
//! A block starts at a top-left cell. Cells to its right on the same row
//! are category labels; each row below holds a series name in the first
//! column followed by one value per category.

use sheetplot_core::CellAddress;
use sheetplot_source::{DataSource, SelectionError, Value, ValueKind};

use crate::error::{ChartError, ChartResult};

/// One named row of values
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    /// `None` where the cell is blank or absent
    pub values: Vec<Option<f64>>,
    /// Display rendering of each value cell
    pub labels: Vec<String>,
}

/// The categories and series read for one region
#[derive(Debug, Clone, PartialEq)]
pub struct DataBlock {
    /// Name of the sheet as requested
    pub sheet: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl DataBlock {
    /// Largest value across all series
    pub fn max_value(&self) -> Option<f64> {
        self.values().reduce(f64::max)
    }

    /// Smallest value across all series
    pub fn min_value(&self) -> Option<f64> {
        self.values().reduce(f64::min)
    }

    fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.series.iter().flat_map(|s| s.values.iter().flatten().copied())
    }

    /// Text records: heading plus categories, then one row per series
    pub fn records(&self, heading: &str) -> Vec<Vec<String>> {
        let mut records = Vec::with_capacity(self.series.len() + 1);
        records.push(
            std::iter::once(heading.to_string())
                .chain(self.categories.iter().cloned())
                .collect(),
        );
        for series in &self.series {
            records.push(
                std::iter::once(series.name.clone())
                    .chain(series.labels.iter().cloned())
                    .collect(),
            );
        }
        records
    }
}

/// Limits on how far a block extends
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockLimits {
    pub columns: Option<usize>,
    pub rows: Option<usize>,
}

/// Read a block from the first source whose workbook has the sheet
pub fn read_block(
    sources: &[&dyn DataSource],
    sheet: &str,
    start: CellAddress,
    limits: BlockLimits,
) -> ChartResult<DataBlock> {
    let start_cell = selector(sheet, start.row, start.col);

    for (idx, source) in sources.iter().enumerate() {
        match source.select(&start_cell) {
            Err(SelectionError::SheetNotFound { .. }) | Err(SelectionError::NoSheets) => {
                log::debug!("source {} has no sheet '{}', trying next", idx, sheet);
                continue;
            }
            Err(SelectionError::InvalidSelector(_)) => {
                return Err(ChartError::config(format!("invalid sheet name '{}'", sheet)));
            }
            Ok(_) | Err(SelectionError::RowNotFound { .. }) | Err(SelectionError::CellNotFound { .. }) => {
                return BlockReader {
                    source: *source,
                    sheet,
                    start,
                }
                .read(limits);
            }
        }
    }

    Err(ChartError::config(format!(
        "no data source has a sheet matching '{}'",
        sheet
    )))
}

/// Build a selector for a zero-based cell on a named sheet
fn selector(sheet: &str, row: u32, col: u16) -> String {
    format!("'{}'!{}", sheet.replace('\'', "''"), CellAddress::new(row, col))
}

struct BlockReader<'a> {
    source: &'a dyn DataSource,
    sheet: &'a str,
    start: CellAddress,
}

impl BlockReader<'_> {
    fn read(&self, limits: BlockLimits) -> ChartResult<DataBlock> {
        let mut categories = Vec::new();
        for offset in 1.. {
            if limits.columns.is_some_and(|max| categories.len() >= max) {
                break;
            }
            let Some(col) = self.col(offset) else { break };
            match self.cell(self.start.row, col)? {
                Some(v) if !v.is_blank() => categories.push(v.to_string()),
                _ => break,
            }
        }
        if categories.is_empty() {
            return Err(ChartError::config(format!(
                "no categories to the right of {} on sheet '{}'",
                self.start, self.sheet
            )));
        }

        let mut series = Vec::new();
        for offset in 1u32.. {
            if limits.rows.is_some_and(|max| series.len() >= max) {
                break;
            }
            let Some(row) = self.start.row.checked_add(offset) else { break };
            let name = match self.cell(row, self.start.col)? {
                Some(v) if !v.is_blank() => v.to_string(),
                _ => break,
            };

            let mut values = Vec::with_capacity(categories.len());
            let mut labels = Vec::with_capacity(categories.len());
            for c in 0..categories.len() {
                let Some(col) = self.col(c + 1) else { break };
                match self.cell(row, col)? {
                    None => {
                        values.push(None);
                        labels.push(String::new());
                    }
                    Some(v) => {
                        values.push(self.number(&v, row, col)?);
                        labels.push(v.to_string());
                    }
                }
            }
            series.push(Series {
                name,
                values,
                labels,
            });
        }
        if series.is_empty() {
            return Err(ChartError::config(format!(
                "no data series below {} on sheet '{}'",
                self.start, self.sheet
            )));
        }

        log::debug!(
            "read block on '{}' at {}: {} categories, {} series",
            self.sheet,
            self.start,
            categories.len(),
            series.len()
        );

        Ok(DataBlock {
            sheet: self.sheet.to_string(),
            categories,
            series,
        })
    }

    fn col(&self, offset: usize) -> Option<u16> {
        u16::try_from(offset)
            .ok()
            .and_then(|o| self.start.col.checked_add(o))
    }

    /// Select a cell; an absent row or cell reads as `None`
    fn cell(&self, row: u32, col: u16) -> ChartResult<Option<Value>> {
        let sel = selector(self.sheet, row, col);
        match self.source.select(&sel) {
            Ok(v) => Ok(Some(v)),
            Err(SelectionError::RowNotFound { .. }) | Err(SelectionError::CellNotFound { .. }) => {
                Ok(None)
            }
            Err(source) => Err(ChartError::Selection {
                selector: sel,
                source,
            }),
        }
    }

    fn number(&self, value: &Value, row: u32, col: u16) -> ChartResult<Option<f64>> {
        match value.kind() {
            ValueKind::Number => Ok(value.as_number()),
            ValueKind::Blank => Ok(None),
            _ => Err(ChartError::config(format!(
                "{} holds '{}', not a number",
                selector(self.sheet, row, col),
                value
            ))),
        }
    }
}
