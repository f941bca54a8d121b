//! The `DataSource` capability

use sheetplot_core::Workbook;

use crate::error::SelectionError;
use crate::selector::Selector;
use crate::value::Value;

/// Anything chart data can be selected from
///
/// Implementations hold no mutable state, so one source may be read from
/// many threads at once.
pub trait DataSource: Send + Sync {
    /// Resolve a selector string to a value snapshot
    fn select(&self, selector: &str) -> Result<Value, SelectionError>;

    /// Sheet names in workbook order, exactly as stored
    fn sheet_names(&self) -> Vec<String>;
}

/// [`DataSource`] over a borrowed workbook
#[derive(Debug, Clone, Copy)]
pub struct WorkbookSource<'a> {
    workbook: &'a Workbook,
}

impl<'a> WorkbookSource<'a> {
    pub fn new(workbook: &'a Workbook) -> Self {
        Self { workbook }
    }

    pub fn workbook(&self) -> &'a Workbook {
        self.workbook
    }
}

impl DataSource for WorkbookSource<'_> {
    fn select(&self, selector: &str) -> Result<Value, SelectionError> {
        Selector::parse(selector)?.resolve(self.workbook)
    }

    fn sheet_names(&self) -> Vec<String> {
        self.workbook
            .sheet_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
