//! Loading workbooks from byte streams and files

use std::io::Cursor;
use std::path::Path;

use sheetplot_core::Workbook;
use sheetplot_csv::{CsvReadOptions, CsvReader};
use sheetplot_xlsx::XlsxReader;

use crate::datasource::WorkbookSource;
use crate::error::LoadError;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Supported spreadsheet encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetKind {
    Xlsx,
    Csv,
}

impl SpreadsheetKind {
    /// Guess the kind from leading bytes: a ZIP package is XLSX, anything
    /// else is read as CSV
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(ZIP_MAGIC) {
            SpreadsheetKind::Xlsx
        } else {
            SpreadsheetKind::Csv
        }
    }

    /// Kind implied by a file extension, if it is a known one
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" | "xlsm" => Some(SpreadsheetKind::Xlsx),
            "csv" => Some(SpreadsheetKind::Csv),
            _ => None,
        }
    }
}

/// How a byte stream is interpreted
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Force a kind; `None` sniffs the stream
    pub kind: Option<SpreadsheetKind>,
    /// Options for CSV streams
    pub csv: CsvReadOptions,
}

/// A parsed workbook together with the kind it was read as
#[derive(Debug, Clone)]
pub struct Spreadsheet {
    workbook: Workbook,
    kind: SpreadsheetKind,
}

impl Spreadsheet {
    /// Parse a workbook from raw bytes
    pub fn from_bytes(bytes: &[u8], options: &LoadOptions) -> Result<Self, LoadError> {
        let kind = options
            .kind
            .unwrap_or_else(|| SpreadsheetKind::sniff(bytes));

        let workbook = match kind {
            SpreadsheetKind::Xlsx => XlsxReader::read(Cursor::new(bytes))?,
            SpreadsheetKind::Csv => CsvReader::read_workbook(bytes, &options.csv)?,
        };

        log::debug!(
            "loaded {:?} workbook ({} bytes, {} sheets)",
            kind,
            bytes.len(),
            workbook.sheet_count()
        );

        Ok(Self { workbook, kind })
    }

    /// Read a file, taking the kind from its extension or its content
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let options = LoadOptions {
            kind: SpreadsheetKind::from_extension(&path),
            ..Default::default()
        };
        Self::open_with(path, &options)
    }

    /// Read a file with explicit options
    pub fn open_with<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, options)
    }

    /// Wrap an already built workbook
    pub fn from_workbook(workbook: Workbook, kind: SpreadsheetKind) -> Self {
        Self { workbook, kind }
    }

    /// The data source adapter over this workbook
    pub fn source(&self) -> WorkbookSource<'_> {
        WorkbookSource::new(&self.workbook)
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn into_workbook(self) -> Workbook {
        self.workbook
    }

    pub fn kind(&self) -> SpreadsheetKind {
        self.kind
    }
}
