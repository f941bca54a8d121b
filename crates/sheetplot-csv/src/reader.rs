//! CSV reader

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use sheetplot_core::{CellValue, Workbook, Worksheet, MAX_COLS};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a one-sheet workbook
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Workbook> {
        let file = File::open(path)?;
        Self::read_workbook(BufReader::new(file), options)
    }

    /// Read CSV from a reader into a workbook holding one sheet named `Sheet1`
    pub fn read_workbook<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Workbook> {
        let mut workbook = Workbook::empty();
        workbook.add_existing_worksheet(Self::read(reader, options)?)?;
        Ok(workbook)
    }

    /// Read CSV from a reader into a worksheet
    ///
    /// Every field becomes a stored cell, so an empty field is a blank cell
    /// rather than an absent one. Records may differ in length.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut worksheet = Worksheet::new("Sheet1");

        for (row_idx, result) in csv_reader.records().enumerate() {
            let record = result?;
            let verbatim = options.has_header && row_idx == 0;

            for (col, field) in record.iter().enumerate() {
                let col_idx = u16::try_from(col)
                    .ok()
                    .filter(|c| *c < MAX_COLS)
                    .ok_or_else(|| CsvError::Parse {
                        row: row_idx + 1,
                        column: col + 1,
                        message: format!("more than {} columns", MAX_COLS),
                    })?;

                let value = if verbatim || !options.auto_detect_types {
                    CellValue::string(field)
                } else {
                    Self::detect_type(field)
                };

                worksheet.set_cell_value_at(row_idx as u32, col_idx, value)?;
            }
        }

        log::debug!(
            "read csv sheet: {} rows, {} cells",
            worksheet.rows().count(),
            worksheet.cell_count()
        );

        Ok(worksheet)
    }

    /// Detect the type of a field value
    fn detect_type(field: &str) -> CellValue {
        let trimmed = field.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Boolean(false);
        }

        // Rust also parses "inf" and "NaN"; those stay text
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::string(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_type_detection() {
        let data = "Year,2019,2020\nCoral, 1.5 ,\nflag,TRUE,inf\n";
        let ws = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap();

        assert_eq!(ws.name(), "Sheet1");
        assert_eq!(ws.get_value("A1").unwrap(), CellValue::string("Year"));
        assert_eq!(ws.get_value("B1").unwrap(), CellValue::Number(2019.0));
        assert_eq!(ws.get_value("B2").unwrap(), CellValue::Number(1.5));
        assert!(ws.cell("C2").unwrap().is_some_and(|c| c.is_blank()));
        assert_eq!(ws.get_value("B3").unwrap(), CellValue::Boolean(true));
        assert_eq!(ws.get_value("C3").unwrap(), CellValue::string("inf"));
    }

    #[test]
    fn test_header_kept_verbatim() {
        let options = CsvReadOptions {
            has_header: true,
            ..Default::default()
        };
        let ws = CsvReader::read("1,true\n1,true\n".as_bytes(), &options).unwrap();
        assert_eq!(ws.get_value("A1").unwrap(), CellValue::string("1"));
        assert_eq!(ws.get_value("B1").unwrap(), CellValue::string("true"));
        assert_eq!(ws.get_value("A2").unwrap(), CellValue::Number(1.0));
    }

    #[test]
    fn test_without_detection_and_ragged_rows() {
        let options = CsvReadOptions {
            auto_detect_types: false,
            delimiter: b';',
            ..Default::default()
        };
        let ws = CsvReader::read("a;2\nb\n".as_bytes(), &options).unwrap();
        assert_eq!(ws.get_value("B1").unwrap(), CellValue::string("2"));
        assert!(ws.cell("B2").unwrap().is_none());
    }

    #[test]
    fn test_read_workbook() {
        let wb = CsvReader::read_workbook("x\n".as_bytes(), &CsvReadOptions::default()).unwrap();
        assert_eq!(wb.sheet_names(), vec!["Sheet1"]);
    }
}
