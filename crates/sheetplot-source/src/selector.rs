//! Selector parsing and resolution
//!
//! A selector is `[SheetName!]<columns><row>`, for example `Coral!A1` or
//! `B20`. Without a sheet prefix the first sheet in workbook order is used.
//! A named sheet is looked up by three rules, strictly in this order:
//!
//! 1. exact match on the stored name
//! 2. case-insensitive match after trimming both names
//! 3. case-insensitive substring match of the trimmed target inside a
//!    trimmed stored name; the first sheet in workbook order wins
//!
//! Resolution never mutates the workbook.

use std::fmt;
use std::str::FromStr;

use lazy_regex::regex_captures;
use sheetplot_core::{CellAddress, Workbook, Worksheet};

use crate::error::SelectionError;
use crate::value::Value;

/// A parsed selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    sheet: Option<String>,
    address: CellAddress,
}

/// Which rule located a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetMatch {
    /// No sheet was named; the first sheet was used
    First,
    Exact,
    TrimmedCaseInsensitive,
    Substring,
}

impl Selector {
    /// Parse a selector string
    ///
    /// A sheet name may be quoted (`'Wet Tropics'!B2`) with `''` standing for
    /// a literal quote.
    pub fn parse(s: &str) -> Result<Self, SelectionError> {
        let invalid = || SelectionError::InvalidSelector(s.to_string());

        let (_, sheet, reference) =
            regex_captures!(r"^(?:(.+)!)?(\$?[A-Za-z]+\$?[0-9]+)$", s).ok_or_else(invalid)?;

        let parsed = CellAddress::parse(reference).map_err(|_| invalid())?;
        let address = CellAddress::new(parsed.row, parsed.col);
        let sheet = match sheet {
            "" => None,
            quoted if quoted.len() >= 2 && quoted.starts_with('\'') && quoted.ends_with('\'') => {
                Some(quoted[1..quoted.len() - 1].replace("''", "'"))
            }
            name => Some(name.to_string()),
        };

        Ok(Self { sheet, address })
    }

    /// Build a selector from parts
    ///
    /// `$` markers on the address are dropped; a selector names one cell.
    pub fn new(sheet: Option<&str>, address: CellAddress) -> Self {
        Self {
            sheet: sheet.map(str::to_string),
            address: CellAddress::new(address.row, address.col),
        }
    }

    /// Sheet name as written, if any
    pub fn sheet(&self) -> Option<&str> {
        self.sheet.as_deref()
    }

    /// Zero-based cell address
    pub fn address(&self) -> CellAddress {
        self.address
    }

    /// Resolve against a workbook and snapshot the cell
    pub fn resolve(&self, workbook: &Workbook) -> Result<Value, SelectionError> {
        let (sheet_idx, worksheet, _) = match &self.sheet {
            Some(name) => resolve_sheet(workbook, name)?,
            None => {
                let ws = workbook.worksheet(0).ok_or(SelectionError::NoSheets)?;
                (0, ws, SheetMatch::First)
            }
        };

        let CellAddress { row, col, .. } = self.address;
        let row_data = worksheet
            .row(row)
            .ok_or_else(|| SelectionError::RowNotFound {
                sheet: worksheet.name().to_string(),
                row: row + 1,
            })?;
        let cell = row_data
            .cell(col)
            .ok_or_else(|| SelectionError::CellNotFound {
                sheet: worksheet.name().to_string(),
                cell: CellAddress::new(row, col).to_string(),
            })?;

        Ok(Value::resolve(workbook, sheet_idx, row, col, cell))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sheet) = &self.sheet {
            write!(f, "{}!", sheet)?;
        }
        write!(f, "{}", self.address)
    }
}

impl FromStr for Selector {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Locate a sheet by name using the precedence rules
pub fn resolve_sheet<'w>(
    workbook: &'w Workbook,
    name: &str,
) -> Result<(usize, &'w Worksheet, SheetMatch), SelectionError> {
    if workbook.is_empty() {
        return Err(SelectionError::NoSheets);
    }

    if let Some(idx) = workbook.sheet_index(name) {
        return found(workbook, idx, SheetMatch::Exact, name);
    }

    let target = name.trim().to_lowercase();
    if !target.is_empty() {
        let stored: Vec<String> = workbook
            .worksheets()
            .map(|ws| ws.name().trim().to_lowercase())
            .collect();

        if let Some(idx) = stored.iter().position(|s| *s == target) {
            return found(workbook, idx, SheetMatch::TrimmedCaseInsensitive, name);
        }
        if let Some(idx) = stored.iter().position(|s| s.contains(&target)) {
            return found(workbook, idx, SheetMatch::Substring, name);
        }
    }

    Err(SelectionError::SheetNotFound {
        sheet: name.to_string(),
    })
}

fn found<'w>(
    workbook: &'w Workbook,
    idx: usize,
    rule: SheetMatch,
    name: &str,
) -> Result<(usize, &'w Worksheet, SheetMatch), SelectionError> {
    let ws = workbook
        .worksheet(idx)
        .ok_or_else(|| SelectionError::SheetNotFound {
            sheet: name.to_string(),
        })?;
    if rule != SheetMatch::Exact {
        log::debug!(
            "sheet '{}' resolved to '{}' by {:?} match",
            name,
            ws.name(),
            rule
        );
    }
    Ok((idx, ws, rule))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheetplot_core::CellValue;

    fn coral_workbook() -> Workbook {
        let mut wb = Workbook::empty();
        for (name, marker) in [("Coral Reef", "substring"), (" coral ", "trimmed"), ("Coral", "exact")] {
            let idx = wb.add_worksheet_with_name(name).unwrap();
            wb.worksheet_mut(idx)
                .unwrap()
                .set_cell_value("A1", marker)
                .unwrap();
        }
        wb
    }

    fn marker(wb: &Workbook, selector: &str) -> String {
        Selector::parse(selector)
            .unwrap()
            .resolve(wb)
            .unwrap()
            .format("value")
            .unwrap()
    }

    #[test]
    fn test_parse() {
        let sel = Selector::parse("Coral!B20").unwrap();
        assert_eq!(sel.sheet(), Some("Coral"));
        assert_eq!(sel.address(), CellAddress::new(19, 1));

        let sel = Selector::parse("$C$3").unwrap();
        assert_eq!(sel.sheet(), None);
        assert_eq!(sel.address(), CellAddress::new(2, 2));

        assert_eq!(sel, Selector::parse("C3").unwrap());
        assert_eq!(sel.to_string(), "C3");

        let sel = Selector::parse("'Bob''s Data'!A1").unwrap();
        assert_eq!(sel.sheet(), Some("Bob's Data"));

        let sel = Selector::parse("A!b!C2").unwrap();
        assert_eq!(sel.sheet(), Some("A!b"));
        assert_eq!(sel.to_string(), "A!b!C2");
    }

    #[test]
    fn test_running_total_column_from_worker_thread() {
        let mut wb = Workbook::new();
        let sheet = wb.worksheet_mut(0).unwrap();
        sheet.set_cell_value("A1", 1.0).unwrap();
        for row in 2..=6_000 {
            sheet
                .set_cell_formula(&format!("A{}", row), &format!("=A{}+1", row - 1))
                .unwrap();
        }

        let value = std::thread::spawn(move || marker(&wb, "A6000"))
            .join()
            .unwrap();
        assert_eq!(value, "6000.0");
    }

    #[test]
    fn test_parse_invalid() {
        for bad in ["", "A", "12", "!A1", "Sheet!", "A0", "A1:B2", "Sheet 1"] {
            assert!(
                matches!(Selector::parse(bad), Err(SelectionError::InvalidSelector(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_precedence() {
        let wb = coral_workbook();
        assert_eq!(marker(&wb, "Coral!A1"), "exact");
        assert_eq!(marker(&wb, "CORAL !A1"), "trimmed");
        assert_eq!(marker(&wb, "reef!A1"), "substring");
        assert_eq!(marker(&wb, "A1"), "substring");
    }

    #[test]
    fn test_substring_first_in_order_wins() {
        let mut wb = Workbook::empty();
        wb.add_worksheet_with_name("North Coral").unwrap();
        wb.add_worksheet_with_name("South Coral").unwrap();
        let (idx, _, rule) = resolve_sheet(&wb, "coral").unwrap();
        assert_eq!((idx, rule), (0, SheetMatch::Substring));
    }

    #[test]
    fn test_failures() {
        let wb = coral_workbook();
        assert_eq!(
            Selector::parse("Seagrass!A1").unwrap().resolve(&wb),
            Err(SelectionError::SheetNotFound {
                sheet: "Seagrass".into()
            })
        );
        assert_eq!(
            Selector::parse("Coral!A2").unwrap().resolve(&wb),
            Err(SelectionError::RowNotFound {
                sheet: "Coral".into(),
                row: 2
            })
        );
        assert_eq!(
            Selector::parse("Coral!B1").unwrap().resolve(&wb),
            Err(SelectionError::CellNotFound {
                sheet: "Coral".into(),
                cell: "B1".into()
            })
        );
        assert_eq!(
            Selector::parse("A1").unwrap().resolve(&Workbook::empty()),
            Err(SelectionError::NoSheets)
        );
        assert!(matches!(
            resolve_sheet(&wb, "  "),
            Err(SelectionError::SheetNotFound { .. })
        ));
    }

    #[test]
    fn test_formula_is_evaluated_and_snapshotted() {
        let mut wb = Workbook::new();
        let sheet = wb.worksheet_mut(0).unwrap();
        sheet.set_cell_value("A1", 4.0).unwrap();
        sheet.set_cell_formula("A2", "=A1/0").unwrap();
        sheet.set_cell_formula("A3", "=A1*2").unwrap();

        let err = Selector::parse("A2").unwrap().resolve(&wb).unwrap();
        assert_eq!(err.format("value").unwrap(), "#DIV/0!");

        let doubled = Selector::parse("Sheet1!A3").unwrap().resolve(&wb).unwrap();
        wb.worksheet_mut(0)
            .unwrap()
            .set_cell_value("A1", 100.0)
            .unwrap();
        assert_eq!(doubled.cell_value(), &CellValue::Number(8.0));
    }
}
