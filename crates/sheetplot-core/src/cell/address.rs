//! A1-notation addresses and ranges

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "$B$2")
///
/// Row and column are zero-based internally; the textual form is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    /// Row index (0-based)
    pub row: u32,
    /// Column index (0-based, A=0)
    pub col: u16,
    /// Whether the row carried a `$` marker
    pub row_absolute: bool,
    /// Whether the column carried a `$` marker
    pub col_absolute: bool,
}

impl CellAddress {
    /// Create a relative address from zero-based indices
    pub fn new(row: u32, col: u16) -> Self {
        Self {
            row,
            col,
            row_absolute: false,
            col_absolute: false,
        }
    }

    /// Parse an address in A1 notation
    ///
    /// ```
    /// use sheetplot_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("$C$12").unwrap();
    /// assert_eq!((addr.row, addr.col), (11, 2));
    /// assert!(addr.row_absolute && addr.col_absolute);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let (col_absolute, rest) = match s.strip_prefix('$') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let letters_len = rest
            .bytes()
            .take_while(|b| b.is_ascii_alphabetic())
            .count();
        if letters_len == 0 {
            return Err(Error::InvalidAddress(format!("no column letters in '{}'", s)));
        }
        let (letters, rest) = rest.split_at(letters_len);
        let col = Self::letters_to_column(letters)?;

        let (row_absolute, digits) = match rest.strip_prefix('$') {
            Some(digits) => (true, digits),
            None => (false, rest),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let row: u64 = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }
        if row > MAX_ROWS as u64 {
            return Err(Error::RowOutOfBounds(
                u32::try_from(row - 1).unwrap_or(u32::MAX),
                MAX_ROWS - 1,
            ));
        }

        Ok(Self {
            row: (row - 1) as u32,
            col,
            row_absolute,
            col_absolute,
        })
    }

    /// Convert a zero-based column index to letters (0 = A, 26 = AA)
    pub fn column_to_letters(col: u16) -> String {
        let mut letters = Vec::new();
        let mut n = col as u32 + 1;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push(b'A' + rem as u8);
            n = (n - 1) / 26;
        }
        letters.iter().rev().map(|&b| b as char).collect()
    }

    /// Convert column letters to a zero-based index (case-insensitive)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if col > MAX_COLS as u32 {
                return Err(Error::ColumnOutOfBounds(u16::MAX, MAX_COLS - 1));
            }
        }

        Ok((col - 1) as u16)
    }

    /// Format as A1 notation, keeping `$` markers
    pub fn to_a1_string(&self) -> String {
        format!(
            "{}{}{}{}",
            if self.col_absolute { "$" } else { "" },
            Self::column_to_letters(self.col),
            if self.row_absolute { "$" } else { "" },
            self.row + 1
        )
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular block of cells (e.g., "A1:B10"), normalized top-left to bottom-right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    /// Top-left corner
    pub start: CellAddress,
    /// Bottom-right corner
    pub end: CellAddress,
}

impl CellRange {
    /// Create a range from two corners in any order
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        Self {
            start: CellAddress::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellAddress::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    /// Parse `A1:B3` (or a single address as a one-cell range)
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once(':') {
            Some((a, b)) => Ok(Self::new(CellAddress::parse(a)?, CellAddress::parse(b)?)),
            None => {
                let addr = CellAddress::parse(s)?;
                Ok(Self::new(addr, addr))
            }
        }
    }

    /// Check whether the range covers `addr`
    pub fn contains(&self, addr: &CellAddress) -> bool {
        (self.start.row..=self.end.row).contains(&addr.row)
            && (self.start.col..=self.end.col).contains(&addr.col)
    }

    /// Number of rows covered
    pub fn num_rows(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Number of columns covered
    pub fn num_cols(&self) -> u16 {
        self.end.col - self.start.col + 1
    }

    /// Iterate over the cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = CellAddress> + '_ {
        (self.start.row..=self.end.row)
            .flat_map(move |row| (self.start.col..=self.end.col).map(move |col| CellAddress::new(row, col)))
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple() {
        let addr = CellAddress::parse("B20").unwrap();
        assert_eq!((addr.row, addr.col), (19, 1));
        assert!(!addr.row_absolute);

        let addr = CellAddress::parse("aa3").unwrap();
        assert_eq!((addr.row, addr.col), (2, 26));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(CellAddress::parse("").is_err());
        assert!(CellAddress::parse("12").is_err());
        assert!(CellAddress::parse("A").is_err());
        assert!(CellAddress::parse("A0").is_err());
        assert!(CellAddress::parse("A1B").is_err());
        assert!(CellAddress::parse("A1048577").is_err());
        assert!(CellAddress::parse("XFE1").is_err());
        assert!(CellAddress::parse("XFD1048576").is_ok());
    }

    #[test]
    fn test_column_letters() {
        for (col, letters) in [(0, "A"), (25, "Z"), (26, "AA"), (701, "ZZ"), (702, "AAA"), (16383, "XFD")] {
            assert_eq!(CellAddress::column_to_letters(col), letters);
            assert_eq!(CellAddress::letters_to_column(letters).unwrap(), col);
        }
    }

    #[test]
    fn test_display_keeps_markers() {
        assert_eq!(CellAddress::parse("$b$2").unwrap().to_string(), "$B$2");
        assert_eq!(CellAddress::new(0, 0).to_string(), "A1");
    }

    #[test]
    fn test_range() {
        let range = CellRange::parse("C3:A1").unwrap();
        assert_eq!(range.to_string(), "A1:C3");
        assert_eq!(range.num_rows(), 3);
        assert_eq!(range.num_cols(), 3);
        assert!(range.contains(&CellAddress::new(1, 1)));
        assert!(!range.contains(&CellAddress::new(3, 0)));
        assert_eq!(range.cells().count(), 9);
    }
}
