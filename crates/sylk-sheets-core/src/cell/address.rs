//! Coordinates, relative offsets and A1-style address text

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

/// A cell position (e.g., "B2" is row 1, column 1)
///
/// Both indices are 0-based internally. The text form uses bijective base-26
/// column letters (A-Z, then AA) and 1-based row numbers. Ordering is
/// row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ..., Z=25, AA=26)
    pub col: u32,
}

/// The difference between two coordinates, as stored by relative references
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Offset {
    pub row: i64,
    pub col: i64,
}

impl Offset {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    pub fn is_zero(&self) -> bool {
        self.row == 0 && self.col == 0
    }
}

impl Coordinate {
    /// Create a coordinate from 0-based row and column indices
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse a coordinate from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use sylk_sheets_core::Coordinate;
    ///
    /// let b2 = Coordinate::parse("B2").unwrap();
    /// assert_eq!(b2.col, 1);
    /// assert_eq!(b2.row, 1);
    ///
    /// // Letters are case-insensitive
    /// assert_eq!(Coordinate::parse("aa10").unwrap(), Coordinate::new(9, 26));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let split = s
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(s.len());
        let (letters, digits) = s.split_at(split);

        if letters.is_empty() {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }
        if digits.is_empty() {
            return Err(Error::InvalidAddress(format!("no row number in '{}'", s)));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!(
                "invalid row number in '{}'",
                s
            )));
        }

        let col = Self::letters_to_column(letters)?;
        let row = Self::parse_row_number(digits)?;

        Ok(Self { row, col })
    }

    /// Parse a 1-based row number into a 0-based row index
    pub fn parse_row_number(digits: &str) -> Result<u32> {
        let row: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number '{}'", digits)))?;

        // Rows are 1-based in text, 0-based internally
        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1, got '{}'",
                digits
            )));
        }
        if row > MAX_ROWS {
            return Err(Error::InvalidAddress(format!(
                "row {} exceeds the maximum of {}",
                row, MAX_ROWS
            )));
        }

        Ok(row - 1)
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut result = String::new();
        let mut n = col as u64 + 1; // 1-based for calculation

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    ///
    /// Letters are digits 1..=26 of a bijective base-26 number, so there is
    /// no letter standing for zero.
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u64 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u64 - 'A' as u64 + 1);
            if col > MAX_COLS as u64 {
                return Err(Error::InvalidAddress(format!(
                    "column '{}' exceeds the maximum of {}",
                    letters, MAX_COLS
                )));
            }
        }

        Ok((col - 1) as u32)
    }

    /// Offset that leads from `base` to `self`
    pub fn offset_from(&self, base: Coordinate) -> Offset {
        Offset {
            row: self.row as i64 - base.row as i64,
            col: self.col as i64 - base.col as i64,
        }
    }

    /// Apply a relative offset to this coordinate
    ///
    /// Fails if the result would fall outside the grid; in particular
    /// `target.offset_from(base)` applied to `base` always yields `target`.
    pub fn apply(&self, offset: Offset) -> Result<Coordinate> {
        let row = self.row as i64 + offset.row;
        let col = self.col as i64 + offset.col;

        if row < 0 || col < 0 || row >= MAX_ROWS as i64 || col >= MAX_COLS as i64 {
            return Err(Error::ReferenceOutOfGrid {
                row: offset.row,
                col: offset.col,
            });
        }

        Ok(Coordinate {
            row: row as u32,
            col: col as u32,
        })
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row + 1)
    }

    /// Format as absolute R1C1-style string (1-based)
    pub fn to_r1c1_string(&self) -> String {
        format!("R{}C{}", self.row + 1, self.col + 1)
    }
}

impl Sub for Coordinate {
    type Output = Offset;

    fn sub(self, base: Coordinate) -> Offset {
        self.offset_from(base)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_letters_to_column() {
        assert_eq!(Coordinate::letters_to_column("A").unwrap(), 0);
        assert_eq!(Coordinate::letters_to_column("Z").unwrap(), 25);
        assert_eq!(Coordinate::letters_to_column("AA").unwrap(), 26);
        assert_eq!(Coordinate::letters_to_column("AZ").unwrap(), 51);
        assert_eq!(Coordinate::letters_to_column("BA").unwrap(), 52);
        assert_eq!(Coordinate::letters_to_column("ZZ").unwrap(), 701);
        assert_eq!(Coordinate::letters_to_column("AAA").unwrap(), 702);

        // Case insensitive
        assert_eq!(Coordinate::letters_to_column("az").unwrap(), 51);
    }

    #[test]
    fn test_letters_to_column_errors() {
        assert!(matches!(
            Coordinate::letters_to_column(""),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(
            Coordinate::letters_to_column("A1"),
            Err(Error::InvalidAddress(_))
        ));
        assert!(Coordinate::letters_to_column("ZZZZZZZZZZZZZZ").is_err());
    }

    #[test]
    fn test_column_to_letters() {
        assert_eq!(Coordinate::column_to_letters(0), "A");
        assert_eq!(Coordinate::column_to_letters(25), "Z");
        assert_eq!(Coordinate::column_to_letters(26), "AA");
        assert_eq!(Coordinate::column_to_letters(51), "AZ");
        assert_eq!(Coordinate::column_to_letters(52), "BA");
        assert_eq!(Coordinate::column_to_letters(702), "AAA");
    }

    #[test]
    fn test_parse() {
        let b2 = Coordinate::parse("B2").unwrap();
        assert_eq!(b2.col, 1);
        assert_eq!(b2.row, 1);

        assert_eq!(Coordinate::parse("a1").unwrap(), Coordinate::new(0, 0));
        assert_eq!(Coordinate::parse("AB12").unwrap(), Coordinate::new(11, 27));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Coordinate::parse("").is_err());
        assert!(Coordinate::parse("A").is_err());
        assert!(Coordinate::parse("1").is_err());
        assert!(Coordinate::parse("A0").is_err());
        assert!(Coordinate::parse("1A").is_err());
        assert!(Coordinate::parse("A1B").is_err());
        assert!(Coordinate::parse("A-1").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Coordinate::new(0, 0).to_string(), "A1");
        assert_eq!(Coordinate::new(99, 2).to_string(), "C100");
        assert_eq!(Coordinate::new(1, 1).to_r1c1_string(), "R2C2");
    }

    #[test]
    fn test_offset_algebra() {
        let a1 = Coordinate::parse("A1").unwrap();
        let b2 = Coordinate::parse("B2").unwrap();

        let offset = a1 - b2;
        assert_eq!(offset, Offset::new(-1, -1));
        assert_eq!(b2.apply(offset).unwrap(), a1);

        // Same offset reapplied from a copy location
        let c5 = Coordinate::parse("C5").unwrap();
        assert_eq!(c5.apply(offset).unwrap(), Coordinate::parse("B4").unwrap());
    }

    #[test]
    fn test_apply_outside_grid() {
        let a1 = Coordinate::new(0, 0);
        assert!(matches!(
            a1.apply(Offset::new(-1, 0)),
            Err(Error::ReferenceOutOfGrid { row: -1, col: 0 })
        ));
    }

    proptest! {
        #[test]
        fn prop_offset_inverse_law(
            ar in 0u32..MAX_ROWS, ac in 0u32..MAX_COLS,
            br in 0u32..MAX_ROWS, bc in 0u32..MAX_COLS,
        ) {
            let a = Coordinate::new(ar, ac);
            let b = Coordinate::new(br, bc);
            prop_assert_eq!(b.apply(a.offset_from(b)).unwrap(), a);
        }

        #[test]
        fn prop_column_letters_bijective(col in 0u32..MAX_COLS) {
            let letters = Coordinate::column_to_letters(col);
            prop_assert_eq!(Coordinate::letters_to_column(&letters).unwrap(), col);
        }
    }
}
