//! Workbook type - the owner of all sheets

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
///
/// The workbook is the sole owner of its worksheets and the registry through
/// which cross-sheet references are resolved. Sheet names are unique,
/// compared case-insensitively; removing a sheet deregisters its name.
#[derive(Debug)]
pub struct Workbook {
    /// Worksheets in the workbook
    worksheets: Vec<Worksheet>,
}

impl Workbook {
    /// Create a new empty workbook with one worksheet
    pub fn new() -> Self {
        Self {
            worksheets: vec![Worksheet::new("Sheet1")],
        }
    }

    /// Create an empty workbook with no worksheets
    pub fn empty() -> Self {
        Self {
            worksheets: Vec::new(),
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get a worksheet by name (case-insensitive)
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets
            .iter()
            .find(|ws| ws.name().eq_ignore_ascii_case(name))
    }

    /// Get a mutable worksheet by name (case-insensitive)
    pub fn worksheet_by_name_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.worksheets
            .iter_mut()
            .find(|ws| ws.name().eq_ignore_ascii_case(name))
    }

    /// Get a worksheet by name, failing with [`Error::SheetNotFound`]
    pub fn sheet(&self, name: &str) -> Result<&Worksheet> {
        self.worksheet_by_name(name)
            .ok_or_else(|| Error::SheetNotFound(name.into()))
    }

    /// Mutable variant of [`Workbook::sheet`]
    pub fn sheet_mut(&mut self, name: &str) -> Result<&mut Worksheet> {
        self.worksheet_by_name_mut(name)
            .ok_or_else(|| Error::SheetNotFound(name.into()))
    }

    /// Get the index of a worksheet by name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.worksheets
            .iter()
            .position(|ws| ws.name().eq_ignore_ascii_case(name))
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a new worksheet with default name
    pub fn add_worksheet(&mut self) -> Result<usize> {
        let name = self.generate_sheet_name();
        self.add_worksheet_with_name(&name)
    }

    /// Add a new worksheet with specified name
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;

        let index = self.worksheets.len();
        self.worksheets.push(Worksheet::new(name));
        log::debug!("registered sheet '{}' at index {}", name, index);

        Ok(index)
    }

    /// Remove a worksheet by name
    ///
    /// References into the removed sheet fail with [`Error::SheetNotFound`]
    /// the next time they are evaluated.
    pub fn remove_worksheet(&mut self, name: &str) -> Result<Worksheet> {
        let index = self
            .sheet_index(name)
            .ok_or_else(|| Error::SheetNotFound(name.into()))?;
        log::debug!("deregistered sheet '{}'", name);
        Ok(self.worksheets.remove(index))
    }

    /// Validate a name for a new sheet
    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.len() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        // Characters that would break the reference grammar
        const INVALID_CHARS: &[char] = &['!', ':', ';', '(', ')', '"', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        let duplicate = self
            .worksheets
            .iter()
            .any(|ws| ws.name().eq_ignore_ascii_case(name));
        if duplicate {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }

    /// Generate a unique sheet name
    fn generate_sheet_name(&self) -> String {
        let mut n = self.worksheets.len() + 1;
        loop {
            let name = format!("Sheet{}", n);
            if self.validate_sheet_name(&name).is_ok() {
                return name;
            }
            n += 1;
        }
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_workbook() {
        let wb = Workbook::new();
        assert_eq!(wb.sheet_count(), 1);
        assert_eq!(wb.worksheet(0).unwrap().name(), "Sheet1");
        assert!(Workbook::empty().is_empty());
    }

    #[test]
    fn test_add_worksheets() {
        let mut wb = Workbook::new();

        let idx = wb.add_worksheet().unwrap();
        assert_eq!(idx, 1);
        assert_eq!(wb.worksheet(1).unwrap().name(), "Sheet2");

        let idx = wb.add_worksheet_with_name("Data").unwrap();
        assert_eq!(idx, 2);
        assert_eq!(wb.worksheet(2).unwrap().name(), "Data");
    }

    #[test]
    fn test_duplicate_name() {
        let mut wb = Workbook::new();

        // Case-insensitive duplicate check
        assert!(matches!(
            wb.add_worksheet_with_name("SHEET1"),
            Err(Error::DuplicateSheetName(_))
        ));
        assert_eq!(wb.sheet_count(), 1);
    }

    #[test]
    fn test_invalid_sheet_name() {
        let mut wb = Workbook::new();

        assert!(wb.add_worksheet_with_name("").is_err());
        assert!(wb.add_worksheet_with_name("Sheet!1").is_err());
        assert!(wb.add_worksheet_with_name("Sheet:1").is_err());
        assert!(wb.add_worksheet_with_name("a;b").is_err());

        let long_name = "A".repeat(MAX_SHEET_NAME_LEN + 1);
        assert!(wb.add_worksheet_with_name(&long_name).is_err());
    }

    #[test]
    fn test_remove_deregisters_name() {
        let mut wb = Workbook::new();
        wb.add_worksheet_with_name("Data").unwrap();

        let removed = wb.remove_worksheet("data").unwrap();
        assert_eq!(removed.name(), "Data");
        assert!(wb.worksheet_by_name("Data").is_none());
        assert!(matches!(wb.sheet("Data"), Err(Error::SheetNotFound(_))));

        // The name can be registered again
        assert!(wb.add_worksheet_with_name("Data").is_ok());
    }
}
