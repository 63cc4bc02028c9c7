//! SYLK output for worksheets and row/column groups

use std::io::Write;

use sylk_sheets_core::{Group, Result, Worksheet};
use sylk_sheets_slk::{SlkWriteOptions, SlkWriter};

/// Extension trait adding SYLK output to sheets and groups
///
/// A worksheet renders as a full document; a group renders only its cell
/// records, with no header or footer.
pub trait SylkExt {
    /// Render with the given options
    fn to_sylk_with(&self, options: &SlkWriteOptions) -> Result<String>;

    /// Write to `writer` with the given options
    fn write_sylk<W: Write>(&self, writer: W, options: &SlkWriteOptions) -> Result<()>;

    /// Render with the default options
    fn to_sylk(&self) -> Result<String> {
        self.to_sylk_with(&SlkWriteOptions::default())
    }
}

impl SylkExt for Worksheet {
    fn to_sylk_with(&self, options: &SlkWriteOptions) -> Result<String> {
        Ok(SlkWriter::to_string(self, options)?)
    }

    fn write_sylk<W: Write>(&self, writer: W, options: &SlkWriteOptions) -> Result<()> {
        Ok(SlkWriter::write(self, writer, options)?)
    }
}

impl SylkExt for Group<'_> {
    fn to_sylk_with(&self, options: &SlkWriteOptions) -> Result<String> {
        Ok(SlkWriter::group_to_string(self, options)?)
    }

    fn write_sylk<W: Write>(&self, writer: W, options: &SlkWriteOptions) -> Result<()> {
        Ok(SlkWriter::write_group(self, writer, options)?)
    }
}
