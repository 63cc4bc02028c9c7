//! SYLK writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use lazy_regex::regex;
use regex::Captures;
use sylk_sheets_core::{Cell, CellValue, Coordinate, Group, Scalar, Worksheet};

use crate::error::SlkResult;
use crate::header::header_records;
use crate::options::SlkWriteOptions;

/// SYLK document writer
pub struct SlkWriter;

impl SlkWriter {
    /// Write a worksheet to a SYLK file
    pub fn write_file<P: AsRef<Path>>(
        worksheet: &Worksheet,
        path: P,
        options: &SlkWriteOptions,
    ) -> SlkResult<()> {
        let file = File::create(path)?;
        Self::write(worksheet, file, options)
    }

    /// Write a worksheet to a writer
    pub fn write<W: Write>(
        worksheet: &Worksheet,
        mut writer: W,
        options: &SlkWriteOptions,
    ) -> SlkResult<()> {
        let text = Self::to_string(worksheet, options)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Render a worksheet as a SYLK document
    ///
    /// # Example
    /// ```rust
    /// use sylk_sheets_core::{CellValue, Coordinate, Worksheet};
    /// use sylk_sheets_slk::{SlkWriteOptions, SlkWriter};
    ///
    /// let mut sheet = Worksheet::new("Sheet1");
    /// sheet.store(Coordinate::new(0, 0), CellValue::from(5.0)).unwrap();
    ///
    /// let text = SlkWriter::to_string(&sheet, &SlkWriteOptions::default()).unwrap();
    /// assert!(text.starts_with("ID;P"));
    /// assert!(text.ends_with("C;Y1;X1;K5\r\nE"));
    /// ```
    pub fn to_string(worksheet: &Worksheet, options: &SlkWriteOptions) -> SlkResult<String> {
        let mut records = Vec::new();
        if options.write_header {
            records.extend(header_records(&options.program_id));
        }
        records.extend(Self::cell_records(worksheet.cells())?);
        if options.write_footer {
            records.push("E".to_string());
        }

        log::debug!(
            "serialized sheet '{}' as {} SYLK records",
            worksheet.name(),
            records.len()
        );
        Ok(records.join(options.line_terminator.as_str()))
    }

    /// Write the records of a column or row group
    ///
    /// Groups are fragments: no header or footer is written, whatever the
    /// options say.
    pub fn write_group<W: Write>(
        group: &Group<'_>,
        mut writer: W,
        options: &SlkWriteOptions,
    ) -> SlkResult<()> {
        let text = Self::group_to_string(group, options)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Render the records of a column or row group, member by member
    pub fn group_to_string(group: &Group<'_>, options: &SlkWriteOptions) -> SlkResult<String> {
        let records = Self::cell_records(group.cells())?;
        Ok(records.join(options.line_terminator.as_str()))
    }

    /// The `C` record for one cell, `None` for an empty cell
    pub fn cell_record(coord: Coordinate, cell: &Cell) -> SlkResult<Option<String>> {
        if cell.is_empty() {
            return Ok(None);
        }

        let value = match cell.value() {
            CellValue::Literal(Scalar::Text(text)) => format!("K\"{}\"", text.replace(';', ";;")),
            CellValue::Literal(value) => format!("K{}", value),
            CellValue::RelativeRef(offset) => {
                let target = coord.apply(*offset)?;
                format!("E{}", relativize(&target.to_r1c1_string(), coord))
            }
            CellValue::AbsoluteRef(reference) => {
                format!("E{}", relativize(&reference.to_r1c1_string(), coord))
            }
            CellValue::Formula(record) => format!("E{}", relativize(record.serialized(), coord)),
        };

        Ok(Some(format!(
            "C;Y{};X{};{}",
            coord.row + 1,
            coord.col + 1,
            value
        )))
    }

    fn cell_records<'a>(
        cells: impl Iterator<Item = (Coordinate, &'a Cell)>,
    ) -> SlkResult<Vec<String>> {
        let mut records = Vec::new();
        for (coord, cell) in cells {
            if let Some(record) = Self::cell_record(coord, cell)? {
                records.push(record);
            }
        }
        Ok(records)
    }
}

/// Rewrite absolute `R<n>C<n>`, `R<n>` and `C<n>` coordinates in `text` as
/// offsets from `at`
///
/// A zero offset drops its brackets (`R2C2` seen from B2 is `RC`).
/// Coordinates qualified with a sheet name, quoted text and function names
/// such as `R2(` are left as they are.
///
/// # Example
/// ```rust
/// use sylk_sheets_core::Coordinate;
/// use sylk_sheets_slk::relativize;
///
/// let a4 = Coordinate::parse("A4").unwrap();
/// assert_eq!(relativize("SUM(R1C1:R3C1)", a4), "SUM(R[-3]C:R[-1]C)");
/// ```
pub fn relativize(text: &str, at: Coordinate) -> String {
    regex!(
        r#"(?P<skip>"(?:[^"]|"")*"|[^;()!"]+![RC0-9:]+)|\bR(?P<row>\d+)(?:C(?P<col>\d+))?\b(?P<call>\()?|\bC(?P<only_col>\d+)\b(?P<col_call>\()?"#
    )
    .replace_all(text, |caps: &Captures<'_>| {
        if let Some(skip) = caps.name("skip") {
            return skip.as_str().to_string();
        }
        // A function named like a coordinate
        if caps.name("call").is_some() || caps.name("col_call").is_some() {
            return caps[0].to_string();
        }
        if let Some(col) = caps.name("only_col") {
            return format!("C{}", offset_suffix(col.as_str(), at.col));
        }

        let mut out = String::from("R");
        if let Some(row) = caps.name("row") {
            out.push_str(&offset_suffix(row.as_str(), at.row));
        }
        if let Some(col) = caps.name("col") {
            out.push('C');
            out.push_str(&offset_suffix(col.as_str(), at.col));
        }
        out
    })
    .into_owned()
}

/// `[Δ]` for a 1-based absolute index seen from 0-based `own`; empty for 0
fn offset_suffix(digits: &str, own: u32) -> String {
    match digits.parse::<i64>() {
        Ok(n) => match n - (own as i64 + 1) {
            0 => String::new(),
            delta => format!("[{}]", delta),
        },
        // Too large to be a grid index; leave it absolute
        Err(_) => digits.to_string(),
    }
}
