//! Range and group types

use std::ops::RangeInclusive;

use crate::cell::{Coordinate, Scalar};
use crate::error::{Error, Result};
use crate::row::Cell;
use crate::worksheet::Worksheet;

/// A rectangular block of evaluated values
///
/// Values are stored row-major. Produced by range queries and flattened into
/// function arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    start: Coordinate,
    height: u32,
    width: u32,
    values: Vec<Scalar>,
}

impl Range {
    /// Create a range from row-major values
    pub fn new(start: Coordinate, height: u32, width: u32, values: Vec<Scalar>) -> Result<Self> {
        let expected = height as usize * width as usize;
        if values.len() != expected {
            return Err(Error::LengthMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            start,
            height,
            width,
            values,
        })
    }

    /// Get the start address (top-left)
    pub fn start(&self) -> Coordinate {
        self.start
    }

    /// Get the end address (bottom-right); `None` for an empty range
    pub fn end(&self) -> Option<Coordinate> {
        if self.is_empty() {
            return None;
        }
        Some(Coordinate::new(
            self.start.row + self.height - 1,
            self.start.col + self.width - 1,
        ))
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value by position relative to the start
    pub fn get(&self, row: u32, col: u32) -> Option<&Scalar> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.values.get((row * self.width + col) as usize)
    }

    /// All values, row-major
    pub fn values(&self) -> &[Scalar] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Scalar> {
        self.values
    }

    /// Iterate over rows
    pub fn rows(&self) -> impl Iterator<Item = &[Scalar]> {
        self.values.chunks(self.width.max(1) as usize)
    }

    /// Values grouped by column, left to right
    pub fn columns(&self) -> Vec<Vec<Scalar>> {
        (0..self.width)
            .map(|col| {
                (0..self.height)
                    .filter_map(|row| self.get(row, col).cloned())
                    .collect()
            })
            .collect()
    }
}

/// Direction of a [`Group`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Columns,
}

/// A run of whole rows or whole columns of one worksheet
///
/// Borrowed view; iterating it yields the cells that exist, member by member.
#[derive(Debug, Clone)]
pub struct Group<'a> {
    worksheet: &'a Worksheet,
    axis: Axis,
    span: RangeInclusive<u32>,
}

impl<'a> Group<'a> {
    /// Create a new group
    pub fn new(worksheet: &'a Worksheet, axis: Axis, span: RangeInclusive<u32>) -> Self {
        Self {
            worksheet,
            axis,
            span,
        }
    }

    pub fn worksheet(&self) -> &'a Worksheet {
        self.worksheet
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Number of members (rows or columns)
    pub fn len(&self) -> usize {
        if self.span.is_empty() {
            0
        } else {
            (self.span.end() - self.span.start()) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cells of each member in order: column by column for a column group,
    /// row by row for a row group
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, &'a Cell)> + '_ {
        let ws = self.worksheet;
        let axis = self.axis;
        self.span.clone().flat_map(move |member| {
            let lane: Vec<(Coordinate, &'a Cell)> = match axis {
                Axis::Columns => (0..ws.row_count())
                    .filter_map(|row| {
                        ws.cell_at(row, member)
                            .map(|cell| (Coordinate::new(row, member), cell))
                    })
                    .collect(),
                Axis::Rows => ws
                    .row(member)
                    .map(|r| {
                        r.cells()
                            .map(|(col, cell)| (Coordinate::new(member, col), cell))
                            .collect()
                    })
                    .unwrap_or_default(),
            };
            lane
        })
    }
}
