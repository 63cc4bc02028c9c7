//! Worksheet type

use std::ops::RangeInclusive;

use crate::cache::CoordinateCache;
use crate::cell::{CellValue, Coordinate};
use crate::error::{Error, Result};
use crate::range::{Axis, Group};
use crate::row::{Cell, CellId, Row};
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
///
/// Rows are stored in order and grow on demand: writing past the end of the
/// sheet or of a row fills the gap with blank cells. A cell's coordinate is
/// derived from where it sits, see [`Worksheet::locate`].
#[derive(Debug)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Rows; the row index is the position
    rows: Vec<Row>,
    /// Next cell identity to hand out
    next_id: u64,
    /// Last known coordinate per cell identity
    locations: CoordinateCache,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
            next_id: 0,
            locations: CoordinateCache::default(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell Access ===

    /// Number of rows, including rows that only hold blank cells
    pub fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Length of the longest row
    pub fn width(&self) -> u32 {
        self.rows.iter().map(Row::len).max().unwrap_or(0) as u32
    }

    /// Get a row by index
    pub fn row(&self, index: u32) -> Option<&Row> {
        self.rows.get(index as usize)
    }

    /// Iterate over rows in order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u32) -> Option<&Cell> {
        self.row(row).and_then(|r| r.get(col))
    }

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&Cell>> {
        let coord = Coordinate::parse(address)?;
        Ok(self.cell_at(coord.row, coord.col))
    }

    /// Iterate over all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, &Cell)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.cells()
                .map(move |(c, cell)| (Coordinate::new(r as u32, c), cell))
        })
    }

    /// Group of whole columns, both ends inclusive
    pub fn column_group(&self, span: RangeInclusive<u32>) -> Group<'_> {
        Group::new(self, Axis::Columns, span)
    }

    /// Group of whole rows, both ends inclusive
    pub fn row_group(&self, span: RangeInclusive<u32>) -> Group<'_> {
        Group::new(self, Axis::Rows, span)
    }

    // === Mutation ===

    /// Store a value at `coord`, replacing whatever cell was there
    ///
    /// The new cell gets a fresh identity. Rows and cells are created as
    /// needed to reach the coordinate.
    pub fn store(&mut self, coord: Coordinate, value: CellValue) -> Result<CellId> {
        if coord.row >= MAX_ROWS || coord.col >= MAX_COLS {
            return Err(Error::InvalidAddress(format!(
                "row {} column {} is outside the grid",
                coord.row, coord.col
            )));
        }

        while self.rows.len() <= coord.row as usize {
            self.rows.push(Row::new());
        }

        let id = self.allocate_id();
        let next_id = &mut self.next_id;
        self.rows[coord.row as usize].put(coord.col, Cell::new(id, value), || {
            let filler = CellId(*next_id);
            *next_id += 1;
            Cell::new(filler, CellValue::blank())
        });

        self.locations.invalidate();
        Ok(id)
    }

    /// Insert an empty row before `at`, shifting later rows down
    ///
    /// Fails with [`Error::InvalidAddress`] if `at` is outside the grid or
    /// the sheet already has the maximum number of rows.
    pub fn insert_row(&mut self, at: u32) -> Result<()> {
        if at >= MAX_ROWS || self.row_count() >= MAX_ROWS {
            return Err(Error::InvalidAddress(format!(
                "cannot insert row {} into a sheet of {} rows",
                at,
                self.row_count()
            )));
        }

        let at = at as usize;
        while self.rows.len() < at {
            self.rows.push(Row::new());
        }
        self.rows.insert(at, Row::new());
        self.locations.invalidate();
        Ok(())
    }

    /// Remove the row at `at`, shifting later rows up
    pub fn remove_row(&mut self, at: u32) -> Option<Row> {
        if at as usize >= self.rows.len() {
            return None;
        }
        let row = self.rows.remove(at as usize);
        self.locations.invalidate();
        Some(row)
    }

    /// Copy the stored value of `from` into a new cell at `to`
    ///
    /// Relative references keep their offset, so they resolve against the
    /// new location.
    pub fn copy_cell(&mut self, from: Coordinate, to: Coordinate) -> Result<CellId> {
        let value = self
            .cell_at(from.row, from.col)
            .map(|cell| cell.value().clone())
            .unwrap_or_default();
        self.store(to, value)
    }

    /// Record row `index` and the sheet length so a failed multi-cell
    /// assignment can be undone with [`Worksheet::restore_row`]
    pub fn snapshot_row(&self, index: u32) -> RowSnapshot {
        RowSnapshot {
            index: index as usize,
            row: self.row(index).cloned(),
            row_count: self.rows.len(),
        }
    }

    /// Put a row back as it was when `snapshot` was taken
    ///
    /// Only undoes writes to that one row: rows created past the old end of
    /// the sheet are dropped again.
    pub fn restore_row(&mut self, snapshot: RowSnapshot) {
        let RowSnapshot {
            index,
            row,
            row_count,
        } = snapshot;
        if let (Some(row), Some(slot)) = (row, self.rows.get_mut(index)) {
            *slot = row;
        }
        self.rows.truncate(row_count);
        self.locations.invalidate();
    }

    // === Coordinates ===

    /// Find the current coordinate of a cell by identity
    ///
    /// Scans the rows on a cache miss. Results are cached until the next
    /// structural mutation.
    pub fn locate(&self, id: CellId) -> Result<Coordinate> {
        if let Some(coord) = self.locations.get(id) {
            log::trace!("coordinate cache hit for {} in '{}'", id, self.name);
            return Ok(coord);
        }

        log::trace!("coordinate cache miss for {} in '{}'", id, self.name);
        let coord = self
            .cells()
            .find(|(_, cell)| cell.id() == id)
            .map(|(coord, _)| coord)
            .ok_or_else(|| Error::CoordinateNotFound {
                sheet: self.name.clone(),
                cell: id,
            })?;

        self.locations.insert(id, coord);
        Ok(coord)
    }

    fn allocate_id(&mut self) -> CellId {
        let id = CellId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// A copy of one row taken by [`Worksheet::snapshot_row`]
#[derive(Debug, Clone)]
pub struct RowSnapshot {
    index: usize,
    row: Option<Row>,
    row_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Scalar;

    fn at(a1: &str) -> Coordinate {
        Coordinate::parse(a1).unwrap()
    }

    #[test]
    fn test_store_grows_grid() {
        let mut ws = Worksheet::new("Sheet1");
        ws.store(at("C2"), CellValue::from(5.0)).unwrap();

        assert_eq!(ws.row_count(), 2);
        assert_eq!(ws.width(), 3);
        assert!(ws.row(0).unwrap().is_empty());
        assert_eq!(ws.row(1).unwrap().len(), 3);
        assert!(ws.cell_at(1, 0).unwrap().is_empty());
        assert_eq!(
            ws.cell("C2").unwrap().unwrap().value(),
            &CellValue::Literal(Scalar::Number(5.0))
        );
    }

    #[test]
    fn test_store_rejects_outside_grid() {
        let mut ws = Worksheet::new("Sheet1");
        assert!(ws.store(Coordinate::new(MAX_ROWS, 0), CellValue::blank()).is_err());
        assert_eq!(ws.row_count(), 0);
    }

    #[test]
    fn test_replacement_gets_new_identity() {
        let mut ws = Worksheet::new("Sheet1");
        let first = ws.store(at("A1"), CellValue::from(1.0)).unwrap();
        let second = ws.store(at("A1"), CellValue::from(2.0)).unwrap();

        assert_ne!(first, second);
        assert!(matches!(
            ws.locate(first),
            Err(Error::CoordinateNotFound { .. })
        ));
        assert_eq!(ws.locate(second).unwrap(), at("A1"));
    }

    #[test]
    fn test_locate_uses_cache_until_mutation() {
        let mut ws = Worksheet::new("Sheet1");
        let id = ws.store(at("B2"), CellValue::from(1.0)).unwrap();

        assert_eq!(ws.locations.len(), 0);
        assert_eq!(ws.locate(id).unwrap(), at("B2"));
        assert_eq!(ws.locations.len(), 1);
        assert_eq!(ws.locate(id).unwrap(), at("B2"));

        ws.insert_row(0).unwrap();
        assert_eq!(ws.locations.len(), 0);
        assert_eq!(ws.locate(id).unwrap(), at("B3"));

        ws.remove_row(0);
        ws.remove_row(0);
        assert_eq!(ws.locate(id).unwrap(), at("B1"));
    }

    #[test]
    fn test_remove_row_out_of_range() {
        let mut ws = Worksheet::new("Sheet1");
        assert!(ws.remove_row(0).is_none());
    }

    #[test]
    fn test_insert_row_rejects_outside_grid() {
        let mut ws = Worksheet::new("Sheet1");
        ws.store(at("A1"), CellValue::from(1.0)).unwrap();

        for row in [MAX_ROWS, MAX_ROWS + 7, u32::MAX] {
            assert!(matches!(
                ws.insert_row(row),
                Err(Error::InvalidAddress(_))
            ));
        }
        assert_eq!(ws.row_count(), 1);

        ws.insert_row(MAX_ROWS - 1).unwrap();
        assert_eq!(ws.row_count(), MAX_ROWS);
        assert!(matches!(ws.insert_row(0), Err(Error::InvalidAddress(_))));
        assert_eq!(ws.row_count(), MAX_ROWS);
    }

    #[test]
    fn test_restore_row() {
        let mut ws = Worksheet::new("Sheet1");
        let a1 = ws.store(at("A1"), CellValue::from(1.0)).unwrap();

        let snapshot = ws.snapshot_row(0);
        ws.store(at("A1"), CellValue::from(2.0)).unwrap();
        ws.store(at("C1"), CellValue::from(3.0)).unwrap();
        ws.restore_row(snapshot);

        assert_eq!(ws.row(0).unwrap().len(), 1);
        assert_eq!(ws.locate(a1).unwrap(), at("A1"));
        assert_eq!(ws.cell_at(0, 0).unwrap().value(), &CellValue::from(1.0));

        let snapshot = ws.snapshot_row(3);
        ws.store(at("B4"), CellValue::from(4.0)).unwrap();
        assert_eq!(ws.row_count(), 4);
        ws.restore_row(snapshot);
        assert_eq!(ws.row_count(), 1);
    }

    #[test]
    fn test_copy_cell() {
        let mut ws = Worksheet::new("Sheet1");
        ws.store(at("A1"), CellValue::from("x")).unwrap();
        let id = ws.copy_cell(at("A1"), at("D4")).unwrap();

        assert_eq!(ws.locate(id).unwrap(), at("D4"));
        assert_eq!(ws.cell_at(3, 3).unwrap().value(), &CellValue::from("x"));

        // Copying from outside the used area copies a blank
        let id = ws.copy_cell(at("Z99"), at("A2")).unwrap();
        assert!(ws.cell_at(1, 0).unwrap().is_empty());
        assert_eq!(ws.locate(id).unwrap(), at("A2"));
    }

    #[test]
    fn test_cells_row_major() {
        let mut ws = Worksheet::new("Sheet1");
        ws.store(at("B2"), CellValue::from(4.0)).unwrap();
        ws.store(at("A1"), CellValue::from(1.0)).unwrap();

        let coords: Vec<_> = ws.cells().map(|(c, _)| c.to_string()).collect();
        assert_eq!(coords, vec!["A1", "A2", "B2"]);
    }
}
