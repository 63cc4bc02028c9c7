//! Row and cell types

use crate::cell::CellValue;
use std::fmt;

/// Identity of a cell within its worksheet
///
/// A cell keeps its identity while rows around it are inserted or removed,
/// and gets a fresh one whenever it is replaced by an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) u64);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single cell
#[derive(Debug, Clone)]
pub struct Cell {
    id: CellId,
    value: CellValue,
}

impl Cell {
    pub(crate) fn new(id: CellId, value: CellValue) -> Self {
        Self { id, value }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    /// The stored value (not evaluated)
    pub fn value(&self) -> &CellValue {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// An ordered sequence of cells; the column index is the position
#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells in row, including blank ones
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a cell by column index
    pub fn get(&self, col: u32) -> Option<&Cell> {
        self.cells.get(col as usize)
    }

    /// Iterate over cells with their column index
    pub fn cells(&self) -> impl Iterator<Item = (u32, &Cell)> {
        self.cells.iter().enumerate().map(|(c, cell)| (c as u32, cell))
    }

    /// Put `cell` at `col`, filling any gap with cells from `filler`
    pub(crate) fn put(&mut self, col: u32, cell: Cell, mut filler: impl FnMut() -> Cell) {
        let col = col as usize;
        while self.cells.len() < col {
            self.cells.push(filler());
        }
        if col < self.cells.len() {
            self.cells[col] = cell;
        } else {
            self.cells.push(cell);
        }
    }
}
