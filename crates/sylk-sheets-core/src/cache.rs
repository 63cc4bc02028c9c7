//! Coordinate cache for cell identity lookups

use crate::cell::Coordinate;
use crate::row::CellId;
use ahash::AHashMap;
use std::cell::RefCell;

/// Remembers where a cell was last found
///
/// Entries stay valid until the next structural mutation of the owning
/// worksheet; the worksheet calls [`CoordinateCache::invalidate`] from every
/// `&mut` method that moves, adds or replaces cells.
#[derive(Debug, Default)]
pub(crate) struct CoordinateCache {
    entries: RefCell<AHashMap<CellId, Coordinate>>,
}

impl CoordinateCache {
    pub fn get(&self, id: CellId) -> Option<Coordinate> {
        self.entries.borrow().get(&id).copied()
    }

    pub fn insert(&self, id: CellId, coord: Coordinate) {
        self.entries.borrow_mut().insert(id, coord);
    }

    pub fn invalidate(&mut self) {
        let entries = self.entries.get_mut();
        if !entries.is_empty() {
            log::trace!("invalidating {} cached coordinates", entries.len());
            entries.clear();
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}
