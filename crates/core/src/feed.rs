//! The grid sequence
//!
//! An append-only list of cells between resets. Order is insertion order and
//! is what the renderer lays out left-to-right, top-to-bottom.

use rand::Rng;

use crate::cell::Cell;

#[derive(Debug, Clone, Default)]
pub struct BoxFeed {
    cells: Vec<Cell>,
    epoch: u64,
}

impl BoxFeed {
    pub const fn new() -> Self {
        Self {
            cells: Vec::new(),
            epoch: 0,
        }
    }

    /// Bumped by every [`clear`](Self::clear); a renderer that has drawn an
    /// older epoch must rebuild instead of appending.
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Append `count` freshly colored cells, returning how many were added
    pub fn append_random<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> usize {
        self.cells.reserve(count);
        self.cells.extend((0..count).map(|_| Cell::random(rng)));
        count
    }

    /// Drop every cell, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.cells.len();
        self.cells.clear();
        self.epoch += 1;
        removed
    }

    /// Flip one cell's activated flag
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        self.cells.get_mut(index).map(Cell::toggle)
    }
}
