use std::collections::BTreeMap;

use crate::op::Cell;

/// Sparse integer memory.
///
/// ```text
///   [0] [1] [2] [3] [4] ...
///    0   7   0   0  -2
///        ▲           ▲
///        └── stored ─┘   everything else reads as 0
/// ```
///
/// Puzzles suggest a size for display, but any index can be written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Memory {
    cells: BTreeMap<Cell, i64>,
}

impl Memory {
    pub fn get(&self, cell: Cell) -> i64 {
        self.cells.get(&cell).copied().unwrap_or(0)
    }

    pub fn set(&mut self, cell: Cell, value: i64) {
        self.cells.insert(cell, value);
    }

    /// Number of cells that have been written
    pub fn used(&self) -> usize {
        self.cells.len()
    }

    /// The first `size` cells, unset ones as 0
    pub fn cells(&self, size: usize) -> Vec<i64> {
        (0..size).map(|cell| self.get(cell)).collect()
    }
}
