use std::collections::HashMap;

use crate::state::{Coordinate, LandCell, LandCells};

/// In-memory land store for tests; the full `LandMap` is several megabytes.
/// Cells never written read as unowned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SparseLand {
    cells: HashMap<Coordinate, LandCell>,
}

impl LandCells for SparseLand {
    fn cell(&self, at: Coordinate) -> LandCell {
        self.cells.get(&at).copied().unwrap_or_default()
    }

    fn set_cell(&mut self, at: Coordinate, cell: LandCell) {
        self.cells.insert(at, cell);
    }
}
