use crate::state::{Coordinate, GRID_SIZE};

/// Row-major index of a cell in the land map.
pub fn cell_index(at: Coordinate) -> usize {
    (at.y as usize) * (GRID_SIZE as usize) + (at.x as usize)
}

/// Compares two hashes without exiting on the first differing byte.
pub fn hashes_equal(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
