use anchor_lang::prelude::*;

use crate::errors::LandError;

/// Side length of the land grid, in unit cells.
pub const GRID_SIZE: u16 = 408;
pub const TOTAL_CELLS: usize = (GRID_SIZE as usize) * (GRID_SIZE as usize);

/// Allowed quad sizes, ascending. Each size divides the next one, so two
/// aligned quads are either nested or disjoint.
pub const QUAD_SIZES: [u16; 5] = [1, 3, 6, 12, 24];

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, InitSpace)]
pub struct Coordinate {
    pub x: u16,
    pub y: u16,
}

impl Coordinate {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        self.x < GRID_SIZE && self.y < GRID_SIZE
    }

    /// The 1x1 quad covering this cell.
    pub fn as_quad(&self) -> Quad {
        Quad {
            x: self.x,
            y: self.y,
            size: 1,
        }
    }
}

/// A square, aligned region of the grid with `(x, y)` as its lower corner.
///
/// Quads arrive as instruction arguments, so a deserialized value is not
/// trusted until [`Quad::validate`] has accepted it.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, InitSpace)]
pub struct Quad {
    pub x: u16,
    pub y: u16,
    pub size: u16,
}

impl Quad {
    pub fn new(x: u16, y: u16, size: u16) -> Result<Self> {
        let quad = Self { x, y, size };
        quad.validate()?;
        Ok(quad)
    }

    /// Checks size membership, anchor alignment and grid bounds.
    pub fn validate(&self) -> Result<()> {
        require!(QUAD_SIZES.contains(&self.size), LandError::InvalidQuad);
        require!(
            self.x % self.size == 0 && self.y % self.size == 0,
            LandError::InvalidQuad
        );
        require!(
            self.x_end() <= GRID_SIZE as u32 && self.y_end() <= GRID_SIZE as u32,
            LandError::InvalidQuad
        );
        Ok(())
    }

    pub fn cell_count(&self) -> u32 {
        (self.size as u32) * (self.size as u32)
    }

    // Exclusive upper bounds, widened so unvalidated input cannot overflow.
    fn x_end(&self) -> u32 {
        self.x as u32 + self.size as u32
    }

    fn y_end(&self) -> u32 {
        self.y as u32 + self.size as u32
    }

    /// True when every cell of `inner` lies inside `self`.
    pub fn contains(&self, inner: &Quad) -> bool {
        self.x <= inner.x
            && self.y <= inner.y
            && inner.x_end() <= self.x_end()
            && inner.y_end() <= self.y_end()
    }

    /// True when the two quads share at least one cell.
    pub fn overlaps(&self, other: &Quad) -> bool {
        (self.x as u32) < other.x_end()
            && (other.x as u32) < self.x_end()
            && (self.y as u32) < other.y_end()
            && (other.y as u32) < self.y_end()
    }

    /// True when the quads are disjoint and share an edge segment of
    /// non-zero length. Touching only at a corner does not count.
    pub fn adjacent(&self, other: &Quad) -> bool {
        let x_touch = self.x_end() == other.x as u32 || other.x_end() == self.x as u32;
        let y_touch = self.y_end() == other.y as u32 || other.y_end() == self.y as u32;
        let x_shared = (self.x as u32) < other.x_end() && (other.x as u32) < self.x_end();
        let y_shared = (self.y as u32) < other.y_end() && (other.y as u32) < self.y_end();

        (x_touch && y_shared) || (y_touch && x_shared)
    }

    /// Enumerates the covered cells in row-major order. Clone the iterator
    /// to walk the quad again.
    pub fn unit_cells(&self) -> UnitCells {
        UnitCells {
            quad: *self,
            next: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct UnitCells {
    quad: Quad,
    next: u32,
}

impl Iterator for UnitCells {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        if self.next >= self.quad.cell_count() {
            return None;
        }
        let size = self.quad.size as u32;
        let dx = (self.next % size) as u16;
        let dy = (self.next / size) as u16;
        self.next += 1;
        Some(Coordinate::new(self.quad.x + dx, self.quad.y + dy))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.quad.cell_count() - self.next.min(self.quad.cell_count())) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for UnitCells {}

/// Validates every quad and rejects any pair that shares a cell.
pub fn ensure_disjoint(quads: &[Quad]) -> Result<()> {
    for quad in quads {
        quad.validate()?;
    }
    for (i, a) in quads.iter().enumerate() {
        for b in &quads[i + 1..] {
            if a.overlaps(b) {
                msg!(
                    "Quad ({}, {}, {}) overlaps ({}, {}, {})",
                    a.x, a.y, a.size, b.x, b.y, b.size
                );
                return err!(LandError::OverlappingQuads);
            }
        }
    }
    Ok(())
}
