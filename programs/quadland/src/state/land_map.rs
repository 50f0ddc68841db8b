use anchor_lang::prelude::*;

use crate::errors::LandError;
use crate::state::{Coordinate, Quad, TOTAL_CELLS};
use crate::utils::cell_index;

/// Ownership record for one unit cell.
/// `owner == Pubkey::default()` means unowned, `estate_id == 0` means the
/// cell is not folded into an estate.
#[zero_copy(unsafe)]
#[repr(C)]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct LandCell {
    pub owner: Pubkey,
    pub estate_id: u32,
}

impl LandCell {
    pub const LEN: usize = 32 + 4;

    pub fn owned_by(owner: Pubkey) -> Self {
        Self { owner, estate_id: 0 }
    }

    pub fn is_owned(&self) -> bool {
        self.owner != Pubkey::default()
    }

    pub fn in_estate(&self) -> bool {
        self.estate_id != 0
    }
}

#[account(zero_copy(unsafe))]
#[repr(C)]
pub struct LandMap {
    pub cells: [LandCell; TOTAL_CELLS],
}

impl LandMap {
    pub const SIZE: usize = 8 + LandCell::LEN * TOTAL_CELLS; // 5992712 bytes
}

/// Per-cell land state. The registry operations are provided on top of
/// `cell`/`set_cell`, and every multi-cell write checks all cells before
/// touching any of them.
pub trait LandCells {
    fn cell(&self, at: Coordinate) -> LandCell;

    fn set_cell(&mut self, at: Coordinate, cell: LandCell);

    /// Current owner, or `None` for unowned and out-of-grid cells.
    fn owner_of(&self, at: Coordinate) -> Option<Pubkey> {
        if !at.in_bounds() {
            return None;
        }
        let cell = self.cell(at);
        cell.is_owned().then_some(cell.owner)
    }

    fn estate_of(&self, at: Coordinate) -> Option<u32> {
        if !at.in_bounds() {
            return None;
        }
        let cell = self.cell(at);
        cell.in_estate().then_some(cell.estate_id)
    }

    /// Assigns every cell of an entirely unowned quad to `owner`.
    fn claim(&mut self, quad: &Quad, owner: &Pubkey) -> Result<()> {
        quad.validate()?;
        require!(*owner != Pubkey::default(), LandError::InvalidOwner);

        if let Some(at) = quad.unit_cells().find(|&at| self.cell(at).is_owned()) {
            msg!("Cell ({}, {}) is already owned", at.x, at.y);
            return err!(LandError::AlreadyOwned);
        }

        for at in quad.unit_cells() {
            self.set_cell(at, LandCell::owned_by(*owner));
        }
        Ok(())
    }

    /// Moves a quad held by `from` outside of any estate to `to`.
    fn transfer_quad(&mut self, quad: &Quad, from: &Pubkey, to: &Pubkey) -> Result<()> {
        quad.validate()?;
        require!(*from != Pubkey::default(), LandError::NotOwner);
        require!(*to != Pubkey::default(), LandError::InvalidOwner);

        for at in quad.unit_cells() {
            let cell = self.cell(at);
            if cell.owner != *from {
                msg!("Cell ({}, {}) is not owned by {}", at.x, at.y, from);
                return err!(LandError::NotOwner);
            }
            if cell.in_estate() {
                msg!("Cell ({}, {}) belongs to estate {}", at.x, at.y, cell.estate_id);
                return err!(LandError::PartOfEstate);
            }
        }

        for at in quad.unit_cells() {
            self.set_cell(at, LandCell::owned_by(*to));
        }
        Ok(())
    }
}

impl LandCells for LandMap {
    fn cell(&self, at: Coordinate) -> LandCell {
        self.cells[cell_index(at)]
    }

    fn set_cell(&mut self, at: Coordinate, cell: LandCell) {
        self.cells[cell_index(at)] = cell;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::SparseLand;

    fn quad(x: u16, y: u16, size: u16) -> Quad {
        Quad::new(x, y, size).unwrap()
    }

    #[test]
    fn test_claim_assigns_every_cell() {
        let mut land = SparseLand::default();
        let alice = Pubkey::new_unique();
        let q = quad(6, 12, 6);

        land.claim(&q, &alice).unwrap();

        for at in q.unit_cells() {
            assert_eq!(land.owner_of(at), Some(alice));
            assert_eq!(land.estate_of(at), None);
        }
        assert_eq!(land.owner_of(Coordinate::new(5, 12)), None);
        assert_eq!(land.owner_of(Coordinate::new(12, 12)), None);
    }

    #[test]
    fn test_second_claim_fails() {
        let mut land = SparseLand::default();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let q = quad(0, 0, 3);

        land.claim(&q, &alice).unwrap();
        assert_eq!(land.claim(&q, &bob).unwrap_err(), LandError::AlreadyOwned.into());
        assert_eq!(land.claim(&q, &alice).unwrap_err(), LandError::AlreadyOwned.into());
    }

    #[test]
    fn test_claim_smaller_quad_inside_owned_land_fails() {
        let mut land = SparseLand::default();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        land.claim(&quad(0, 0, 3), &alice).unwrap();
        assert_eq!(
            land.claim(&quad(0, 0, 1), &bob).unwrap_err(),
            LandError::AlreadyOwned.into()
        );
        assert_eq!(land.owner_of(Coordinate::new(0, 0)), Some(alice));
    }

    #[test]
    fn test_claim_partial_conflict_is_all_or_nothing() {
        let mut land = SparseLand::default();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        // One cell in the far corner of the 6x6 quad is taken
        land.claim(&quad(5, 5, 1), &alice).unwrap();
        let before = land.clone();

        assert_eq!(
            land.claim(&quad(0, 0, 6), &bob).unwrap_err(),
            LandError::AlreadyOwned.into()
        );
        assert_eq!(land, before);
        assert_eq!(land.owner_of(Coordinate::new(0, 0)), None);
    }

    #[test]
    fn test_claim_rejects_invalid_input() {
        let mut land = SparseLand::default();
        let bad = Quad { x: 2, y: 0, size: 3 };

        assert_eq!(
            land.claim(&bad, &Pubkey::new_unique()).unwrap_err(),
            LandError::InvalidQuad.into()
        );
        assert_eq!(
            land.claim(&quad(0, 0, 1), &Pubkey::default()).unwrap_err(),
            LandError::InvalidOwner.into()
        );
        assert_eq!(land, SparseLand::default());
    }

    #[test]
    fn test_transfer_quad() {
        let mut land = SparseLand::default();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        land.claim(&quad(0, 0, 6), &alice).unwrap();
        land.transfer_quad(&quad(3, 3, 3), &alice, &bob).unwrap();

        assert_eq!(land.owner_of(Coordinate::new(3, 3)), Some(bob));
        assert_eq!(land.owner_of(Coordinate::new(5, 5)), Some(bob));
        assert_eq!(land.owner_of(Coordinate::new(2, 2)), Some(alice));
    }

    #[test]
    fn test_transfer_quad_requires_ownership() {
        let mut land = SparseLand::default();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        land.claim(&quad(0, 0, 3), &alice).unwrap();
        let before = land.clone();

        // Bob does not own it
        assert_eq!(
            land.transfer_quad(&quad(0, 0, 3), &bob, &alice).unwrap_err(),
            LandError::NotOwner.into()
        );
        // Only part of the 6x6 is Alice's
        assert_eq!(
            land.transfer_quad(&quad(0, 0, 6), &alice, &bob).unwrap_err(),
            LandError::NotOwner.into()
        );
        // Sending land to the default key would silently unown it
        assert_eq!(
            land.transfer_quad(&quad(0, 0, 3), &alice, &Pubkey::default()).unwrap_err(),
            LandError::InvalidOwner.into()
        );
        // Unowned land cannot be moved by pretending to be the default key
        assert_eq!(
            land.transfer_quad(&quad(6, 6, 3), &Pubkey::default(), &bob).unwrap_err(),
            LandError::NotOwner.into()
        );
        assert_eq!(land, before);
    }

    #[test]
    fn test_transfer_quad_rejects_estate_land() {
        let mut land = SparseLand::default();
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();

        land.claim(&quad(0, 0, 3), &alice).unwrap();
        land.set_cell(
            Coordinate::new(1, 1),
            LandCell {
                owner: alice,
                estate_id: 9,
            },
        );
        let before = land.clone();

        assert_eq!(
            land.transfer_quad(&quad(0, 0, 3), &alice, &bob).unwrap_err(),
            LandError::PartOfEstate.into()
        );
        assert_eq!(land, before);
    }

    #[test]
    fn test_owner_of_out_of_grid() {
        let land = SparseLand::default();
        assert_eq!(land.owner_of(Coordinate::new(408, 0)), None);
        assert_eq!(land.owner_of(Coordinate::new(0, u16::MAX)), None);
    }
}
