use anchor_lang::prelude::*;

use crate::errors::LandError;
use crate::state::{ensure_disjoint, Coordinate, LandCell, LandCells, Quad};

pub const MAX_ESTATE_QUADS: usize = 32;

/// A composite holding folded from quads of a single owner.
///
/// The cell side of the index lives in the land map: every cell covered by
/// `quads` carries `estate_id == id` and `owner == owner`. Both sides are
/// only ever written together, inside one transition.
#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Estate {
    /// Estate id, also the PDA seed. Never 0.
    pub id: u32,
    /// Owner of the estate and of every constituent cell
    pub owner: Pubkey,
    /// Disjoint quads making up the estate
    #[max_len(32)]
    pub quads: Vec<Quad>,
    /// Number of unit cells across all quads
    pub cell_count: u32,
    /// PDA bump seed
    pub bump: u8,
}

impl Estate {
    pub const SEED: &'static [u8] = b"estate";

    /// Folds `quads` into a new estate. Every covered cell must be owned by
    /// `owner` and free of any estate; nothing is written unless all are.
    pub fn fold<L: LandCells>(
        land: &mut L,
        id: u32,
        owner: Pubkey,
        quads: Vec<Quad>,
        bump: u8,
    ) -> Result<Estate> {
        require!(id != 0, LandError::EstateMismatch);
        require!(owner != Pubkey::default(), LandError::InvalidOwner);
        require!(!quads.is_empty(), LandError::EmptyEstate);
        require!(quads.len() <= MAX_ESTATE_QUADS, LandError::TooManyQuads);

        let cell_count = check_foldable(land, &quads, &owner)?;
        bind_cells(land, &quads, owner, id);

        Ok(Estate {
            id,
            owner,
            quads,
            cell_count,
            bump,
        })
    }

    /// Folds further quads of the owner into this estate.
    pub fn add_quads<L: LandCells>(
        &mut self,
        land: &mut L,
        owner: &Pubkey,
        quads: &[Quad],
    ) -> Result<()> {
        require!(self.owner == *owner, LandError::NotOwner);
        require!(!quads.is_empty(), LandError::EmptyEstate);
        require!(
            self.quads.len() + quads.len() <= MAX_ESTATE_QUADS,
            LandError::TooManyQuads
        );

        // Cells already in this estate carry its id and fail as AlreadyInEstate
        let added = check_foldable(land, quads, owner)?;
        let cell_count = self
            .cell_count
            .checked_add(added)
            .ok_or(LandError::Overflow)?;

        bind_cells(land, quads, self.owner, self.id);
        self.quads.extend_from_slice(quads);
        self.cell_count = cell_count;
        Ok(())
    }

    /// Moves the whole estate, and with it every constituent cell, to `to`.
    pub fn transfer<L: LandCells>(&mut self, land: &mut L, from: &Pubkey, to: &Pubkey) -> Result<()> {
        require!(self.owner == *from, LandError::NotOwner);
        require!(*to != Pubkey::default(), LandError::InvalidOwner);

        for at in self.cells() {
            let cell = land.cell(at);
            if cell.estate_id != self.id || cell.owner != self.owner {
                msg!("Cell ({}, {}) is out of sync with estate {}", at.x, at.y, self.id);
                return err!(LandError::EstateMismatch);
            }
        }

        bind_cells(land, &self.quads, *to, self.id);
        self.owner = *to;
        Ok(())
    }

    /// Constituent cells, quad by quad.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + Clone + '_ {
        self.quads.iter().flat_map(|quad| quad.unit_cells())
    }
}

/// Returns the number of cells covered by `quads` if all of them can join
/// an estate of `owner`.
fn check_foldable<L: LandCells>(land: &L, quads: &[Quad], owner: &Pubkey) -> Result<u32> {
    ensure_disjoint(quads)?;

    let mut cells: u32 = 0;
    for quad in quads {
        for at in quad.unit_cells() {
            let cell = land.cell(at);
            if !cell.is_owned() || cell.owner != *owner {
                msg!("Cell ({}, {}) is not owned by {}", at.x, at.y, owner);
                return err!(LandError::NotOwned);
            }
            if cell.in_estate() {
                msg!("Cell ({}, {}) already belongs to estate {}", at.x, at.y, cell.estate_id);
                return err!(LandError::AlreadyInEstate);
            }
        }
        cells = cells
            .checked_add(quad.cell_count())
            .ok_or(LandError::Overflow)?;
    }
    Ok(cells)
}

fn bind_cells<L: LandCells>(land: &mut L, quads: &[Quad], owner: Pubkey, estate_id: u32) {
    for quad in quads {
        for at in quad.unit_cells() {
            land.set_cell(at, LandCell { owner, estate_id });
        }
    }
}
