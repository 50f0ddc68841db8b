use anchor_lang::prelude::*;
use crate::state::LandMap;

/// Marks a client-allocated `LandMap` as initialized.
///
/// At `LandMap::SIZE` (8-byte discriminator plus 36 bytes for each of the
/// 408 x 408 cells, just under 6MB) the map cannot be allocated from inside
/// the program, so it is not a PDA. The client creates it with
/// `SystemProgram.createAccount`, owned by this program and zero-filled,
/// in the same transaction or before calling this instruction.
#[derive(Accounts)]
pub struct CreateLandMap<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Zero-filled, `LandMap::SIZE` bytes, owned by this program
    #[account(zero)]
    pub land_map: AccountLoader<'info, LandMap>,
}

pub fn handler(ctx: Context<CreateLandMap>) -> Result<()> {
    // All-zero cells are unowned and outside any estate
    let _land_map = ctx.accounts.land_map.load_init()?;
    msg!(
        "LandMap initialized at {} ({} bytes)",
        ctx.accounts.land_map.key(),
        LandMap::SIZE
    );
    Ok(())
}
