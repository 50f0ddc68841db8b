use anchor_lang::prelude::*;
use crate::state::{presale, AllowlistEntry, ClaimReceipt, LandConfig, LandMap, Presale};
use crate::errors::LandError;

#[derive(Accounts)]
#[instruction(round: u32, entry: AllowlistEntry)]
pub struct Purchase<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    #[account(
        mut,
        seeds = [LandConfig::SEED],
        bump = land_config.bump
    )]
    pub land_config: Account<'info, LandConfig>,

    #[account(
        mut,
        constraint = land_map.key() == land_config.land_map @ LandError::Unauthorized
    )]
    pub land_map: AccountLoader<'info, LandMap>,

    #[account(
        mut,
        seeds = [Presale::SEED, &round.to_le_bytes()],
        bump = presale.bump
    )]
    pub presale: Account<'info, Presale>,

    /// Consumption flag for this allowlist entry. Created on first use so a
    /// repeated purchase reaches the handler and fails as AlreadyClaimed.
    #[account(
        init_if_needed,
        payer = buyer,
        space = 8 + ClaimReceipt::INIT_SPACE,
        seeds = [ClaimReceipt::SEED, presale.key().as_ref(), &entry.leaf_hash()],
        bump
    )]
    pub receipt: Account<'info, ClaimReceipt>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<Purchase>,
    round: u32,
    entry: AllowlistEntry,
    proof: Vec<[u8; 32]>,
    leaf_index: u32,
) -> Result<()> {
    let buyer = ctx.accounts.buyer.key();
    let presale_key = ctx.accounts.presale.key();

    let receipt = &mut ctx.accounts.receipt;
    receipt.presale = presale_key;
    receipt.bump = ctx.bumps.receipt;

    // Land, receipt and round counter are written in one transaction
    let quad = {
        let mut land_map = ctx.accounts.land_map.load_mut()?;
        presale::purchase(
            &mut *land_map,
            &mut ctx.accounts.presale,
            receipt,
            &entry,
            &proof,
            leaf_index,
            &buyer,
        )?
    };

    let config = &mut ctx.accounts.land_config;
    config.total_claimed_cells = config
        .total_claimed_cells
        .checked_add(quad.cell_count() as u64)
        .ok_or(LandError::Overflow)?;

    msg!(
        "Presale {} purchase: {}x{} at ({}, {}) for {}, price {}",
        round,
        quad.size,
        quad.size,
        quad.x,
        quad.y,
        buyer,
        entry.price
    );
    Ok(())
}
