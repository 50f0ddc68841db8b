use anchor_lang::prelude::*;
use crate::state::{LandCells, LandConfig, LandMap, Quad};
use crate::errors::LandError;

#[derive(Accounts)]
pub struct AdminClaim<'info> {
    #[account(
        constraint = authority.key() == land_config.authority @ LandError::Unauthorized
    )]
    pub authority: Signer<'info>,

    /// CHECK: Recipient of the land (not signer)
    pub recipient: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [LandConfig::SEED],
        bump = land_config.bump
    )]
    pub land_config: Account<'info, LandConfig>,

    /// LandMap address must match the one stored in land_config
    #[account(
        mut,
        constraint = land_map.key() == land_config.land_map @ LandError::Unauthorized
    )]
    pub land_map: AccountLoader<'info, LandMap>,
}

pub fn handler(ctx: Context<AdminClaim>, quad: Quad) -> Result<()> {
    require!(ctx.accounts.land_config.minting_enabled, LandError::MintingDisabled);

    let recipient = ctx.accounts.recipient.key();
    {
        let mut land_map = ctx.accounts.land_map.load_mut()?;
        land_map.claim(&quad, &recipient)?;
    }

    let config = &mut ctx.accounts.land_config;
    config.total_claimed_cells = config
        .total_claimed_cells
        .checked_add(quad.cell_count() as u64)
        .ok_or(LandError::Overflow)?;

    msg!(
        "Admin claimed {}x{} at ({}, {}) for {}",
        quad.size,
        quad.size,
        quad.x,
        quad.y,
        recipient
    );
    Ok(())
}
