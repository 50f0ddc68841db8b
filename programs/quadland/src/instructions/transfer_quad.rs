use anchor_lang::prelude::*;
use crate::state::{LandCells, LandConfig, LandMap, Quad};
use crate::errors::LandError;

#[derive(Accounts)]
pub struct TransferQuad<'info> {
    pub owner: Signer<'info>,

    /// CHECK: New owner of the quad (not signer)
    pub recipient: UncheckedAccount<'info>,

    #[account(
        seeds = [LandConfig::SEED],
        bump = land_config.bump
    )]
    pub land_config: Account<'info, LandConfig>,

    #[account(
        mut,
        constraint = land_map.key() == land_config.land_map @ LandError::Unauthorized
    )]
    pub land_map: AccountLoader<'info, LandMap>,
}

pub fn handler(ctx: Context<TransferQuad>, quad: Quad) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let recipient = ctx.accounts.recipient.key();

    let mut land_map = ctx.accounts.land_map.load_mut()?;
    land_map.transfer_quad(&quad, &owner, &recipient)?;

    msg!(
        "Quad ({}, {}, {}) transferred from {} to {}",
        quad.x,
        quad.y,
        quad.size,
        owner,
        recipient
    );
    Ok(())
}
