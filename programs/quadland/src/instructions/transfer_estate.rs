use anchor_lang::prelude::*;
use crate::state::{Estate, LandConfig, LandMap};
use crate::errors::LandError;

#[derive(Accounts)]
#[instruction(estate_id: u32)]
pub struct TransferEstate<'info> {
    pub owner: Signer<'info>,

    /// CHECK: New owner of the estate (not signer)
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

    #[account(
        mut,
        seeds = [Estate::SEED, &estate_id.to_le_bytes()],
        bump = estate.bump
    )]
    pub estate: Account<'info, Estate>,
}

pub fn handler(ctx: Context<TransferEstate>, estate_id: u32) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let recipient = ctx.accounts.recipient.key();
    let estate = &mut ctx.accounts.estate;
    require!(estate.id == estate_id, LandError::EstateMismatch);

    {
        let mut land_map = ctx.accounts.land_map.load_mut()?;
        estate.transfer(&mut *land_map, &owner, &recipient)?;
    }

    msg!(
        "Estate {} ({} cells) transferred from {} to {}",
        estate_id,
        estate.cell_count,
        owner,
        recipient
    );
    Ok(())
}
