use anchor_lang::prelude::*;
use crate::state::LandConfig;
use crate::errors::LandError;

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        constraint = authority.key() == land_config.authority @ LandError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LandConfig::SEED],
        bump = land_config.bump
    )]
    pub land_config: Account<'info, LandConfig>,
}

pub fn handler(
    ctx: Context<UpdateConfig>,
    minting_enabled: Option<bool>,
    new_authority: Option<Pubkey>,
) -> Result<()> {
    let config = &mut ctx.accounts.land_config;

    if let Some(enabled) = minting_enabled {
        config.minting_enabled = enabled;
        msg!("Updated minting_enabled to {}", enabled);
    }

    if let Some(authority) = new_authority {
        require!(authority != Pubkey::default(), LandError::InvalidOwner);
        config.authority = authority;
        msg!("Updated authority to {}", authority);
    }

    Ok(())
}
