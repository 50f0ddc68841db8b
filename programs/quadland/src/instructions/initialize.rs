use anchor_lang::prelude::*;
use crate::state::{LandConfig, LandMap};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = 8 + LandConfig::INIT_SPACE,
        seeds = [LandConfig::SEED],
        bump
    )]
    pub land_config: Account<'info, LandConfig>,

    /// LandMap must be created first via create_land_map instruction.
    /// Not a PDA - uses keypair account due to 10KB CPI limit for large accounts.
    #[account(mut)]
    pub land_map: AccountLoader<'info, LandMap>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>, minting_enabled: bool) -> Result<()> {
    let config = &mut ctx.accounts.land_config;

    config.authority = ctx.accounts.authority.key();
    config.land_map = ctx.accounts.land_map.key();
    config.next_estate_id = 1; // 0 means no estate
    config.next_presale_round = 0;
    config.minting_enabled = minting_enabled;
    config.total_claimed_cells = 0;
    config.bump = ctx.bumps.land_config;
    config._padding = [0u8; 64];

    msg!(
        "Land initialized with map {}, minting {}",
        config.land_map,
        if minting_enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}
