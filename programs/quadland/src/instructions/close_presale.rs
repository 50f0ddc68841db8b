use anchor_lang::prelude::*;
use crate::state::{LandConfig, Presale};
use crate::errors::LandError;

#[derive(Accounts)]
#[instruction(round: u32)]
pub struct ClosePresale<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [LandConfig::SEED],
        bump = land_config.bump,
        has_one = authority @ LandError::Unauthorized,
    )]
    pub land_config: Account<'info, LandConfig>,

    #[account(
        mut,
        seeds = [Presale::SEED, &round.to_le_bytes()],
        bump = presale.bump
    )]
    pub presale: Account<'info, Presale>,
}

pub fn handler(ctx: Context<ClosePresale>, round: u32) -> Result<()> {
    let presale = &mut ctx.accounts.presale;
    presale.active = false;

    msg!(
        "Presale round {} closed after {} purchases",
        round,
        presale.entries_claimed
    );
    Ok(())
}
