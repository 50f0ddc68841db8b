use anchor_lang::prelude::*;
use crate::state::{LandConfig, Presale, SiblingOrder};
use crate::errors::LandError;

#[derive(Accounts)]
pub struct StartPresale<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LandConfig::SEED],
        bump = land_config.bump,
        has_one = authority @ LandError::Unauthorized,
    )]
    pub land_config: Account<'info, LandConfig>,

    #[account(
        init,
        payer = authority,
        space = 8 + Presale::INIT_SPACE,
        seeds = [Presale::SEED, &land_config.next_presale_round.to_le_bytes()],
        bump
    )]
    pub presale: Account<'info, Presale>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<StartPresale>,
    merkle_root: [u8; 32],
    sibling_order: SiblingOrder,
) -> Result<()> {
    let round = ctx.accounts.land_config.next_presale_round;

    let presale = &mut ctx.accounts.presale;
    presale.round = round;
    presale.merkle_root = merkle_root;
    presale.sibling_order = sibling_order;
    presale.active = true;
    presale.entries_claimed = 0;
    presale.bump = ctx.bumps.presale;

    let config = &mut ctx.accounts.land_config;
    config.next_presale_round = config
        .next_presale_round
        .checked_add(1)
        .ok_or(LandError::Overflow)?;

    msg!("Presale round {} started with {:?} pairing", round, sibling_order);
    Ok(())
}
