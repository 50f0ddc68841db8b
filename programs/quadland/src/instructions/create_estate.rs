use anchor_lang::prelude::*;
use crate::state::{Estate, LandConfig, LandMap, Quad};
use crate::errors::LandError;

#[derive(Accounts)]
pub struct CreateEstate<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

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
        init,
        payer = owner,
        space = 8 + Estate::INIT_SPACE,
        seeds = [Estate::SEED, &land_config.next_estate_id.to_le_bytes()],
        bump
    )]
    pub estate: Account<'info, Estate>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateEstate>, quads: Vec<Quad>) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let estate_id = ctx.accounts.land_config.next_estate_id;

    let estate = {
        let mut land_map = ctx.accounts.land_map.load_mut()?;
        Estate::fold(&mut *land_map, estate_id, owner, quads, ctx.bumps.estate)?
    };
    let quad_count = estate.quads.len();
    let cell_count = estate.cell_count;
    ctx.accounts.estate.set_inner(estate);

    let config = &mut ctx.accounts.land_config;
    config.next_estate_id = config
        .next_estate_id
        .checked_add(1)
        .ok_or(LandError::Overflow)?;

    msg!(
        "Estate {} created for {} from {} quads ({} cells)",
        estate_id,
        owner,
        quad_count,
        cell_count
    );
    Ok(())
}
