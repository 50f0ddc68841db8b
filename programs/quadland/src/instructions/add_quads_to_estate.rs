use anchor_lang::prelude::*;
use crate::state::{Estate, LandConfig, LandMap, Quad};
use crate::errors::LandError;

#[derive(Accounts)]
#[instruction(estate_id: u32)]
pub struct AddQuadsToEstate<'info> {
    pub owner: Signer<'info>,

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
        bump = estate.bump,
        constraint = estate.owner == owner.key() @ LandError::NotOwner
    )]
    pub estate: Account<'info, Estate>,
}

pub fn handler(ctx: Context<AddQuadsToEstate>, estate_id: u32, quads: Vec<Quad>) -> Result<()> {
    let owner = ctx.accounts.owner.key();
    let estate = &mut ctx.accounts.estate;
    require!(estate.id == estate_id, LandError::EstateMismatch);

    {
        let mut land_map = ctx.accounts.land_map.load_mut()?;
        estate.add_quads(&mut *land_map, &owner, &quads)?;
    }

    msg!(
        "Added {} quads to estate {}, now {} cells",
        quads.len(),
        estate_id,
        estate.cell_count
    );
    Ok(())
}
