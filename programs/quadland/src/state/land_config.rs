use anchor_lang::prelude::*;

#[account]
#[derive(InitSpace)]
pub struct LandConfig {
    pub authority: Pubkey,
    pub land_map: Pubkey, // Address of the LandMap account (not a PDA due to 10KB CPI limit)
    /// Id handed to the next estate; 0 is reserved for "no estate"
    pub next_estate_id: u32,
    pub next_presale_round: u32,
    /// Gates `admin_claim`
    pub minting_enabled: bool,
    /// Cells claimed through `admin_claim` and `purchase`
    pub total_claimed_cells: u64,
    pub bump: u8,
    pub _padding: [u8; 64],
}

impl LandConfig {
    pub const SEED: &'static [u8] = b"land_config";
}
