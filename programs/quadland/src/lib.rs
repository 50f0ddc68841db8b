use anchor_lang::prelude::*;

pub mod errors;
pub mod state;
pub mod utils;
pub mod instructions;

#[cfg(test)]
mod test_utils;

use instructions::*;
use state::{AllowlistEntry, Quad, SiblingOrder};

declare_id!("9AMNM6Akropq8mHsC6gJCSS3zC5Q8J458pfYBdoV2MjM");

#[program]
pub mod quadland {
    use super::*;

    pub fn create_land_map(ctx: Context<CreateLandMap>) -> Result<()> {
        instructions::create_land_map::handler(ctx)
    }

    pub fn initialize(ctx: Context<Initialize>, minting_enabled: bool) -> Result<()> {
        instructions::initialize::handler(ctx, minting_enabled)
    }

    pub fn update_config(
        ctx: Context<UpdateConfig>,
        minting_enabled: Option<bool>,
        new_authority: Option<Pubkey>,
    ) -> Result<()> {
        instructions::update_config::handler(ctx, minting_enabled, new_authority)
    }

    /// Claim unowned land for a recipient (land admin path)
    pub fn admin_claim(ctx: Context<AdminClaim>, quad: Quad) -> Result<()> {
        instructions::admin_claim::handler(ctx, quad)
    }

    pub fn transfer_quad(ctx: Context<TransferQuad>, quad: Quad) -> Result<()> {
        instructions::transfer_quad::handler(ctx, quad)
    }

    /// Fold owned quads into a new estate
    pub fn create_estate(ctx: Context<CreateEstate>, quads: Vec<Quad>) -> Result<()> {
        instructions::create_estate::handler(ctx, quads)
    }

    pub fn add_quads_to_estate(
        ctx: Context<AddQuadsToEstate>,
        estate_id: u32,
        quads: Vec<Quad>,
    ) -> Result<()> {
        instructions::add_quads_to_estate::handler(ctx, estate_id, quads)
    }

    pub fn transfer_estate(ctx: Context<TransferEstate>, estate_id: u32) -> Result<()> {
        instructions::transfer_estate::handler(ctx, estate_id)
    }

    /// Publish the allowlist root for a new presale round
    pub fn start_presale(
        ctx: Context<StartPresale>,
        merkle_root: [u8; 32],
        sibling_order: SiblingOrder,
    ) -> Result<()> {
        instructions::start_presale::handler(ctx, merkle_root, sibling_order)
    }

    pub fn close_presale(ctx: Context<ClosePresale>, round: u32) -> Result<()> {
        instructions::close_presale::handler(ctx, round)
    }

    /// Buy an allowlisted parcel with its Merkle proof
    pub fn purchase(
        ctx: Context<Purchase>,
        round: u32,
        entry: AllowlistEntry,
        proof: Vec<[u8; 32]>,
        leaf_index: u32,
    ) -> Result<()> {
        instructions::purchase::handler(ctx, round, entry, proof, leaf_index)
    }
}
