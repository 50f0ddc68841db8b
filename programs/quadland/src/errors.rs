use anchor_lang::prelude::*;

#[error_code]
pub enum LandError {
    #[msg("Invalid quad geometry")]
    InvalidQuad,

    #[msg("Owner cannot be the default key")]
    InvalidOwner,

    #[msg("Land is already owned")]
    AlreadyOwned,

    #[msg("Caller does not own this land")]
    NotOwner,

    #[msg("Land is part of an estate")]
    PartOfEstate,

    #[msg("Land is already in an estate")]
    AlreadyInEstate,

    #[msg("Land is not owned by the estate owner")]
    NotOwned,

    #[msg("Allowlist entry already claimed")]
    AlreadyClaimed,

    #[msg("Allowlist entry is reserved for another buyer")]
    NotReserved,

    #[msg("Invalid merkle proof")]
    InvalidProof,

    #[msg("Estate needs at least one quad")]
    EmptyEstate,

    #[msg("Quads overlap")]
    OverlappingQuads,

    #[msg("Too many quads for one estate")]
    TooManyQuads,

    #[msg("Estate does not match land records")]
    EstateMismatch,

    #[msg("Presale is closed")]
    PresaleClosed,

    #[msg("Minting is disabled")]
    MintingDisabled,

    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Arithmetic overflow")]
    Overflow,
}
