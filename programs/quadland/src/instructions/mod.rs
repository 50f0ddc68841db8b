#![allow(ambiguous_glob_reexports)]

pub mod create_land_map;
pub mod initialize;
pub mod update_config;
pub mod admin_claim;
pub mod transfer_quad;
pub mod create_estate;
pub mod add_quads_to_estate;
pub mod transfer_estate;
pub mod start_presale;
pub mod close_presale;
pub mod purchase;

pub use create_land_map::*;
pub use initialize::*;
pub use update_config::*;
pub use admin_claim::*;
pub use transfer_quad::*;
pub use create_estate::*;
pub use add_quads_to_estate::*;
pub use transfer_estate::*;
pub use start_presale::*;
pub use close_presale::*;
pub use purchase::*;
