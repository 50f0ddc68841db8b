pub mod quad;
pub mod land_map;
pub mod land_config;
pub mod estate;
pub mod merkle;
pub mod presale;

pub use quad::*;
pub use land_map::*;
pub use land_config::*;
pub use estate::*;
pub use merkle::*;
pub use presale::*;
