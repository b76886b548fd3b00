//! NES cartridge loading and mapper support.
//!
//! - **cartridge**: loads iNES (.nes) images, holds PRG/CHR and the mapper.
//! - **mapper**: address translation per cartridge mapping scheme; NROM (0).

pub mod cartridge;
pub mod mapper;
