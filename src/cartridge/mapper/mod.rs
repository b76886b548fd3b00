//! Cartridge mappers: PRG/CHR address translation schemes.
//!
//! NROM (mapper 0) and the common types shared by all mappers.

/// Nametable mirroring mode for the PPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

pub mod mapper;
pub mod nrom;
