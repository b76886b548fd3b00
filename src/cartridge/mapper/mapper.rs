//! Mapper trait and the ID-keyed factory.

use crate::cartridge::cartridge::RomError;
use crate::cartridge::mapper::nrom::Nrom;

/// Address translation for one cartridge mapping scheme.
///
/// Offsets are window-relative: PRG offsets count from $8000, CHR offsets
/// from $0000. Storage stays owned by the cartridge and is borrowed per call.
///
/// `Send` lets the whole machine move onto the emulation thread.
pub trait Mapper: Send {
    /// Read from the PRG window ($8000–$FFFF, offset from $8000).
    fn read_prg(&self, prg: &[u8], offset: u16) -> u8;
    /// Write to the PRG window (mapper registers or PRG RAM, where present).
    fn write_prg(&self, prg: &mut [u8], offset: u16, data: u8);
    /// Read from the CHR space ($0000–$1FFF).
    fn read_chr(&self, chr: &[u8], offset: u16) -> u8;
    /// Write to the CHR space.
    fn write_chr(&self, chr: &mut [u8], offset: u16, data: u8);
}

/// Construct the mapper named by the iNES header, validating that the PRG/CHR
/// geometry is one the scheme supports.
pub fn create_mapper(
    id: u8,
    prg_len: usize,
    chr_len: usize,
) -> Result<Box<dyn Mapper>, RomError> {
    match id {
        0 => Ok(Box::new(Nrom::new(prg_len, chr_len)?)),
        _ => Err(RomError::UnsupportedMapper(id)),
    }
}
