//! Mapper 0 (NROM): no bank switching, 16/32 KiB PRG, 8 KiB CHR.

use log::warn;

use crate::cartridge::cartridge::RomError;
use crate::cartridge::mapper::mapper::Mapper;

const PRG_BANK_SIZE: usize = 16 * 1024;
const CHR_SIZE: usize = 8 * 1024;

/// NROM: fixed banks. A single 16 KiB PRG bank is mirrored across the full
/// 32 KiB window; 32 KiB PRG fills it directly. PRG and CHR are ROM, so
/// writes are hardware no-ops.
pub struct Nrom {
    dual_bank: bool,
}

impl Nrom {
    pub fn new(prg_len: usize, chr_len: usize) -> Result<Self, RomError> {
        let valid_prg = prg_len == PRG_BANK_SIZE || prg_len == 2 * PRG_BANK_SIZE;
        if !valid_prg || chr_len != CHR_SIZE {
            return Err(RomError::SanityCheck(0));
        }

        Ok(Self {
            dual_bank: prg_len == 2 * PRG_BANK_SIZE,
        })
    }
}

impl Mapper for Nrom {
    fn read_prg(&self, prg: &[u8], offset: u16) -> u8 {
        let mut offset = offset as usize;
        if !self.dual_bank && offset >= PRG_BANK_SIZE {
            offset -= PRG_BANK_SIZE;
        }
        prg[offset]
    }

    fn write_prg(&self, _prg: &mut [u8], offset: u16, _data: u8) {
        warn!("attempted write to NROM cartridge PRG at offset {offset:#06X}");
    }

    fn read_chr(&self, chr: &[u8], offset: u16) -> u8 {
        chr[offset as usize]
    }

    fn write_chr(&self, _chr: &mut [u8], offset: u16, _data: u8) {
        warn!("attempted write to NROM cartridge CHR at offset {offset:#06X}");
    }
}
