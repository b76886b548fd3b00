//! iNES (.nes) cartridge images: header parsing, PRG/CHR storage, mapper wiring.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::cartridge::mapper::Mirroring;
use crate::cartridge::mapper::mapper::{self, Mapper};

const HEADER_SIZE: usize = 16;
const PRG_UNIT: usize = 16 * 1024;
const CHR_UNIT: usize = 8 * 1024;

/// Everything that can go wrong turning a byte image into a playable cartridge.
///
/// All of these surface through `load_rom` as values; none abort the process.
#[derive(Debug, Error)]
pub enum RomError {
    #[error("not an iNES ROM (missing NES magic)")]
    BadMagic,
    #[error("ROM image is shorter than its header declares")]
    Truncated,
    #[error("ROMs with trainers are not supported")]
    TrainerPresent,
    #[error("NES 2.0 ROMs are not supported")]
    Nes2Format,
    #[error("unsupported mapper with ID {0}")]
    UnsupportedMapper(u8),
    #[error("sanity check failed for mapper with ID {0}")]
    SanityCheck(u8),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// TV system declared in header byte 9.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TvSystem {
    Ntsc,
    Pal,
}

/// A cartridge: PRG/CHR byte storage plus the mapper that translates
/// CPU/PPU-visible offsets into that storage.
///
/// Constructed empty and populated once by [`load_raw_bytes`](Self::load_raw_bytes);
/// storage sizes never change afterwards.
pub struct Cartridge {
    prg: Vec<u8>,
    chr: Vec<u8>,
    mirroring: Mirroring,
    mapper: Option<Box<dyn Mapper>>,
    tv_system: TvSystem,
    has_prg_ram: bool,
}

impl Cartridge {
    pub fn new() -> Self {
        Self {
            prg: Vec::new(),
            chr: Vec::new(),
            mirroring: Mirroring::Horizontal,
            mapper: None,
            tv_system: TvSystem::Ntsc,
            has_prg_ram: false,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), RomError> {
        let data = fs::read(path)?;
        self.load_raw_bytes(&data)
    }

    /// Parse an iNES image and take ownership of its PRG/CHR payload.
    pub fn load_raw_bytes(&mut self, data: &[u8]) -> Result<(), RomError> {
        if data.len() < HEADER_SIZE || &data[0..3] != b"NES" {
            return Err(RomError::BadMagic);
        }

        let prg_size = data[4] as usize * PRG_UNIT;
        let chr_size = data[5] as usize * CHR_UNIT;

        let flags6 = data[6];
        let flags7 = data[7];

        if flags6 & 0x04 != 0 {
            return Err(RomError::TrainerPresent);
        }
        if (flags7 >> 2) & 0x03 == 0x02 {
            return Err(RomError::Nes2Format);
        }

        self.mirroring = if flags6 & 0x08 != 0 {
            Mirroring::FourScreen
        } else if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        self.tv_system = if data[9] & 0x01 != 0 {
            TvSystem::Pal
        } else {
            TvSystem::Ntsc
        };
        self.has_prg_ram = data[10] & 0x10 != 0;

        let mapper_id = (flags7 & 0xF0) | (flags6 >> 4);
        let mapper = mapper::create_mapper(mapper_id, prg_size, chr_size)?;

        let prg_end = HEADER_SIZE + prg_size;
        let chr_end = prg_end + chr_size;
        if data.len() < chr_end {
            return Err(RomError::Truncated);
        }

        self.prg = data[HEADER_SIZE..prg_end].to_vec();
        self.chr = data[prg_end..chr_end].to_vec();
        self.mapper = Some(mapper);

        Ok(())
    }

    /// Read through the mapper: `offset` counts from $8000.
    pub fn mapped_read_prg(&self, offset: u16) -> u8 {
        match &self.mapper {
            Some(mapper) => mapper.read_prg(&self.prg, offset),
            None => 0,
        }
    }

    pub fn mapped_write_prg(&mut self, offset: u16, data: u8) {
        if let Some(mapper) = &self.mapper {
            mapper.write_prg(&mut self.prg, offset, data);
        }
    }

    /// Read through the mapper: `offset` is a raw PPU pattern-table address.
    pub fn mapped_read_chr(&self, offset: u16) -> u8 {
        match &self.mapper {
            Some(mapper) => mapper.read_chr(&self.chr, offset),
            None => 0,
        }
    }

    pub fn mapped_write_chr(&mut self, offset: u16, data: u8) {
        if let Some(mapper) = &self.mapper {
            mapper.write_chr(&mut self.chr, offset, data);
        }
    }

    /// Raw storage access, bypassing the mapper.
    pub fn direct_read_prg(&self, index: usize) -> u8 {
        self.prg[index]
    }

    pub fn direct_write_prg(&mut self, index: usize, data: u8) {
        self.prg[index] = data;
    }

    pub fn direct_read_chr(&self, index: usize) -> u8 {
        self.chr[index]
    }

    pub fn direct_write_chr(&mut self, index: usize, data: u8) {
        self.chr[index] = data;
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub fn set_mirroring(&mut self, mirroring: Mirroring) {
        self.mirroring = mirroring;
    }

    pub fn tv_system(&self) -> TvSystem {
        self.tv_system
    }

    pub fn has_prg_ram(&self) -> bool {
        self.has_prg_ram
    }
}

impl Default for Cartridge {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal valid iNES image: `prg_banks` 16 KiB PRG banks, `chr_banks`
    /// 8 KiB CHR banks, all payload bytes zero.
    fn build_rom(prg_banks: u8, chr_banks: u8) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_SIZE];
        data[0..4].copy_from_slice(b"NES\x1A");
        data[4] = prg_banks;
        data[5] = chr_banks;
        data.resize(
            HEADER_SIZE + prg_banks as usize * PRG_UNIT + chr_banks as usize * CHR_UNIT,
            0,
        );
        data
    }

    fn loaded(data: &[u8]) -> Cartridge {
        let mut cart = Cartridge::new();
        cart.load_raw_bytes(data).unwrap();
        cart
    }

    #[test]
    fn accepts_single_and_dual_bank_nrom() {
        let mut cart = Cartridge::new();
        assert!(cart.load_raw_bytes(&build_rom(1, 1)).is_ok());
        assert!(cart.load_raw_bytes(&build_rom(2, 1)).is_ok());
    }

    #[test]
    fn rejects_bad_magic() {
        let mut data = build_rom(1, 1);
        data[0] = b'X';

        let mut cart = Cartridge::new();
        assert!(matches!(
            cart.load_raw_bytes(&data),
            Err(RomError::BadMagic)
        ));
    }

    #[test]
    fn rejects_trainer_and_nes2() {
        let mut with_trainer = build_rom(1, 1);
        with_trainer[6] = 0x04;
        let mut cart = Cartridge::new();
        assert!(matches!(
            cart.load_raw_bytes(&with_trainer),
            Err(RomError::TrainerPresent)
        ));

        let mut nes2 = build_rom(1, 1);
        nes2[7] = 0x08;
        assert!(matches!(
            cart.load_raw_bytes(&nes2),
            Err(RomError::Nes2Format)
        ));
    }

    #[test]
    fn rejects_unknown_mapper_id() {
        let mut data = build_rom(1, 1);
        data[6] = 0x10; // mapper low nibble = 1

        let mut cart = Cartridge::new();
        assert!(matches!(
            cart.load_raw_bytes(&data),
            Err(RomError::UnsupportedMapper(1))
        ));
    }

    #[test]
    fn rejects_nrom_with_bad_geometry() {
        let mut cart = Cartridge::new();
        assert!(matches!(
            cart.load_raw_bytes(&build_rom(3, 1)),
            Err(RomError::SanityCheck(0))
        ));
        assert!(matches!(
            cart.load_raw_bytes(&build_rom(1, 2)),
            Err(RomError::SanityCheck(0))
        ));
    }

    #[test]
    fn rejects_truncated_payload() {
        let mut data = build_rom(1, 1);
        data.truncate(data.len() - 1);

        let mut cart = Cartridge::new();
        assert!(matches!(
            cart.load_raw_bytes(&data),
            Err(RomError::Truncated)
        ));
    }

    #[test]
    fn single_bank_prg_is_mirrored_across_the_window() {
        let mut cart = loaded(&build_rom(1, 1));
        cart.direct_write_prg(0x000F, 0xAB);

        assert_eq!(cart.mapped_read_prg(0x000F), 0xAB);
        assert_eq!(cart.mapped_read_prg(0x400F), 0xAB);
    }

    #[test]
    fn dual_bank_prg_is_not_mirrored() {
        let mut cart = loaded(&build_rom(2, 1));
        cart.direct_write_prg(0x4001, 0xCD);

        assert_eq!(cart.mapped_read_prg(0x4001), 0xCD);
        assert_eq!(cart.mapped_read_prg(0x0001), 0x00);
    }

    #[test]
    fn chr_reads_pass_through() {
        let mut cart = loaded(&build_rom(1, 1));
        cart.direct_write_chr(0x0123, 0x42);

        assert_eq!(cart.mapped_read_chr(0x0123), 0x42);
    }

    #[test]
    fn nrom_writes_are_no_ops() {
        let mut cart = loaded(&build_rom(1, 1));
        cart.mapped_write_prg(0x0000, 0xFF);
        cart.mapped_write_chr(0x0000, 0xFF);

        assert_eq!(cart.direct_read_prg(0x0000), 0x00);
        assert_eq!(cart.direct_read_chr(0x0000), 0x00);
    }

    #[test]
    fn parses_mirroring_and_misc_flags() {
        let mut vertical = build_rom(1, 1);
        vertical[6] = 0x01;
        assert_eq!(loaded(&vertical).mirroring(), Mirroring::Vertical);

        let mut four_screen = build_rom(1, 1);
        four_screen[6] = 0x08;
        assert_eq!(loaded(&four_screen).mirroring(), Mirroring::FourScreen);

        let mut pal = build_rom(1, 1);
        pal[9] = 0x01;
        pal[10] = 0x10;
        let cart = loaded(&pal);
        assert_eq!(cart.tv_system(), TvSystem::Pal);
        assert!(cart.has_prg_ram());
    }
}
