//! The NES CPU bus as an ordered table of address-range handlers.
//!
//! Each region claims a closed address range; the first registered region
//! containing an address wins, so mirrors must be registered after the
//! regions they shadow. Regions either own plain byte storage or dispatch to
//! one of the devices the bus owns (PPU, APU, joypads, cartridge). Unclaimed
//! addresses are logged and read as 0.

use log::warn;

use crate::apu::Apu;
use crate::bus::Bus;
use crate::cartridge::cartridge::Cartridge;
use crate::joypad::Joypad;
use crate::mmu::range::AddressRange;
use crate::ppu::ppu::{DrawCallback, Ppu};

/// How a region resolves accesses.
#[derive(Clone, Copy, Debug)]
pub enum Handler {
    /// Index the region's own bytes by `addr - range.from`.
    Backed,
    /// Internal RAM mirror: re-dispatch at `addr & 0x07FF`.
    RamMirror,
    /// PPU registers $2000–$2007.
    PpuRegisters,
    /// PPU register mirror: re-dispatch at `addr & 0x2007`.
    PpuRegisterMirror,
    /// OAM DMA trigger ($4014, write-only).
    OamDma,
    /// APU channel registers, offset from the region start.
    ApuRegisters,
    /// APU status ($4015).
    ApuStatus,
    /// Controller port 0 or 1.
    Joypad(usize),
    /// Cartridge PRG window; offsets count from the region start.
    CartridgePrg,
}

/// One registered address range and its handler.
pub struct MemoryRegion {
    pub range: AddressRange,
    pub handler: Handler,
    memory: Vec<u8>,
}

/// The memory-management unit: ordered regions plus the devices they route to.
pub struct Mmu {
    regions: Vec<MemoryRegion>,
    pub cart: Cartridge,
    pub ppu: Ppu,
    pub apu: Apu,
    pub joypads: [Joypad; 2],
    /// Total CPU cycles observed; parity decides the OAM DMA stall length.
    cycles: usize,
}

impl Mmu {
    pub fn new(cart: Cartridge, draw_callback: DrawCallback) -> Self {
        let mut mmu = Self {
            regions: Vec::new(),
            cart,
            ppu: Ppu::new(draw_callback),
            apu: Apu::new(),
            joypads: [Joypad::new(), Joypad::new()],
            cycles: 0,
        };
        mmu.register_power_on_regions();
        mmu
    }

    fn register_power_on_regions(&mut self) {
        // Primary storage first, then mirrors and device windows.
        self.add_backed_region(AddressRange::new(0x0000, 0x07FF)); // internal RAM
        self.add_backed_region(AddressRange::new(0x6000, 0x7FFF)); // work RAM
        // Reserved for mapper bank-switch registers; plain bytes until a
        // bank-switching mapper needs them.
        self.add_backed_region(AddressRange::new(0x4020, 0x5FFF));
        self.add_memory_region(AddressRange::new(0x0800, 0x1FFF), Handler::RamMirror);
        self.add_memory_region(AddressRange::new(0x8000, 0xFFFF), Handler::CartridgePrg);
        self.add_memory_region(AddressRange::new(0x4016, 0x4016), Handler::Joypad(0));
        self.add_memory_region(AddressRange::new(0x4017, 0x4017), Handler::Joypad(1));
        self.add_memory_region(AddressRange::new(0x4000, 0x4013), Handler::ApuRegisters);
        self.add_memory_region(AddressRange::new(0x4015, 0x4015), Handler::ApuStatus);
        self.add_memory_region(AddressRange::new(0x2000, 0x2007), Handler::PpuRegisters);
        self.add_memory_region(AddressRange::new(0x2008, 0x3FFF), Handler::PpuRegisterMirror);
        self.add_memory_region(AddressRange::new(0x4014, 0x4014), Handler::OamDma);
    }

    /// Register a region. Earlier registrations take priority on overlap.
    pub fn add_memory_region(&mut self, range: AddressRange, handler: Handler) {
        self.regions.push(MemoryRegion {
            range,
            handler,
            memory: Vec::new(),
        });
    }

    /// Register a region that owns its backing bytes, zero-initialized.
    pub fn add_backed_region(&mut self, range: AddressRange) {
        self.regions.push(MemoryRegion {
            range,
            handler: Handler::Backed,
            memory: vec![0; range.extent() as usize],
        });
    }

    /// Drop every region, for alternate address-space setups.
    pub fn clear_memory_regions(&mut self) {
        self.regions.clear();
    }

    /// A backed region's storage, in registration order.
    pub fn region_memory(&self, index: usize) -> &[u8] {
        &self.regions[index].memory
    }

    fn find_region(&self, addr: u16) -> Option<usize> {
        self.regions.iter().position(|r| r.range.contains(addr))
    }

    pub fn read(&mut self, addr: u16) -> u8 {
        let Some(index) = self.find_region(addr) else {
            warn!("read from unmapped address {addr:#06X}");
            return 0;
        };

        let from = self.regions[index].range.from;
        let handler = self.regions[index].handler;
        match handler {
            Handler::Backed => self.regions[index].memory[(addr - from) as usize],
            Handler::RamMirror => self.read(addr & 0x07FF),
            Handler::PpuRegisters => self.ppu.register_read(addr, &self.cart),
            Handler::PpuRegisterMirror => self.read(addr & 0x2007),
            Handler::OamDma => {
                warn!("read from write-only OAM DMA register");
                0
            }
            Handler::ApuRegisters => self.apu.read_register(addr - from),
            Handler::ApuStatus => self.apu.read_status(),
            Handler::Joypad(port) => self.joypads[port].read(),
            Handler::CartridgePrg => self.cart.mapped_read_prg(addr - from),
        }
    }

    pub fn write(&mut self, addr: u16, data: u8) {
        let Some(index) = self.find_region(addr) else {
            warn!("write of {data:#04X} to unmapped address {addr:#06X}");
            return;
        };

        let from = self.regions[index].range.from;
        let handler = self.regions[index].handler;
        match handler {
            Handler::Backed => self.regions[index].memory[(addr - from) as usize] = data,
            Handler::RamMirror => self.write(addr & 0x07FF, data),
            Handler::PpuRegisters => self.ppu.register_write(addr, data, &mut self.cart),
            Handler::PpuRegisterMirror => self.write(addr & 0x2007, data),
            Handler::OamDma => self.oam_dma(data),
            Handler::ApuRegisters => self.apu.write_register(addr - from, data),
            Handler::ApuStatus => self.apu.write_status(data),
            Handler::Joypad(port) => self.joypads[port].write(data),
            Handler::CartridgePrg => self.cart.mapped_write_prg(addr - from, data),
        }
    }

    /// Little-endian 16-bit read.
    pub fn read_word(&mut self, addr: u16) -> u16 {
        let hi = u16::from(self.read(addr.wrapping_add(1)));
        let lo = u16::from(self.read(addr));
        (hi << 8) | lo
    }

    /// Little-endian 16-bit write; the high byte is stored first.
    pub fn write_word(&mut self, addr: u16, data: u16) {
        self.write(addr.wrapping_add(1), (data >> 8) as u8);
        self.write(addr, (data & 0xFF) as u8);
    }

    /// Copy one 256-byte page into OAM and charge the DMA stall: 513 CPU
    /// cycles, plus one when the DMA starts on an odd cycle.
    fn oam_dma(&mut self, page: u8) {
        let base = u16::from(page) << 8;
        for i in 0..256u16 {
            let byte = self.read(base + i);
            self.ppu.write_oam_data(byte);
        }

        let stall = 513 + self.cycles % 2;
        self.cycles += stall;
        self.ppu.tick(stall, &self.cart);
    }
}

impl Bus for Mmu {
    fn read(&mut self, addr: u16) -> u8 {
        Mmu::read(self, addr)
    }

    fn write(&mut self, addr: u16, data: u8) {
        Mmu::write(self, addr, data)
    }

    fn tick(&mut self, cycles: usize) {
        self.cycles += cycles;
        self.ppu.tick(cycles, &self.cart);
    }

    fn poll_nmi(&mut self) -> bool {
        self.ppu.nmi_status()
    }
}
