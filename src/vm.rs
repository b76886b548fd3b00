//! Composition root: CPU wired to the memory bus, stepped in frame-sized
//! slices of cycles.

use std::path::Path;

use crate::cartridge::cartridge::{Cartridge, RomError};
use crate::cpu::cpu::Cpu;
use crate::joypad::Button;
use crate::mmu::mmu::Mmu;
use crate::ppu::ppu::DrawCallback;

/// NTSC CPU cycles per video frame (1.789773 MHz / 60.0988 Hz).
pub const CYCLES_PER_FRAME: usize = 29_780;

pub struct VirtualMachine {
    cpu: Cpu<Mmu>,
}

impl VirtualMachine {
    /// Build a powered-on machine with an empty cartridge slot. The
    /// callback receives each finished framebuffer.
    pub fn new(draw_callback: DrawCallback) -> Self {
        let bus = Mmu::new(Cartridge::new(), draw_callback);
        Self { cpu: Cpu::new(bus) }
    }

    /// Load an iNES image and jump to its reset vector.
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<(), RomError> {
        self.cpu.bus.cart.load_from_file(path)?;
        self.cpu.load_program_counter();
        Ok(())
    }

    /// Run one frame's worth of CPU cycles. The PPU catches up through
    /// the bus on every instruction, so the draw callback fires from
    /// inside this call once the frame completes.
    pub fn tick(&mut self) {
        let mut spent = 0;
        while spent < CYCLES_PER_FRAME {
            spent += self.cpu.step();
        }
    }

    pub fn press(&mut self, button: Button) {
        self.cpu.bus.joypads[0].press(button);
    }

    pub fn release(&mut self, button: Button) {
        self.cpu.bus.joypads[0].release(button);
    }
}
