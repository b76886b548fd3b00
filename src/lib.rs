//! Vesper: an NES (Nintendo Entertainment System) emulator written in Rust.
//!
//! Implements the NES chipset as documented on the
//! [NESdev Wiki](https://www.nesdev.org/wiki/NES_reference_guide): 6502 CPU,
//! 2C02 PPU, memory-mapped bus, cartridge mappers, and controller I/O.
//!
//! ## Modules (NESdev references)
//!
//! - **apu** – [APU](https://www.nesdev.org/wiki/APU) register file; no sample synthesis
//! - **bus** – the `Bus` trait the CPU executes against
//! - **cartridge** – [iNES](https://www.nesdev.org/wiki/INES) loading; [Mapper](https://www.nesdev.org/wiki/Mapper) NROM (0)
//! - **cpu** – [6502](https://www.nesdev.org/wiki/CPU): full + undocumented opcodes, [NMI](https://www.nesdev.org/wiki/NMI)
//! - **joypad** – [Controller reading](https://www.nesdev.org/wiki/Controller_reading): $4016/$4017 latch, shift-out
//! - **mmu** – [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map) as an ordered address-range table
//! - **ppu** – [PPU](https://www.nesdev.org/wiki/PPU), [PPU registers](https://www.nesdev.org/wiki/PPU_registers), OAM, nametables, 256×240
//! - **vm** – composition root: one `tick()` per video frame

pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod joypad;
pub mod mmu;
pub mod ppu;
pub mod vm;
