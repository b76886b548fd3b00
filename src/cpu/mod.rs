//! 6502 CPU emulation for the NES.
//!
//! Full instruction set including undocumented opcodes and JAM lock-up.
//! The `Bus` trait covers memory and I/O (PPU, APU, cartridge, controller).

pub mod cpu;
pub mod flags;
