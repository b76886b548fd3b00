//! PPU (Picture Processing Unit) emulation.
//!
//! See [PPU](https://www.nesdev.org/wiki/PPU), [PPU registers](https://www.nesdev.org/wiki/PPU_registers),
//! [PPU memory map](https://www.nesdev.org/wiki/PPU_memory_map). 341-dot scanlines, 262 scanlines
//! per frame, vblank NMI, whole-frame background and sprite rendering, OAM, nametables, palette.

pub mod oam;
pub mod palette;
pub mod ppu;
pub mod registers;
pub mod tile;
