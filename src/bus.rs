//! Memory and I/O seam between the CPU and the rest of the machine.
//!
//! The CPU is generic over this trait; the real machine plugs in [`Mmu`](crate::mmu::mmu::Mmu),
//! tests plug in a flat 64 KiB array.

/// Trait for memory-mapped I/O and bus access used by the CPU.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
    /// Advance the rest of the machine by the CPU cycles just consumed.
    fn tick(&mut self, cycles: usize);
    /// Take the pending NMI signal, if any. Consuming it clears it.
    fn poll_nmi(&mut self) -> bool;
}
