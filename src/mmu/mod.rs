//! CPU-side memory management: address ranges and the region-dispatch bus.
//!
//! - **range**: closed `[from, to]` intervals over the 16-bit address space.
//! - **mmu**: ordered table of address-range handlers; first registered match
//!   wins, so mirrors are registered after the regions they shadow.

pub mod mmu;
pub mod range;
