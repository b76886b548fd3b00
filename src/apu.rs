//! APU register file ($4000–$4013, $4015).
//!
//! Pass-through storage only; no sample synthesis. Games read back what they
//! wrote so sound drivers keep running without audible output.

/// Number of channel registers at $4000–$4013.
const REGISTER_COUNT: usize = 0x14;

pub struct Apu {
    registers: [u8; REGISTER_COUNT],
    status: u8,
}

impl Apu {
    pub fn new() -> Self {
        Self {
            registers: [0; REGISTER_COUNT],
            status: 0,
        }
    }

    /// Read a channel register; `offset` counts from $4000.
    pub fn read_register(&self, offset: u16) -> u8 {
        self.registers[offset as usize]
    }

    pub fn write_register(&mut self, offset: u16, data: u8) {
        self.registers[offset as usize] = data;
    }

    pub fn read_status(&self) -> u8 {
        self.status
    }

    pub fn write_status(&mut self, data: u8) {
        self.status = data;
    }
}

impl Default for Apu {
    fn default() -> Self {
        Self::new()
    }
}
