//! NES controller input handling.
//!
//! Standard controller protocol: write $01 to the port to strobe, then read
//! repeatedly to shift out one button per read in the order A, B, Select,
//! Start, Up, Down, Left, Right. While the strobe is held the index stays
//! parked on A.

/// The eight controller buttons, in shift-out order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    A = 0,
    B = 1,
    Select = 2,
    Start = 3,
    Up = 4,
    Down = 5,
    Left = 6,
    Right = 7,
}

/// One controller on $4016 or $4017.
pub struct Joypad {
    strobe: bool,
    index: u8,
    pressed: [bool; 8],
}

impl Joypad {
    pub fn new() -> Self {
        Self {
            strobe: false,
            index: 0,
            pressed: [false; 8],
        }
    }

    pub fn press(&mut self, button: Button) {
        self.pressed[button as usize] = true;
    }

    pub fn release(&mut self, button: Button) {
        self.pressed[button as usize] = false;
    }

    /// Port write: bit 0 is the strobe. Raising it parks the index on A.
    pub fn write(&mut self, data: u8) {
        self.strobe = data & 1 != 0;
        if self.strobe {
            self.index = 0;
        }
    }

    /// Port read: the current button's state; past the last button the
    /// hardware answers 1.
    pub fn read(&mut self) -> u8 {
        if self.index >= 8 {
            return 1;
        }

        let bit = u8::from(self.pressed[self.index as usize]);
        if !self.strobe {
            self.index += 1;
        }
        bit
    }
}

impl Default for Joypad {
    fn default() -> Self {
        Self::new()
    }
}
