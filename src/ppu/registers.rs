//! PPU control, mask, and status registers as bit-indexed values.

use bitflags::bitflags;

bitflags! {
    /// PPUCTRL ($2000), write-only.
    pub struct Control: u8 {
        const BASE_NAMETABLE_LO = 1 << 0;
        const BASE_NAMETABLE_HI = 1 << 1;
        /// VRAM address increment per $2007 access: clear = 1, set = 32.
        const LARGE_VRAM_INCREMENT = 1 << 2;
        /// Sprite pattern table bank ($0000 or $1000).
        const SPRITE_PATTERN_TABLE = 1 << 3;
        /// Background pattern table bank ($0000 or $1000).
        const BACKGROUND_PATTERN_TABLE = 1 << 4;
        const SPRITE_SIZE = 1 << 5;
        const MASTER_SLAVE = 1 << 6;
        /// Generate an NMI at the start of vblank.
        const GENERATE_VBLANK_NMI = 1 << 7;
    }
}

bitflags! {
    /// PPUMASK ($2001), write-only. Retained but not consulted by the
    /// whole-frame renderer.
    pub struct Mask: u8 {
        const GREYSCALE = 1 << 0;
        const SHOW_BACKGROUND_LEFT = 1 << 1;
        const SHOW_SPRITES_LEFT = 1 << 2;
        const SHOW_BACKGROUND = 1 << 3;
        const SHOW_SPRITES = 1 << 4;
        const EMPHASIZE_RED = 1 << 5;
        const EMPHASIZE_GREEN = 1 << 6;
        const EMPHASIZE_BLUE = 1 << 7;
    }
}

bitflags! {
    /// PPUSTATUS ($2002), read-only. Reading has side effects handled by the PPU.
    pub struct Status: u8 {
        const SPRITE_OVERFLOW = 1 << 5;
        const SPRITE_ZERO_HIT = 1 << 6;
        const VBLANK = 1 << 7;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_clear_are_observable_per_flag() {
        let mut status = Status::empty();

        status.insert(Status::VBLANK);
        assert!(status.contains(Status::VBLANK));
        assert!(!status.contains(Status::SPRITE_ZERO_HIT));

        status.remove(Status::VBLANK);
        assert!(!status.contains(Status::VBLANK));
    }

    #[test]
    fn conditional_set_matches_explicit_set_and_clear() {
        let mut a = Control::empty();
        let mut b = Control::empty();

        a.set(Control::GENERATE_VBLANK_NMI, true);
        b.insert(Control::GENERATE_VBLANK_NMI);
        assert_eq!(a, b);

        a.set(Control::GENERATE_VBLANK_NMI, false);
        b.remove(Control::GENERATE_VBLANK_NMI);
        assert_eq!(a, b);
    }

    #[test]
    fn combined_value_round_trips() {
        let mask = Mask::from_bits_truncate(0b1001_0110);
        assert_eq!(mask.bits(), 0b1001_0110);

        for bit in 0..8 {
            let single = Mask::from_bits_truncate(1 << bit);
            assert_eq!(single.bits(), 1 << bit);
        }
    }
}
