//! 8×8 CHR tiles: two bit-planes of 8 bytes each.

/// One pattern-table tile: bytes 0..8 hold the low bit-plane, 8..16 the high.
#[derive(Clone, Copy, Debug)]
pub struct Tile {
    pub bytes: [u8; 16],
}

impl Tile {
    /// The 2-bit color id of pixel (x, y), x counted from the left.
    pub fn color_id(&self, x: usize, y: usize) -> u8 {
        let shift = 7 - x;
        let lower = (self.bytes[y] >> shift) & 1;
        let upper = (self.bytes[y + 8] >> shift) & 1;
        (upper << 1) | lower
    }
}
